//! In-memory staging of scanned or typed IMEIs before submission.
//!
//! The list preserves scan order, rejects malformed and duplicate IMEIs, and
//! is cleared only once every per-campaign batch has been accepted.

use crate::imei::is_valid_imei;
use crate::registration::{RegisterBatch, RegistrationEntry};
use crate::types::DbId;

/// Where an IMEI came from. Both sources are validated identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImeiSource {
    Scan,
    Manual,
}

/// The campaign and model currently selected in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub campaign_id: DbId,
    pub campaign_name: String,
    pub model_id: DbId,
    pub model_name: String,
}

/// One staged IMEI with the names needed to render it and its receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedEntry {
    pub imei: String,
    pub model_id: DbId,
    pub model_name: String,
    pub campaign_id: DbId,
    pub campaign_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("'{value}' is not a 15-digit IMEI ({origin:?} input)")]
    InvalidFormat { value: String, origin: ImeiSource },

    #[error("Select a campaign and a model first")]
    NoSelection,

    #[error("IMEI {imei} is already in the list")]
    Duplicate { imei: String },
}

/// Ordered list of IMEIs waiting to be submitted.
#[derive(Debug, Default, Clone)]
pub struct StagingList {
    entries: Vec<StagedEntry>,
}

impl StagingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an IMEI.
    ///
    /// Input is trimmed first. Checks run in order: format, selection,
    /// duplicate. On any error the list is unchanged.
    pub fn stage(
        &mut self,
        raw: &str,
        origin: ImeiSource,
        selection: Option<&Selection>,
    ) -> Result<&StagedEntry, StageError> {
        let imei = raw.trim();
        if !is_valid_imei(imei) {
            return Err(StageError::InvalidFormat {
                value: imei.to_string(),
                origin,
            });
        }

        let selection = selection.ok_or(StageError::NoSelection)?;

        if self.contains(imei) {
            return Err(StageError::Duplicate {
                imei: imei.to_string(),
            });
        }

        self.entries.push(StagedEntry {
            imei: imei.to_string(),
            model_id: selection.model_id,
            model_name: selection.model_name.clone(),
            campaign_id: selection.campaign_id,
            campaign_name: selection.campaign_name.clone(),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove the entry at `index`, returning it if it existed.
    pub fn remove(&mut self, index: usize) -> Option<StagedEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn contains(&self, imei: &str) -> bool {
        self.entries.iter().any(|e| e.imei == imei)
    }

    pub fn entries(&self) -> &[StagedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether leaving the page should warn about unsent entries.
    pub fn has_unsent(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Group entries into one batch per campaign, in first-seen campaign
    /// order and staged order within each campaign.
    pub fn batches(&self, client_sap: &str) -> Vec<RegisterBatch> {
        let mut batches: Vec<RegisterBatch> = Vec::new();
        for entry in &self.entries {
            let item = RegistrationEntry {
                model_id: entry.model_id,
                imei: entry.imei.clone(),
            };
            match batches.iter_mut().find(|b| b.campaign_id == entry.campaign_id) {
                Some(batch) => batch.entries.push(item),
                None => batches.push(RegisterBatch {
                    client_sap: client_sap.to_string(),
                    campaign_id: entry.campaign_id,
                    entries: vec![item],
                }),
            }
        }
        batches
    }

    /// Send every batch in order through `send`.
    ///
    /// Stops at the first failure and leaves the list untouched so the user
    /// can retry. When every batch succeeds the list is cleared and the sent
    /// entries are returned for the receipt.
    pub fn submit_with<F, E>(
        &mut self,
        client_sap: &str,
        mut send: F,
    ) -> Result<Vec<StagedEntry>, E>
    where
        F: FnMut(&RegisterBatch) -> Result<(), E>,
    {
        for batch in self.batches(client_sap) {
            send(&batch)?;
        }
        Ok(std::mem::take(&mut self.entries))
    }
}
