//! The batch-registration request shared by the staging list (producer) and
//! the registration endpoint (consumer).
//!
//! Wire field names follow the public contract (`cliente_sap`, `baja_id`,
//! `registros`, `modelo_id`).

use serde::{Deserialize, Serialize};

use crate::clients::require_sap_code;
use crate::error::CoreError;
use crate::imei::validate_imei;
use crate::types::DbId;

/// One `(model, IMEI)` pair inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEntry {
    #[serde(rename = "modelo_id")]
    pub model_id: DbId,
    pub imei: String,
}

/// A batch of IMEIs for a single client and a single campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterBatch {
    #[serde(rename = "cliente_sap")]
    pub client_sap: String,
    #[serde(rename = "baja_id")]
    pub campaign_id: DbId,
    #[serde(rename = "registros")]
    pub entries: Vec<RegistrationEntry>,
}

impl RegisterBatch {
    /// Check the batch and normalize the client code.
    ///
    /// Rejects a blank client code, an empty entry list, and any IMEI that is
    /// not exactly fifteen digits. Referenced ids are not checked here; the
    /// store's foreign keys are the only existence check.
    pub fn into_validated(mut self) -> Result<Self, CoreError> {
        self.client_sap = require_sap_code(&self.client_sap)
            .map_err(|_| CoreError::Validation("cliente_sap is required".into()))?;

        if self.entries.is_empty() {
            return Err(CoreError::Validation("registros must not be empty".into()));
        }

        for entry in &self.entries {
            validate_imei(&entry.imei)?;
        }

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Human-readable confirmation returned after a batch is stored.
pub fn registered_message(count: usize) -> String {
    format!("{count} IMEIs registrados.")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn batch(sap: &str, imeis: &[&str]) -> RegisterBatch {
        RegisterBatch {
            client_sap: sap.to_string(),
            campaign_id: 5,
            entries: imeis
                .iter()
                .map(|imei| RegistrationEntry {
                    model_id: 1,
                    imei: imei.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn deserializes_wire_names() {
        let json = serde_json::json!({
            "cliente_sap": "C1",
            "baja_id": 5,
            "registros": [{"modelo_id": 1, "imei": "123456789012345"}]
        });
        let parsed: RegisterBatch = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, batch("C1", &["123456789012345"]));
    }

    #[test]
    fn normalizes_client_code() {
        let validated = batch(" c1 ", &["123456789012345"]).into_validated().unwrap();
        assert_eq!(validated.client_sap, "C1");
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_matches!(batch("C1", &[]).into_validated(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_client_is_rejected() {
        let err = batch(" ", &["123456789012345"]).into_validated().unwrap_err();
        assert!(err.to_string().contains("cliente_sap"));
    }

    #[test]
    fn one_bad_imei_rejects_the_whole_batch() {
        let result = batch("C1", &["123456789012345", "12345"]).into_validated();
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("'12345'"));
    }

    #[test]
    fn duplicates_inside_a_batch_are_allowed() {
        let validated = batch("C1", &["123456789012345", "123456789012345"])
            .into_validated()
            .unwrap();
        assert_eq!(validated.len(), 2);
    }

    #[test]
    fn message_carries_count() {
        assert_eq!(registered_message(1), "1 IMEIs registrados.");
    }
}
