//! Grouping of submitted IMEIs for the downloadable receipt.
//!
//! Rendering (PDF/XLSX layout) happens in the browser; this module fixes the
//! content: one section per campaign/model pair in submission order, with
//! 1-based numbering, plus the file name.

use chrono::NaiveDate;

use crate::staging::StagedEntry;

/// Receipt file formats offered after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptFormat {
    Pdf,
    Xlsx,
}

impl ReceiptFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReceiptFormat::Pdf => "pdf",
            ReceiptFormat::Xlsx => "xlsx",
        }
    }
}

/// IMEIs sharing a campaign and model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSection {
    pub title: String,
    pub imeis: Vec<String>,
}

impl ReceiptSection {
    /// Lines as printed on the receipt: `"1. <imei>"`, `"2. <imei>"`, ...
    pub fn numbered_lines(&self) -> Vec<String> {
        self.imeis
            .iter()
            .enumerate()
            .map(|(i, imei)| format!("{}. {imei}", i + 1))
            .collect()
    }
}

/// Build receipt sections from submitted entries.
pub fn group_for_receipt(entries: &[StagedEntry]) -> Vec<ReceiptSection> {
    let mut sections: Vec<ReceiptSection> = Vec::new();
    for entry in entries {
        let title = format!(
            "Campaña: {} / Modelo: {}",
            entry.campaign_name, entry.model_name
        );
        match sections.iter_mut().find(|s| s.title == title) {
            Some(section) => section.imeis.push(entry.imei.clone()),
            None => sections.push(ReceiptSection {
                title,
                imeis: vec![entry.imei.clone()],
            }),
        }
    }
    sections
}

/// Receipt file name: `Reporte_IMEIs_<SAP>_<YYYYMMDD>.<ext>`.
///
/// # Examples
///
/// ```
/// use baja_core::receipt::{receipt_filename, ReceiptFormat};
/// let day = chrono::NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// assert_eq!(
///     receipt_filename("C1", day, ReceiptFormat::Pdf),
///     "Reporte_IMEIs_C1_20260309.pdf"
/// );
/// ```
pub fn receipt_filename(client_sap: &str, date: NaiveDate, format: ReceiptFormat) -> String {
    format!(
        "Reporte_IMEIs_{client_sap}_{}.{}",
        date.format("%Y%m%d"),
        format.extension()
    )
}
