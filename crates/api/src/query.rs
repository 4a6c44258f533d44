//! Shared query parameter types for API handlers.

use std::fmt::Display;
use std::str::FromStr;

use baja_core::types::DbId;
use baja_db::models::registration::RegistrationFilter;
use serde::{Deserialize, Deserializer};

/// Query string for the registration listing and export
/// (`?page=&limit=&bajaId=&search=`).
///
/// The admin UI sends empty values for unset filters (`bajaId=`), so blank
/// numbers read as absent. Page and limit are clamped by `PageRequest`; the
/// export ignores them.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
    #[serde(rename = "bajaId", default, deserialize_with = "blank_as_none")]
    pub campaign_id: Option<DbId>,
    pub search: Option<String>,
}

impl RegistrationQuery {
    /// The filter shared by count, page and export.
    pub fn filter(&self) -> RegistrationFilter {
        RegistrationFilter {
            campaign_id: self.campaign_id,
            search: self.search.clone(),
        }
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
