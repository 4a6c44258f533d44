//! Domain logic for the IMEI take-back registration service.
//!
//! This crate has no internal dependencies so it can be shared by the
//! repository layer, the HTTP server and any client tooling.

pub mod clients;
pub mod error;
pub mod imei;
pub mod pagination;
pub mod receipt;
pub mod registration;
pub mod scanner;
pub mod staging;
pub mod types;
