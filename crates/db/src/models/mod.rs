//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs for request bodies
//!
//! Rust fields use the English column names; serde renames map them to the
//! Spanish names of the public JSON contract.

pub mod admin;
pub mod campaign;
pub mod client;
pub mod device_model;
pub mod registration;
