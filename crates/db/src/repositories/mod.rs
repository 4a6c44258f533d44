//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod admin_repo;
pub mod campaign_repo;
pub mod client_repo;
pub mod device_model_repo;
pub mod registration_repo;

pub use admin_repo::AdminRepo;
pub use campaign_repo::CampaignRepo;
pub use client_repo::ClientRepo;
pub use device_model_repo::DeviceModelRepo;
pub use registration_repo::RegistrationRepo;
