pub mod auth;
pub mod campaigns;
pub mod client_portal;
pub mod clients;
pub mod models;
pub mod registration;
pub mod registrations;
