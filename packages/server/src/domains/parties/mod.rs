//! Parties domain - hosted gatherings with metadata, photos and guest lists

pub mod errors;
pub mod models;
pub mod service;

pub use errors::PartyError;
pub use models::{NewParty, Party};
