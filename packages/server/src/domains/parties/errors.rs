use thiserror::Error;

use crate::common::PartyId;

/// Errors surfaced by party repository operations.
#[derive(Debug, Error)]
pub enum PartyError {
    /// A database read or write failed.
    #[error("persistence failed: {0}")]
    Persistence(#[source] anyhow::Error),

    #[error("party {0} not found")]
    NotFound(PartyId),

    /// At least one image upload failed; no URLs were written back.
    #[error("image upload failed: {reason}")]
    Upload { reason: String },
}
