//! Error types for the studio_core library.

use crate::{EquipmentId, SessionId, SessionStatus};
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for studio_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request field was malformed or a required reference did not resolve
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested equipment is already reserved by an active session
    #[error("Booking conflict: equipment #{equipment_id} ({name}) is already reserved")]
    BookingConflict { equipment_id: EquipmentId, name: String },

    /// Lookup by ID found nothing
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// Session status change not permitted from its current state
    #[error("Cannot {action} session #{session_id}: status is {from}")]
    InvalidTransition {
        session_id: SessionId,
        from: SessionStatus,
        action: &'static str,
    },

    /// Snapshot could not be read, parsed, validated or written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: u32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
