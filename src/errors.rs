use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::migrate::Phase;

/// Failure of a single dashboard API call.
///
/// The migration does not distinguish transient from permanent failures and
/// never retries; every variant is fatal to the phase it occurs in.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the API rejection, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What went wrong inside a migration phase.
#[derive(Error, Debug)]
pub enum PhaseError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to write snapshot artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("device {serial} has no management interface to update")]
    NoManagementInterface { serial: String },
}

/// A migration halted at a specific phase.
///
/// Earlier phases have already been applied to the devices; no compensating
/// action is attempted.
#[derive(Error, Debug)]
#[error("migration failed at phase {} ({})", .phase.number(), .phase)]
pub struct MigrationFailure {
    pub phase: Phase,
    #[source]
    pub error: PhaseError,
}
