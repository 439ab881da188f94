use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

use crate::identifier::ResourceKind;

/// Where a piece of policy text came from.
///
/// Normalization failures point the user at the right fix: a malformed
/// document from configuration is an authoring error, one from the remote
/// API is an upstream-data problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PolicyTextOrigin {
    #[strum(serialize = "configuration")]
    Configuration,
    #[strum(serialize = "the RGW Admin API")]
    RemoteApi,
}

#[derive(Debug, Error, Serialize, Deserialize)]
pub enum PolicyError {
    #[error("invalid statement: {0}")]
    InvalidStatement(String),

    #[error("malformed policy document from {origin}: {reason}")]
    MalformedPolicy {
        origin: PolicyTextOrigin,
        reason: String,
    },

    #[error("invalid import id '{id}' for {kind}: expected '{expected}'")]
    InvalidImportFormat {
        kind: ResourceKind,
        id: String,
        expected: String,
    },

    #[error("failed to serialize policy document: {0}")]
    SerializeError(String),
}
