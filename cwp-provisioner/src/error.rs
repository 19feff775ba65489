//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use cwp_panel::PanelError;

/// Provisioning layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ProvisionError {
    /// The panel call failed (transport, decode or remote rejection)
    #[error("{0}")]
    Panel(#[from] PanelError),

    /// Host configuration is missing a required value
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// Order data failed validation
    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The panel answered but no usable auto-login URL could be extracted
    #[error("Invalid single sign-on link: {0}")]
    InvalidLink(String),
}

impl ProvisionError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Text handed to the host's error sink.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Panel(e) => e.diagnostic().to_string(),
            other => other.to_string(),
        }
    }
}

/// Provisioning layer Result type alias
pub type ProvisionResult<T> = std::result::Result<T, ProvisionError>;
