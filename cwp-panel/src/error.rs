use serde::{Deserialize, Serialize};

/// Unified error type for all CWP panel calls.
///
/// The variants fall into three groups:
///
/// - transport failures: [`NetworkError`](Self::NetworkError) and
///   [`Timeout`](Self::Timeout), raised before a complete HTTP exchange happened
/// - decode failures: [`ParseError`](Self::ParseError), the panel answered with
///   something that is not a JSON envelope of the expected shape
/// - remote rejections: [`RemoteRejected`](Self::RemoteRejected), a well-formed
///   envelope whose `status` is not `"OK"`
///
/// None of them is retried by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum PanelError {
    /// A network-level error occurred (DNS resolution failure, connection refused, TLS, etc.).
    NetworkError {
        /// Error details from the transport.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details from the transport.
        detail: String,
    },

    /// The panel response is not a valid JSON envelope.
    ParseError {
        /// Details about the parse failure.
        detail: String,
        /// The raw response body, kept as diagnostic context.
        raw_body: String,
    },

    /// The panel answered with a `status` other than `"OK"`.
    RemoteRejected {
        /// The `status` value returned by the panel.
        status: String,
        /// Message extracted from the envelope's `msj` field.
        raw_message: String,
        /// The raw response body, kept as diagnostic context.
        raw_body: String,
    },

    /// A request parameter is invalid (e.g. malformed panel hostname).
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl PanelError {
    /// Whether the error happened before a complete HTTP exchange.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }

    /// Text handed to the host's error sink.
    ///
    /// Transport errors report the transport message; decode failures and
    /// remote rejections report the raw response body.
    pub fn diagnostic(&self) -> &str {
        match self {
            Self::NetworkError { detail }
            | Self::Timeout { detail }
            | Self::InvalidParameter { detail, .. } => detail,
            Self::ParseError { raw_body, .. } | Self::RemoteRejected { raw_body, .. } => raw_body,
        }
    }
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::ParseError { detail, .. } => write!(f, "Parse error: {detail}"),
            Self::RemoteRejected {
                status,
                raw_message,
                ..
            } => {
                if raw_message.is_empty() {
                    write!(f, "Panel rejected request (status {status})")
                } else {
                    write!(f, "Panel rejected request (status {status}): {raw_message}")
                }
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
        }
    }
}

impl std::error::Error for PanelError {}

/// Convenience type alias for `Result<T, PanelError>`.
pub type Result<T> = std::result::Result<T, PanelError>;
