//! # cwp-panel
//!
//! A small client for the account-management API of
//! [`CentOS` Web Panel](https://control-webpanel.com/) (CWP).
//!
//! Only the endpoints needed to drive a hosting-account lifecycle are covered:
//!
//! | Endpoint | Actions |
//! |----------|---------|
//! | `/v1/packages` | `list` |
//! | `/v1/account` | `add`, `susp`, `unsp`, `del` |
//! | `/v1/user_session` | `list` |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cwp_panel::{Action, Endpoint, PanelClient, PanelCredentials, PanelPackage, PanelRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = PanelCredentials::new("https://panel.example.com:2304", "api-key")?;
//!     let client = PanelClient::new()?;
//!
//!     let request = PanelRequest::new(Endpoint::Packages, Action::List);
//!     let packages: Vec<PanelPackage> = client.fetch(&credentials, &request).await?;
//!     for package in &packages {
//!         println!("{} ({})", package.package_name, package.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, PanelError>`](PanelError):
//!
//! - [`PanelError::NetworkError`] / [`PanelError::Timeout`]: the exchange never completed
//! - [`PanelError::ParseError`]: the body is not a JSON envelope
//! - [`PanelError::RemoteRejected`]: the envelope's `status` is not `"OK"`
//!
//! Nothing is retried.

mod client;
mod error;
mod http_client;
mod types;
mod utils;

pub use client::{PanelClient, PanelClientOptions};
pub use error::{PanelError, Result};
pub use types::{
    Action, Endpoint, PanelCredentials, PanelEnvelope, PanelPackage, PanelRequest, STATUS_OK,
    SessionDetail, SessionList,
};

pub use utils::log_sanitizer;
