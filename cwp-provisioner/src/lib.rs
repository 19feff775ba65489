//! CWP Provisioner
//!
//! Hosting-account lifecycle on top of a `CentOS` Web Panel server:
//! - package catalog for the product configuration form
//! - account creation under a generated username
//! - suspend / unsuspend / terminate
//! - single-sign-on links into the panel
//!
//! The host platform is reached only through [`ExtensionHost`]; configuration,
//! order persistence and error alerting stay on the host side.

pub mod error;
pub mod extension;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export common types
pub use error::{ProvisionError, ProvisionResult};
pub use extension::{CwpExtension, EXTENSION_NAME};
pub use services::{AccountProvisioner, TerminationOutcome};
pub use traits::{ExtensionHost, ServerExtension};
