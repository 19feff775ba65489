//! Host integration trait definitions

mod extension_host;
mod server_extension;

pub use extension_host::ExtensionHost;
pub use server_extension::ServerExtension;
