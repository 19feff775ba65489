//! 服务器扩展生命周期 Trait

use async_trait::async_trait;
use url::Url;

use crate::types::{ConfigField, ExtensionMetadata, OrderContext};

/// Lifecycle contract a hosting-server extension implements for the host.
///
/// Outcomes are plain booleans: failures have already been reported through
/// [`ExtensionHost::report_error`](crate::traits::ExtensionHost::report_error)
/// by the time a method returns.
#[async_trait]
pub trait ServerExtension: Send + Sync {
    /// Extension metadata (name, version, author).
    fn metadata(&self) -> ExtensionMetadata;

    /// Settings the administrator fills in once per extension.
    fn config_fields(&self) -> Vec<ConfigField>;

    /// Values the customer enters at checkout.
    fn user_config_fields(&self) -> Vec<ConfigField>;

    /// Per-product form. May query the remote panel; never fails.
    async fn product_config(&self) -> Vec<ConfigField>;

    /// Provision the account for an order product.
    async fn create_server(&self, order: &OrderContext) -> bool;

    async fn suspend_server(&self, order: &OrderContext) -> bool;

    async fn unsuspend_server(&self, order: &OrderContext) -> bool;

    /// Remove the account. Implementations may choose never to block on the panel.
    async fn terminate_server(&self, order: &OrderContext) -> bool;

    /// Single-sign-on URL into the panel, `None` when it could not be obtained.
    async fn get_link(&self, order: &OrderContext) -> Option<Url>;
}
