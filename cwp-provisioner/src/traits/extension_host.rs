//! 宿主平台协作接口

use async_trait::async_trait;

/// Services the host platform provides to an extension.
///
/// The host owns configuration storage, order persistence and alerting; the
/// extension only reaches them through this trait.
#[async_trait]
pub trait ExtensionHost: Send + Sync {
    /// Read an extension setting (e.g. `hostname`, `apiKey`).
    ///
    /// Called on every operation; values may change between calls.
    ///
    /// # Returns
    /// * `Some(value)` - the setting exists
    /// * `None` - the setting was never configured
    async fn get_config(&self, extension: &str, key: &str) -> Option<String>;

    /// Persist a value on an order product.
    ///
    /// # Arguments
    /// * `field` - field name, e.g. `username`
    /// * `value` - value to store
    /// * `order_product_id` - host id of the order product
    async fn set_order_product_config(&self, field: &str, value: &str, order_product_id: &str);

    /// Surface an error to the administrator.
    async fn report_error(&self, extension: &str, message: &str);
}
