//! 账户相关类型定义

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProvisionError, ProvisionResult};
use crate::utils::username::generate_username;

/// Reseller value meaning "standard package, no reseller flag".
pub const STANDARD_PACKAGE_SENTINEL: &str = "0";

/// Order-product data the host hands over for every lifecycle call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderContext {
    /// Host id of the order product, used when persisting the username
    pub order_product_id: String,
    /// Email of the user owning the order
    pub owner_email: String,
    /// Product parameters configured by the administrator
    #[serde(default)]
    pub params: HashMap<String, String>,
    /// Values the customer entered at checkout (`domain`, `password`) plus
    /// values persisted by earlier calls (`username`)
    #[serde(default)]
    pub user_config: HashMap<String, String>,
    /// Configurable options picked for this order
    #[serde(default)]
    pub configurable_options: HashMap<String, String>,
}

impl OrderContext {
    /// Configurable option first, product parameter second. Blank values count as absent.
    fn product_value(&self, key: &str) -> Option<&str> {
        non_blank(self.configurable_options.get(key))
            .or_else(|| non_blank(self.params.get(key)))
    }

    fn user_value(&self, key: &str) -> Option<&str> {
        non_blank(self.user_config.get(key))
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Everything the panel needs to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSpec {
    pub domain: String,
    pub password: String,
    pub package_id: String,
    /// Inode limit, `"0"` for unlimited
    pub inode: String,
    pub nproc_limit: String,
    pub nofile_limit: String,
    pub server_ips: String,
    pub auto_ssl: bool,
    /// `None` for a standard package
    pub reseller: Option<String>,
    pub owner_email: String,
}

impl AccountSpec {
    /// Build an `AccountSpec` from order data.
    ///
    /// Package and resource values come from the configurable options when
    /// present, otherwise from the product parameters. `domain` and `password`
    /// come from the customer's checkout input.
    pub fn merge(order: &OrderContext) -> ProvisionResult<Self> {
        let required_product = |key: &str| {
            order
                .product_value(key)
                .map(str::to_string)
                .ok_or_else(|| ProvisionError::validation(key, "is required"))
        };
        let required_user = |key: &str| {
            order
                .user_value(key)
                .map(str::to_string)
                .ok_or_else(|| ProvisionError::validation(key, "is required"))
        };

        Ok(Self {
            domain: required_user("domain")?,
            password: order
                .user_config
                .get("password")
                .filter(|p| !p.is_empty())
                .cloned()
                .ok_or_else(|| ProvisionError::validation("password", "is required"))?,
            package_id: required_product("package")?,
            inode: required_product("inode")?,
            nproc_limit: required_product("limit_nproc")?,
            nofile_limit: required_product("limit_nofile")?,
            server_ips: required_product("server_ips")?,
            auto_ssl: parse_flag("autossl", order.product_value("autossl"))?,
            reseller: parse_reseller(order.product_value("reseller")),
            owner_email: order.owner_email.clone(),
        })
    }

    /// Wire value of `autossl`.
    pub fn auto_ssl_flag(&self) -> &'static str {
        if self.auto_ssl {
            "1"
        } else {
            "0"
        }
    }
}

fn parse_flag(field: &str, value: Option<&str>) -> ProvisionResult<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("0" | "false" | "no") => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some(other) => Err(ProvisionError::validation(
            field,
            format!("expected 1/0, got '{other}'"),
        )),
    }
}

fn parse_reseller(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| *v != STANDARD_PACKAGE_SENTINEL)
        .map(str::to_string)
}

/// The only durable state a provisioned account has: its panel username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub username: String,
}

/// Field name the username is persisted under on the order product.
pub const USERNAME_FIELD: &str = "username";

impl AccountIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Fresh random identity in canonical (lower-case) form.
    pub fn generate() -> Self {
        Self::new(generate_username().to_lowercase())
    }

    /// Identity persisted on the order product by an earlier `create`.
    pub fn from_order(order: &OrderContext) -> ProvisionResult<Self> {
        order
            .user_value(USERNAME_FIELD)
            .map(Self::new)
            .ok_or_else(|| ProvisionError::validation(USERNAME_FIELD, "no username stored for this order"))
    }

    /// Value sent in the `user` field. The panel is case-sensitive; lower-case is canonical.
    pub fn panel_user(&self) -> String {
        self.username.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> OrderContext {
        OrderContext {
            order_product_id: "17".into(),
            owner_email: "owner@example.com".into(),
            params: HashMap::from([
                ("package".to_string(), "1".to_string()),
                ("inode".to_string(), "100".to_string()),
                ("limit_nproc".to_string(), "25".to_string()),
                ("limit_nofile".to_string(), "100".to_string()),
                ("server_ips".to_string(), "192.0.2.10".to_string()),
                ("autossl".to_string(), "1".to_string()),
                ("reseller".to_string(), "0".to_string()),
            ]),
            user_config: HashMap::from([
                ("domain".to_string(), "example.com".to_string()),
                ("password".to_string(), "s3cret pass".to_string()),
            ]),
            configurable_options: HashMap::new(),
        }
    }

    #[test]
    fn merge_from_product_params() {
        let spec = AccountSpec::merge(&order()).unwrap();
        assert_eq!(spec.domain, "example.com");
        assert_eq!(spec.password, "s3cret pass");
        assert_eq!(spec.package_id, "1");
        assert_eq!(spec.inode, "100");
        assert_eq!(spec.nproc_limit, "25");
        assert_eq!(spec.nofile_limit, "100");
        assert_eq!(spec.server_ips, "192.0.2.10");
        assert!(spec.auto_ssl);
        assert_eq!(spec.reseller, None);
        assert_eq!(spec.owner_email, "owner@example.com");
    }

    #[test]
    fn configurable_options_take_precedence() {
        let mut order = order();
        order
            .configurable_options
            .insert("package".into(), "42".into());
        order
            .configurable_options
            .insert("reseller".into(), "1".into());
        order
            .configurable_options
            .insert("autossl".into(), "0".into());

        let spec = AccountSpec::merge(&order).unwrap();
        assert_eq!(spec.package_id, "42");
        assert_eq!(spec.reseller.as_deref(), Some("1"));
        assert!(!spec.auto_ssl);
    }

    #[test]
    fn blank_configurable_option_falls_back_to_param() {
        let mut order = order();
        order.configurable_options.insert("inode".into(), "  ".into());

        let spec = AccountSpec::merge(&order).unwrap();
        assert_eq!(spec.inode, "100");
    }

    #[test]
    fn missing_required_field_rejected() {
        let mut order = order();
        order.params.remove("server_ips");

        let err = AccountSpec::merge(&order).unwrap_err();
        assert!(
            matches!(&err, ProvisionError::Validation { field, .. } if field == "server_ips"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn missing_domain_rejected() {
        let mut order = order();
        order.user_config.remove("domain");

        let err = AccountSpec::merge(&order).unwrap_err();
        assert!(
            matches!(&err, ProvisionError::Validation { field, .. } if field == "domain"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn invalid_autossl_rejected() {
        let mut order = order();
        order.params.insert("autossl".into(), "maybe".into());

        assert!(AccountSpec::merge(&order).is_err());
    }

    #[test]
    fn reseller_sentinel_and_blank_mean_standard_package() {
        assert_eq!(parse_reseller(Some("0")), None);
        assert_eq!(parse_reseller(None), None);
        assert_eq!(parse_reseller(Some("1")), Some("1".to_string()));
        assert_eq!(parse_reseller(Some("yes")), Some("yes".to_string()));
    }

    #[test]
    fn identity_from_order() {
        let mut order = order();
        assert!(AccountIdentity::from_order(&order).is_err());

        order
            .user_config
            .insert(USERNAME_FIELD.into(), "AbCdEf".into());
        let identity = AccountIdentity::from_order(&order).unwrap();
        assert_eq!(identity.username, "AbCdEf");
        assert_eq!(identity.panel_user(), "abcdef");
    }

    #[test]
    fn generated_identity_is_canonical() {
        let identity = AccountIdentity::generate();
        assert_eq!(identity.username, identity.panel_user());
        assert!(!identity.username.is_empty());
    }
}
