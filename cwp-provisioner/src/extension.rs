//! CWP server extension
//!
//! Adapts [`AccountProvisioner`] to the host's [`ServerExtension`] contract:
//! credentials are read from the host on every call, failures go to the
//! host's error sink, and the generated username is persisted on success.

use std::sync::Arc;

use async_trait::async_trait;
use cwp_panel::{PanelClient, PanelCredentials, PanelError};
use url::Url;

use crate::error::{ProvisionError, ProvisionResult};
use crate::services::AccountProvisioner;
use crate::traits::{ExtensionHost, ServerExtension};
use crate::types::{
    AccountIdentity, AccountSpec, ConfigField, ExtensionMetadata, OrderContext, PackageCatalog,
    USERNAME_FIELD,
};

/// Extension name used for configuration lookups and error reports.
pub const EXTENSION_NAME: &str = "CWP";

const CONFIG_HOSTNAME: &str = "hostname";
const CONFIG_API_KEY: &str = "apiKey";

/// CWP implementation of [`ServerExtension`].
pub struct CwpExtension {
    host: Arc<dyn ExtensionHost>,
    provisioner: AccountProvisioner,
}

impl CwpExtension {
    #[must_use]
    pub fn new(host: Arc<dyn ExtensionHost>, client: PanelClient) -> Self {
        Self {
            host,
            provisioner: AccountProvisioner::new(client),
        }
    }

    /// Read `hostname` and `apiKey` from the host.
    pub async fn credentials(&self) -> ProvisionResult<PanelCredentials> {
        let hostname = self.required_config(CONFIG_HOSTNAME).await?;
        let api_key = self.required_config(CONFIG_API_KEY).await?;
        Ok(PanelCredentials::new(&hostname, api_key)?)
    }

    async fn required_config(&self, key: &str) -> ProvisionResult<String> {
        self.host
            .get_config(EXTENSION_NAME, key)
            .await
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ProvisionError::MissingConfig(key.to_string()))
    }

    async fn report(&self, message: &str) {
        log::error!("[{EXTENSION_NAME}] {message}");
        self.host.report_error(EXTENSION_NAME, message).await;
    }

    /// Report an error and turn the outcome into the host's boolean.
    async fn settle(&self, operation: &str, result: ProvisionResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{operation} failed: {e}");
                self.report(&e.diagnostic()).await;
                false
            }
        }
    }

    async fn package_catalog(&self) -> PackageCatalog {
        let result = match self.credentials().await {
            Ok(credentials) => self.provisioner.list_packages(&credentials).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(catalog) => catalog,
            Err(e) => {
                let message = match &e {
                    ProvisionError::Panel(PanelError::RemoteRejected { raw_message, .. }) => {
                        format!("Error occurred: {raw_message}")
                    }
                    ProvisionError::Panel(p) if p.is_transport() => {
                        format!("Failed to get Packages List: {}", p.diagnostic())
                    }
                    other => format!("Failed to get Packages List: {other}"),
                };
                self.report(&message).await;
                PackageCatalog::empty()
            }
        }
    }

    async fn create(&self, order: &OrderContext) -> ProvisionResult<()> {
        let credentials = self.credentials().await?;
        let spec = AccountSpec::merge(order)?;
        let identity = self.provisioner.create_account(&credentials, &spec).await?;

        self.host
            .set_order_product_config(USERNAME_FIELD, &identity.username, &order.order_product_id)
            .await;
        Ok(())
    }

    async fn suspend(&self, order: &OrderContext) -> ProvisionResult<()> {
        let credentials = self.credentials().await?;
        let identity = AccountIdentity::from_order(order)?;
        self.provisioner
            .suspend_account(&credentials, &identity)
            .await
    }

    async fn unsuspend(&self, order: &OrderContext) -> ProvisionResult<()> {
        let credentials = self.credentials().await?;
        let identity = AccountIdentity::from_order(order)?;
        self.provisioner
            .unsuspend_account(&credentials, &identity)
            .await
    }

    async fn link(&self, order: &OrderContext) -> ProvisionResult<Url> {
        let credentials = self.credentials().await?;
        let identity = AccountIdentity::from_order(order)?;
        self.provisioner
            .single_sign_on_link(&credentials, &identity)
            .await
    }
}

/// Product form built around a package catalog.
pub fn product_config_schema(catalog: &PackageCatalog) -> Vec<ConfigField> {
    vec![
        ConfigField::dropdown("package", "Package Name", catalog.package_options())
            .with_description("Create account with package."),
        ConfigField::text("inode", "iNode")
            .with_description("Limit inodes, \"0\" for unlimited \"100\" for Default"),
        ConfigField::text("limit_nproc", "Limit nproc").with_description(
            "Limit number of processes for account, don't use 0 as it will not allow any processes. Default - \"25\"",
        ),
        ConfigField::text("limit_nofile", "Limit No File")
            .with_description("Limit number of open files for account. Default - \"100\""),
        ConfigField::text("server_ips", "IP Server"),
        ConfigField::dropdown("autossl", "Auto SSL", catalog.auto_ssl.clone())
            .with_description("Autossl (0 = Not / 1 = Yes)"),
        ConfigField::dropdown("reseller", "Reseller", catalog.reseller.clone()).with_description(
            "(1 = To resell, Account Reseller for a Resellers Package, 0 for Standard Package)",
        ),
    ]
}

#[async_trait]
impl ServerExtension for CwpExtension {
    fn metadata(&self) -> ExtensionMetadata {
        ExtensionMetadata {
            display_name: EXTENSION_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            author: "Sarthak".to_string(),
            website: "https://stellarhost.tech".to_string(),
        }
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::text(CONFIG_HOSTNAME, "CWP Panel URL"),
            ConfigField::text(CONFIG_API_KEY, "API Key"),
        ]
    }

    fn user_config_fields(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::text("password", "Password"),
            ConfigField::text("domain", "Domain"),
        ]
    }

    async fn product_config(&self) -> Vec<ConfigField> {
        product_config_schema(&self.package_catalog().await)
    }

    async fn create_server(&self, order: &OrderContext) -> bool {
        let result = self.create(order).await;
        self.settle("create", result).await
    }

    async fn suspend_server(&self, order: &OrderContext) -> bool {
        let result = self.suspend(order).await;
        self.settle("suspend", result).await
    }

    async fn unsuspend_server(&self, order: &OrderContext) -> bool {
        let result = self.unsuspend(order).await;
        self.settle("unsuspend", result).await
    }

    /// Always `true`; nothing is reported to the host, see
    /// [`TerminationOutcome`](crate::services::TerminationOutcome).
    async fn terminate_server(&self, order: &OrderContext) -> bool {
        let prepared = match self.credentials().await {
            Ok(credentials) => {
                AccountIdentity::from_order(order).map(|identity| (credentials, identity))
            }
            Err(e) => Err(e),
        };

        match prepared {
            Ok((credentials, identity)) => {
                let outcome = self
                    .provisioner
                    .terminate_account(&credentials, &identity, &order.owner_email)
                    .await;
                outcome.is_success()
            }
            Err(e) => {
                log::warn!("Termination request not sent: {e}");
                true
            }
        }
    }

    async fn get_link(&self, order: &OrderContext) -> Option<Url> {
        match self.link(order).await {
            Ok(url) => Some(url),
            Err(e) => {
                self.report(&format!("Failed to get login link: {e}")).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldType, PackageOption};

    #[test]
    fn schema_with_packages() {
        let catalog = PackageCatalog::new(vec![
            PackageOption {
                name: "default".into(),
                id: "1".into(),
            },
            PackageOption {
                name: "pro".into(),
                id: "2".into(),
            },
        ]);
        let schema = product_config_schema(&catalog);

        let names: Vec<&str> = schema.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "package",
                "inode",
                "limit_nproc",
                "limit_nofile",
                "server_ips",
                "autossl",
                "reseller"
            ]
        );
        assert_eq!(schema[0].field_type, FieldType::Dropdown);
        assert_eq!(schema[0].options.len(), 2);
        assert_eq!(schema[0].options[1].name, "pro");
        assert_eq!(schema[0].options[1].value, "2");
        assert!(schema.iter().all(|f| f.required));
    }

    #[test]
    fn schema_tolerates_empty_catalog() {
        let schema = product_config_schema(&PackageCatalog::empty());
        assert_eq!(schema.len(), 7);
        assert!(schema[0].options.is_empty());
        assert_eq!(schema[5].options.len(), 2);
        assert_eq!(schema[6].options.len(), 2);
    }
}
