//! Account lifecycle on the CWP panel
//!
//! Every operation builds one [`PanelRequest`], sends it through
//! [`PanelClient`] and turns the envelope into a typed result.

use cwp_panel::{
    Action, Endpoint, PanelClient, PanelCredentials, PanelError, PanelPackage, PanelRequest,
    SessionList,
};
use url::Url;

use crate::error::{ProvisionError, ProvisionResult};
use crate::types::{AccountIdentity, AccountSpec, PackageCatalog, PackageOption};

/// Lifetime of an auto-login session, in minutes.
pub const SESSION_TIMER_MINUTES: u32 = 60;

/// Outcome of [`AccountProvisioner::terminate_account`].
///
/// Termination always succeeds. The remote answer is kept for logging and
/// never turns into a failure.
#[derive(Debug)]
pub struct TerminationOutcome {
    remote_error: Option<PanelError>,
}

impl TerminationOutcome {
    /// Always `true`.
    pub fn is_success(&self) -> bool {
        true
    }

    /// What the panel (or the transport) reported, if anything went wrong.
    pub fn remote_error(&self) -> Option<&PanelError> {
        self.remote_error.as_ref()
    }
}

/// Account lifecycle service
pub struct AccountProvisioner {
    client: PanelClient,
}

impl AccountProvisioner {
    /// Create a provisioner on top of a panel client
    #[must_use]
    pub fn new(client: PanelClient) -> Self {
        Self { client }
    }

    // ===== Request builders =====

    pub(crate) fn list_packages_request() -> PanelRequest {
        PanelRequest::new(Endpoint::Packages, Action::List)
    }

    pub(crate) fn create_request(spec: &AccountSpec, identity: &AccountIdentity) -> PanelRequest {
        PanelRequest::new(Endpoint::Account, Action::Add)
            .field("domain", spec.domain.as_str())
            .field("user", identity.panel_user())
            .field("pass", spec.password.as_str())
            .field("email", spec.owner_email.as_str())
            .field("package", spec.package_id.as_str())
            .field("inode", spec.inode.as_str())
            .field("limit_nproc", spec.nproc_limit.as_str())
            .field("limit_nofile", spec.nofile_limit.as_str())
            .field("server_ips", spec.server_ips.as_str())
            .field("autossl", spec.auto_ssl_flag())
            .field_opt("reseller", spec.reseller.as_deref())
    }

    pub(crate) fn suspend_request(identity: &AccountIdentity) -> PanelRequest {
        PanelRequest::new(Endpoint::Account, Action::Suspend).field("user", identity.panel_user())
    }

    pub(crate) fn unsuspend_request(identity: &AccountIdentity) -> PanelRequest {
        PanelRequest::new(Endpoint::Account, Action::Unsuspend)
            .field("user", identity.panel_user())
    }

    pub(crate) fn terminate_request(identity: &AccountIdentity, owner_email: &str) -> PanelRequest {
        PanelRequest::new(Endpoint::Account, Action::Delete)
            .field("user", identity.panel_user())
            .field("email", owner_email)
    }

    pub(crate) fn session_request(identity: &AccountIdentity) -> PanelRequest {
        PanelRequest::new(Endpoint::UserSession, Action::List)
            .field("user", identity.panel_user())
            .field("timer", SESSION_TIMER_MINUTES.to_string())
    }

    // ===== Lifecycle operations =====

    /// Fetch the package catalog for the product configuration form
    pub async fn list_packages(
        &self,
        credentials: &PanelCredentials,
    ) -> ProvisionResult<PackageCatalog> {
        let packages: Vec<PanelPackage> = self
            .client
            .fetch(credentials, &Self::list_packages_request())
            .await?;

        let packages = packages
            .into_iter()
            .map(|p| PackageOption {
                name: p.package_name,
                id: p.id,
            })
            .collect::<Vec<_>>();
        log::debug!("Fetched {} packages", packages.len());

        Ok(PackageCatalog::new(packages))
    }

    /// Create an account under a freshly generated username
    ///
    /// The identity is returned only when the panel answers `"OK"`. Nothing is
    /// rolled back on failure.
    pub async fn create_account(
        &self,
        credentials: &PanelCredentials,
        spec: &AccountSpec,
    ) -> ProvisionResult<AccountIdentity> {
        let identity = AccountIdentity::generate();
        let request = Self::create_request(spec, &identity);

        self.client.call(credentials, &request).await?;

        log::info!(
            "Created account '{}' for domain {}",
            identity.username,
            spec.domain
        );
        Ok(identity)
    }

    /// Suspend an account
    pub async fn suspend_account(
        &self,
        credentials: &PanelCredentials,
        identity: &AccountIdentity,
    ) -> ProvisionResult<()> {
        self.client
            .call(credentials, &Self::suspend_request(identity))
            .await?;
        log::info!("Suspended account '{}'", identity.panel_user());
        Ok(())
    }

    /// Lift a suspension
    pub async fn unsuspend_account(
        &self,
        credentials: &PanelCredentials,
        identity: &AccountIdentity,
    ) -> ProvisionResult<()> {
        self.client
            .call(credentials, &Self::unsuspend_request(identity))
            .await?;
        log::info!("Unsuspended account '{}'", identity.panel_user());
        Ok(())
    }

    /// Delete an account. Never fails, see [`TerminationOutcome`].
    pub async fn terminate_account(
        &self,
        credentials: &PanelCredentials,
        identity: &AccountIdentity,
        owner_email: &str,
    ) -> TerminationOutcome {
        let request = Self::terminate_request(identity, owner_email);

        let remote_error = match self.client.call(credentials, &request).await {
            Ok(_) => {
                log::info!("Terminated account '{}'", identity.panel_user());
                None
            }
            Err(e) => {
                log::warn!(
                    "Termination of '{}' not confirmed by panel, reporting success anyway: {e}",
                    identity.panel_user()
                );
                Some(e)
            }
        };

        TerminationOutcome { remote_error }
    }

    /// Auto-login URL for the account's panel session
    pub async fn single_sign_on_link(
        &self,
        credentials: &PanelCredentials,
        identity: &AccountIdentity,
    ) -> ProvisionResult<Url> {
        let sessions: SessionList = self
            .client
            .fetch(credentials, &Self::session_request(identity))
            .await?;

        let session = sessions.details.into_iter().next().ok_or_else(|| {
            ProvisionError::InvalidLink(format!(
                "panel returned no session for '{}'",
                identity.panel_user()
            ))
        })?;

        Url::parse(&session.url)
            .map_err(|e| ProvisionError::InvalidLink(format!("{}: {e}", session.url)))
    }
}
