use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{PanelError, Result};

/// The literal `status` value the panel uses to signal success.
pub const STATUS_OK: &str = "OK";

// ============ Credentials ============

/// Connection settings for one CWP panel.
///
/// Supplied by the host for every operation; nothing in this crate keeps a copy
/// beyond the call it was passed to.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelCredentials {
    /// Base URL of the panel API, e.g. `https://panel.example.com:2304`.
    pub hostname: Url,
    /// API key created in the panel's API manager.
    pub api_key: String,
}

impl PanelCredentials {
    /// Parse the hostname and pair it with the API key.
    pub fn new(hostname: &str, api_key: impl Into<String>) -> Result<Self> {
        let hostname = Url::parse(hostname.trim()).map_err(|e| PanelError::InvalidParameter {
            param: "hostname".to_string(),
            detail: e.to_string(),
        })?;
        Ok(Self {
            hostname,
            api_key: api_key.into(),
        })
    }

    /// Full URL of an endpoint on this panel.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.hostname.as_str().trim_end_matches('/'),
            endpoint.path()
        )
    }
}

// API key stays out of debug output.
impl std::fmt::Debug for PanelCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelCredentials")
            .field("hostname", &self.hostname.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

// ============ Request ============

/// Panel endpoints used by the account lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Package catalog.
    Packages,
    /// Account management (add/suspend/unsuspend/delete).
    Account,
    /// Auto-login sessions.
    UserSession,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Packages => "/v1/packages",
            Self::Account => "/v1/account",
            Self::UserSession => "/v1/user_session",
        }
    }
}

/// Value of the `action` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Add,
    Suspend,
    Unsuspend,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add => "add",
            Self::Suspend => "susp",
            Self::Unsuspend => "unsp",
            Self::Delete => "del",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single panel call: endpoint, action and the action-specific fields.
///
/// `key` and `action` are added by [`PanelRequest::form_fields`] so the
/// request itself never carries the API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRequest {
    endpoint: Endpoint,
    action: Action,
    fields: Vec<(&'static str, String)>,
}

impl PanelRequest {
    pub fn new(endpoint: Endpoint, action: Action) -> Self {
        Self {
            endpoint,
            action,
            fields: Vec::new(),
        }
    }

    /// Append a form field.
    #[must_use]
    pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Append a form field only when `value` is `Some`.
    #[must_use]
    pub fn field_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.field(name, v),
            None => self,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Action-specific fields, in insertion order.
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Value of an action-specific field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Complete form body: `key`, `action`, then the action-specific fields.
    pub fn form_fields<'a>(&'a self, api_key: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut form = Vec::with_capacity(self.fields.len() + 2);
        form.push(("key", api_key));
        form.push(("action", self.action.as_str()));
        form.extend(self.fields.iter().map(|(k, v)| (*k, v.as_str())));
        form
    }
}

// ============ Response ============

/// The envelope every panel endpoint answers with.
///
/// `msj` carries the payload on success and a human-readable message on
/// failure, so it is kept untyped until the status has been checked.
#[derive(Debug, Deserialize)]
pub struct PanelEnvelope {
    pub status: String,
    #[serde(default)]
    pub msj: Option<Value>,
}

impl PanelEnvelope {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Human-readable message carried in `msj`.
    pub fn message(&self) -> String {
        match &self.msj {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Package record returned by `/v1/packages` with `action=list`.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelPackage {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub package_name: String,
}

/// Payload of `/v1/user_session` with `action=list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub details: Vec<SessionDetail>,
}

/// One auto-login session.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDetail {
    pub url: String,
}

/// The panel returns numeric ids on some versions and string ids on others.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
