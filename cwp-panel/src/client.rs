//! CWP panel client

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PanelError, Result};
use crate::http_client::{HttpUtils, PANEL_NAME};
use crate::types::{PanelCredentials, PanelEnvelope, PanelRequest};
use crate::utils::log_sanitizer::mask_form_fields;

/// Transport settings for [`PanelClient`].
#[derive(Debug, Clone)]
pub struct PanelClientOptions {
    /// Skip TLS certificate and host-name verification. Defaults to `true`.
    pub accept_invalid_certs: bool,
    /// Timeout for establishing the TCP/TLS connection. `None` keeps the
    /// transport default.
    pub connect_timeout: Option<Duration>,
    /// Timeout for the whole request, response body included. `None` keeps
    /// the transport default, which never gives up on a slow panel.
    pub request_timeout: Option<Duration>,
}

impl Default for PanelClientOptions {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// 创建 HTTP Client（超时仅在显式配置时生效）
///
/// Idle connections are not pooled, so every request opens its own connection
/// and releases it once the response has been read.
fn create_http_client(options: &PanelClientOptions) -> Result<Client> {
    let mut builder = Client::builder().pool_max_idle_per_host(0);

    if let Some(timeout) = options.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }

    #[cfg(any(feature = "native-tls", feature = "rustls"))]
    let builder = builder.danger_accept_invalid_certs(options.accept_invalid_certs);
    #[cfg(feature = "native-tls")]
    let builder = builder.danger_accept_invalid_hostnames(options.accept_invalid_certs);

    builder.build().map_err(|e| PanelError::NetworkError {
        detail: format!("Failed to create HTTP client: {e}"),
    })
}

/// Stateless client for the CWP account API.
///
/// Holds no credentials: every call receives the [`PanelCredentials`] the host
/// resolved for that operation.
pub struct PanelClient {
    client: Client,
}

impl PanelClient {
    pub fn new() -> Result<Self> {
        Self::with_options(&PanelClientOptions::default())
    }

    pub fn with_options(options: &PanelClientOptions) -> Result<Self> {
        if !options.accept_invalid_certs {
            log::debug!("[{PANEL_NAME}] TLS certificate verification enabled");
        }
        Ok(Self {
            client: create_http_client(options)?,
        })
    }

    /// Send one form-encoded POST and return the raw response body.
    ///
    /// Only transport failures are errors here; the body is returned as-is for
    /// any completed exchange.
    pub async fn invoke(
        &self,
        credentials: &PanelCredentials,
        request: &PanelRequest,
    ) -> Result<String> {
        let url = credentials.endpoint_url(request.endpoint());
        let form = request.form_fields(&credentials.api_key);
        log::debug!("[{PANEL_NAME}] Request Body: {}", mask_form_fields(&form));

        let builder = self.client.post(&url).form(&form);
        let (_status, body) = HttpUtils::execute_request(builder, "POST", &url).await?;
        Ok(body)
    }

    /// Decode a response body into the panel envelope.
    pub fn decode(body: &str) -> Result<PanelEnvelope> {
        HttpUtils::parse_json(body)
    }

    /// Invoke and require `status == "OK"`.
    ///
    /// Returns the envelope so callers can read the payload.
    pub async fn call(
        &self,
        credentials: &PanelCredentials,
        request: &PanelRequest,
    ) -> Result<PanelEnvelope> {
        let body = self.invoke(credentials, request).await?;
        let envelope = Self::decode(&body)?;

        if !envelope.is_ok() {
            let raw_message = envelope.message();
            log::warn!(
                "[{PANEL_NAME}] {} {} rejected: status={}, msj={raw_message}",
                request.endpoint().path(),
                request.action(),
                envelope.status
            );
            return Err(PanelError::RemoteRejected {
                status: envelope.status,
                raw_message,
                raw_body: body,
            });
        }

        Ok(envelope)
    }

    /// Invoke, require `status == "OK"` and deserialize `msj` into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        credentials: &PanelCredentials,
        request: &PanelRequest,
    ) -> Result<T> {
        let envelope = self.call(credentials, request).await?;
        let payload = envelope.msj.unwrap_or(Value::Null);
        let raw = payload.to_string();

        serde_json::from_value(payload).map_err(|e| {
            log::error!("[{PANEL_NAME}] Unexpected payload shape: {e}");
            PanelError::ParseError {
                detail: e.to_string(),
                raw_body: raw,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_skip_verification() {
        let options = PanelClientOptions::default();
        assert!(options.accept_invalid_certs);
        assert_eq!(options.connect_timeout, None);
        assert_eq!(options.request_timeout, None);
    }

    #[test]
    fn decode_rejects_missing_status() {
        let result = PanelClient::decode(r#"{"msj":"no status here"}"#);
        assert!(
            matches!(&result, Err(PanelError::ParseError { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn decode_accepts_non_ok_envelope() {
        let env = PanelClient::decode(r#"{"status":"Error","msj":"bad"}"#).unwrap();
        assert_eq!(env.status, "Error");
        assert!(!env.is_ok());
    }
}
