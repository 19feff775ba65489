//! Generic HTTP client tools
//!
//! Sending a request, logging it and reading the response body is the same
//! for every panel endpoint; this module keeps that flow in one place.
//!
//! # design principles
//! - **Completed exchanges are not errors** - any HTTP status returns the body,
//!   the panel envelope decides success
//! - **Transport failures are classified** - timeouts and other network errors
//!   map to distinct [`PanelError`] variants
//! - **No retries** - every failure goes straight back to the caller

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::PanelError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Identifier used as the log prefix.
pub(crate) const PANEL_NAME: &str = "cwp";

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, body, etc.)
    /// * `method_name` - request method name (used for logs)
    /// * `url_or_action` - URL or action description (used for logs)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - the exchange completed
    /// * `Err(PanelError::Timeout)` / `Err(PanelError::NetworkError)` - transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), PanelError> {
        log::debug!("[{PANEL_NAME}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PanelError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                PanelError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{PANEL_NAME}] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                PanelError::Timeout {
                    detail: format!("Failed to read response body: {e}"),
                }
            } else {
                PanelError::NetworkError {
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[{PANEL_NAME}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(PanelError::ParseError)` - parsing failed, the raw body is kept
    pub fn parse_json<T>(response_text: &str) -> Result<T, PanelError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{PANEL_NAME}] JSON parse failed: {e}");
            log::error!(
                "[{PANEL_NAME}] Raw response: {}",
                truncate_for_log(response_text)
            );
            PanelError::ParseError {
                detail: e.to_string(),
                raw_body: response_text.to_string(),
            }
        })
    }
}
