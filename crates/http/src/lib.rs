//! # coachdesk-http
//!
//! Client for the spreadsheet's scripting endpoint.
//!
//! Every call is a single URL with an `action` query parameter. Reads are
//! GETs; saves are POSTs whose plain-text body is the JSON payload with the
//! action repeated inside it.

use async_trait::async_trait;
use coachdesk_core::{ClassDirectory, DeskError, DeskResult, GridSource, SavePayload, WriteSink};
use coachdesk_sheet::Sheet;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ACTION_METADATA: &str = "getMetadata";
const ACTION_CLASS_DATA: &str = "getClassData";
const ACTION_SAVE: &str = "saveClassData";

/// Response envelope shared by all actions.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<JsonValue>,
    #[serde(default, rename = "rawData")]
    raw_data: Option<JsonValue>,
    #[serde(default)]
    sheets: Option<Vec<String>>,
}

impl Envelope {
    /// Turn an in-band error report into `DeskError::Remote`.
    fn into_result(self) -> DeskResult<Self> {
        // An empty or `false` error field reports nothing.
        match &self.error {
            Some(JsonValue::Null | JsonValue::Bool(false)) | None => {}
            Some(JsonValue::String(message)) if message.is_empty() => {}
            Some(JsonValue::String(message)) => return Err(DeskError::Remote(message.clone())),
            Some(other) => return Err(DeskError::Remote(other.to_string())),
        }
        if self.status.as_deref() == Some("error") {
            return Err(DeskError::Remote("request failed".to_string()));
        }
        Ok(self)
    }
}

#[derive(Serialize)]
struct ActionBody<'a, T: Serialize> {
    action: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

/// Client for one deployed scripting endpoint.
pub struct ScriptClient {
    client: Client,
    endpoint: String,
}

impl ScriptClient {
    /// Create a client for `endpoint` with the default 30-second timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use coachdesk_http::ScriptClient;
    /// let client = ScriptClient::new("https://script.example.com/exec").unwrap();
    /// assert_eq!(client.endpoint(), "https://script.example.com/exec");
    /// ```
    pub fn new(endpoint: impl Into<String>) -> DeskResult<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout_secs: u64) -> DeskResult<Self> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| DeskError::Config(format!("invalid API URL '{endpoint}': {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| DeskError::Http(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self, action: &str, params: &[(&str, &str)]) -> DeskResult<Envelope> {
        tracing::info!(action, "endpoint GET");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", action)])
            .query(params)
            .send()
            .await
            .map_err(|e| DeskError::Http(e.to_string()))?;

        Self::read_envelope(action, response).await
    }

    async fn post<T: Serialize + Sync>(&self, action: &str, body: &T) -> DeskResult<Envelope> {
        let body = serde_json::to_string(&ActionBody { action, body })?;
        tracing::info!(action, "endpoint POST");
        tracing::debug!(action, %body, "request body");

        // The endpoint only reads plain-text POST bodies reliably.
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("action", action)])
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| DeskError::Http(e.to_string()))?;

        Self::read_envelope(action, response).await
    }

    async fn read_envelope(action: &str, response: Response) -> DeskResult<Envelope> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(action, %status, "endpoint returned an error status");
            return Err(DeskError::Http(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| DeskError::Http(format!("Failed to parse JSON: {e}")))?;

        envelope.into_result().inspect_err(|e| {
            tracing::warn!(action, error = %e, "endpoint reported an error");
        })
    }

    /// All tab names of the workbook.
    pub async fn fetch_sheet_names(&self) -> DeskResult<Vec<String>> {
        self.get(ACTION_METADATA, &[])
            .await?
            .sheets
            .ok_or_else(|| DeskError::Remote("response has no sheets".to_string()))
    }

    /// The used range of one class tab.
    pub async fn fetch_class_grid(&self, class_name: &str) -> DeskResult<Sheet> {
        let envelope = self
            .get(ACTION_CLASS_DATA, &[("className", class_name)])
            .await?;
        let raw = envelope
            .raw_data
            .ok_or_else(|| DeskError::Remote("response has no rawData".to_string()))?;

        let mut sheet = Sheet::from_json_rows(&raw)?;
        sheet.set_name(class_name);
        Ok(sheet)
    }

    /// Submit a session save.
    pub async fn save_class_data(&self, payload: &SavePayload) -> DeskResult<()> {
        self.post(ACTION_SAVE, payload).await.map(|_| ())
    }
}

#[async_trait]
impl GridSource for ScriptClient {
    async fn fetch_grid(&self, class_name: &str) -> DeskResult<Sheet> {
        self.fetch_class_grid(class_name).await
    }
}

#[async_trait]
impl WriteSink for ScriptClient {
    async fn write(&self, payload: &SavePayload) -> DeskResult<()> {
        self.save_class_data(payload).await
    }
}

#[async_trait]
impl ClassDirectory for ScriptClient {
    async fn sheet_names(&self) -> DeskResult<Vec<String>> {
        self.fetch_sheet_names().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_url() {
        assert!(matches!(
            ScriptClient::new("not a url"),
            Err(DeskError::Config(_))
        ));
    }

    #[test]
    fn test_client_with_timeout() {
        let client = ScriptClient::with_timeout("http://localhost:9/exec", 5);
        assert!(client.is_ok());
    }

    #[test]
    fn test_envelope_error_string() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"error": "Sheet not found: X"}"#).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(DeskError::Remote(msg)) if msg == "Sheet not found: X"
        ));
    }

    #[test]
    fn test_envelope_error_status_without_message() {
        let envelope: Envelope = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn test_envelope_null_error_is_ok() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"status": "success", "error": null}"#).unwrap();
        assert!(envelope.into_result().is_ok());
    }

    #[test]
    fn test_envelope_empty_error_is_ok() {
        for body in [r#"{"error": ""}"#, r#"{"error": false}"#] {
            let envelope: Envelope = serde_json::from_str(body).unwrap();
            assert!(envelope.into_result().is_ok(), "{body}");
        }
    }

    #[test]
    fn test_action_body_flattens_payload() {
        let payload = SavePayload {
            class_name: "Monday A".to_string(),
            date: "5/1/2024".to_string(),
            row_start: 2,
            data: Default::default(),
        };
        let json = serde_json::to_value(ActionBody {
            action: ACTION_SAVE,
            body: &payload,
        })
        .unwrap();
        assert_eq!(json["action"], "saveClassData");
        assert_eq!(json["className"], "Monday A");
        assert_eq!(json["rowStart"], 2);
    }
}
