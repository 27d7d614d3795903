//! Thin HTTP gateway to the advisory API
//!
//! Owns nothing beyond a `reqwest::Client` and the base URL, resolved once at
//! startup. No retries, caching or rate limiting; those belong to callers.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{
    ActivityLogEntry, ClientConfig, FeedbackEvent, MisinformationScanRequest,
    MisinformationScanResult, SymptomCheckRequest, SymptomCheckResult, SymptomPatternCluster,
};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the body's `detail` field when present
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Client for the advisory API
pub struct ApiGateway {
    client: Client,
    base_url: String,
}

impl ApiGateway {
    /// Build a gateway from the resolved configuration
    ///
    /// An unset `request_timeout` leaves requests without a deadline; a call
    /// that never resolves keeps its controller pending indefinitely.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder().user_agent("medlens-client/0.1");
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base.clone(),
        })
    }

    /// Issue one request against a path relative to the base URL
    pub async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "Sending advisory API request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = remote_error_message(status, &body);
            tracing::warn!(status = status.as_u16(), message = %message, url = %url, "Advisory API error");
            return Err(GatewayError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Parse(format!("Failed to deserialize response: {}", e)))
    }

    /// POST `/symptom-check?prefer_model={bool}`
    pub async fn symptom_check(
        &self,
        request: &SymptomCheckRequest,
        prefer_model: bool,
    ) -> Result<SymptomCheckResult, GatewayError> {
        let path = format!("/symptom-check?prefer_model={}", prefer_model);
        self.send(Method::POST, &path, Some(request)).await
    }

    /// POST `/misinformation-scan`
    pub async fn misinformation_scan(
        &self,
        request: &MisinformationScanRequest,
    ) -> Result<MisinformationScanResult, GatewayError> {
        self.send(Method::POST, "/misinformation-scan", Some(request))
            .await
    }

    /// GET `/symptom-patterns?n_clusters={int}&limit={int}`
    pub async fn symptom_patterns(
        &self,
        n_clusters: u32,
        limit: u32,
    ) -> Result<Vec<SymptomPatternCluster>, GatewayError> {
        let path = format!("/symptom-patterns?n_clusters={}&limit={}", n_clusters, limit);
        self.send::<(), _>(Method::GET, &path, None).await
    }

    /// GET `/logs?limit={int}`
    pub async fn recent_logs(&self, limit: u32) -> Result<Vec<ActivityLogEntry>, GatewayError> {
        let path = format!("/logs?limit={}", limit);
        self.send::<(), _>(Method::GET, &path, None).await
    }

    /// POST `/feedback`; the acknowledgement body is not interpreted
    pub async fn send_feedback(&self, event: &FeedbackEvent) -> Result<(), GatewayError> {
        let _: serde_json::Value = self.send(Method::POST, "/feedback", Some(event)).await?;
        Ok(())
    }
}

/// Extract the user-facing message from an error response body
///
/// Prefers the JSON `detail` field, then the raw body, then the canonical
/// reason for the status code.
fn remote_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_detail_field_is_extracted() {
        let message = remote_error_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "text required"}"#,
        );
        assert_eq!(message, "text required");
    }

    #[test]
    fn test_non_json_body_falls_back_to_raw_text() {
        let message = remote_error_message(StatusCode::BAD_GATEWAY, "upstream offline");
        assert_eq!(message, "upstream offline");
    }

    #[test]
    fn test_empty_body_falls_back_to_status_text() {
        let message = remote_error_message(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(message, "Service Unavailable");
    }

    #[test]
    fn test_json_without_detail_keeps_raw_body() {
        let message =
            remote_error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "oops"}"#);
        assert_eq!(message, r#"{"error": "oops"}"#);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_symptom_check_against_local_backend() {
        let gateway = ApiGateway::new(&ClientConfig::default()).unwrap();
        let request = SymptomCheckRequest {
            text: "I have fever and cough for 2 days".to_string(),
            age: Some(30),
            sex: None,
        };
        let result = gateway.symptom_check(&request, true).await;
        assert!(result.is_ok());
    }
}
