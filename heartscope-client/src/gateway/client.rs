//! HTTP implementation of the prediction service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use heartscope_common::{HealthStatus, PredictionInput, PredictionResult};

use super::classify::{classify, TransportFailure};
use super::PredictionService;
use crate::config::ApiConfig;
use crate::error::Result;

/// Timeout applied to every call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway to the remote prediction service.
///
/// Holds only its fixed configuration. No retries are attempted; every
/// failure is classified and handed back to the caller.
#[derive(Debug, Clone)]
pub struct RequestGateway {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl RequestGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a request with the gateway timeout; non-success statuses become failures.
    async fn send(&self, request: RequestBuilder) -> std::result::Result<Response, TransportFailure> {
        let response = request.timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            // A stalled error body is still a timeout. Otherwise an unreadable
            // or non-JSON body is treated as absent.
            let body = match response.bytes().await {
                Ok(bytes) => serde_json::from_slice::<Value>(&bytes).ok(),
                Err(e) if e.is_timeout() => return Err(TransportFailure::TimedOut),
                Err(_) => None,
            };
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn probe(&self) -> std::result::Result<Value, TransportFailure> {
        let url = format!("{}/", self.base_url);

        tracing::debug!("Sending health probe: {}", url);

        let response = self.send(self.http_client.get(&url)).await?;
        let body = response.bytes().await?;

        Ok(opaque_body(&body))
    }

    async fn try_predict(
        &self,
        input: &PredictionInput,
    ) -> std::result::Result<PredictionResult, TransportFailure> {
        let url = format!("{}/predict", self.base_url);

        tracing::debug!("Sending prediction request: {}", url);

        let response = self.send(self.http_client.post(&url).json(input)).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| TransportFailure::Other {
            message: Some(format!("Invalid prediction response: {}", e)),
        })
    }
}

/// Interpret a success body without assuming its shape.
fn opaque_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[async_trait]
impl PredictionService for RequestGateway {
    async fn health(&self) -> HealthStatus {
        match self.probe().await {
            Ok(data) => HealthStatus::Ok { data },
            Err(failure) => {
                let err = classify(failure);
                tracing::warn!(kind = err.kind(), "Health probe failed: {}", err);
                HealthStatus::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult> {
        self.try_predict(input).await.map_err(|failure| {
            let err = classify(failure);
            tracing::warn!(kind = err.kind(), "Prediction request failed: {}", err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url_normalization() {
        let gateway = RequestGateway::new("http://localhost:8000/");
        assert_eq!(gateway.base_url(), "http://localhost:8000");
        assert_eq!(gateway.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_gateway_from_config() {
        let config = ApiConfig {
            base_url: "https://example.com//".to_string(),
            timeout_secs: 3,
        };
        let gateway = RequestGateway::from_config(&config);
        assert_eq!(gateway.base_url(), "https://example.com");
        assert_eq!(gateway.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_opaque_body() {
        assert_eq!(opaque_body(b""), Value::Null);
        assert_eq!(opaque_body(b"  \n"), Value::Null);
        assert_eq!(
            opaque_body(br#"{"message": "API is running"}"#),
            serde_json::json!({"message": "API is running"})
        );
        assert_eq!(opaque_body(b"OK"), Value::String("OK".to_string()));
    }
}
