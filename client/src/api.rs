//! HTTP client for the verification backend.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::{DemoResponse, VerificationRequest, VerificationResponse};
use crate::{Config, Error, Result};

/// Operations the verification backend exposes.
#[async_trait]
pub trait VerifierApi: Send + Sync {
    /// Submit an explanation and receive the critique.
    async fn verify(&self, request: &VerificationRequest) -> Result<VerificationResponse>;

    /// Fetch a sample explanation.
    async fn random_demo(&self) -> Result<DemoResponse>;
}

/// `VerifierApi` over HTTP.
#[derive(Clone)]
pub struct HttpVerifierApi {
    http_client: reqwest::Client,
    verify_url: String,
    demo_url: String,
}

impl HttpVerifierApi {
    /// Create a client for the configured backend.
    pub fn new(config: &Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create with an existing `reqwest::Client`.
    pub fn with_client(http_client: reqwest::Client, config: &Config) -> Self {
        Self {
            http_client,
            verify_url: config.endpoint("verify"),
            demo_url: config.endpoint("random-demo"),
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %response.url(), "Backend returned error status");
            return Err(Error::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl VerifierApi for HttpVerifierApi {
    async fn verify(&self, request: &VerificationRequest) -> Result<VerificationResponse> {
        debug!(url = %self.verify_url, domain = %request.domain, "POST verify");

        let response = self
            .http_client
            .post(&self.verify_url)
            .json(request)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        VerificationResponse::from_slice(&body)
    }

    async fn random_demo(&self) -> Result<DemoResponse> {
        debug!(url = %self.demo_url, "GET random-demo");

        let response = self.http_client.get(&self.demo_url).send().await?;
        let body = Self::read_body(response).await?;

        serde_json::from_slice(&body).map_err(|e| Error::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> Config {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Config::new(&format!("http://{}/api", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_verify_posts_request_body() {
        let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
        let sink = seen.clone();
        let router = Router::new().route(
            "/api/verify",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    Json(fixtures::plants_response())
                }
            }),
        );
        let api = HttpVerifierApi::new(&serve(router).await);

        let response = api
            .verify(&VerificationRequest::new("Plants need water.", "general"))
            .await
            .unwrap();

        assert_eq!(response.summary, "Weak evidentiary support");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], json!({"explanation": "Plants need water.", "domain": "general"}));
    }

    #[tokio::test]
    async fn test_verify_non_success_status() {
        let router = Router::new().route(
            "/api/verify",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"}))) }),
        );
        let api = HttpVerifierApi::new(&serve(router).await);

        let err = api
            .verify(&VerificationRequest::new("x", "general"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status(500)));
    }

    #[tokio::test]
    async fn test_verify_malformed_body() {
        let router = Router::new().route(
            "/api/verify",
            post(|| async { Json(json!({"overall_status": "valid"})) }),
        );
        let api = HttpVerifierApi::new(&serve(router).await);

        let err = api
            .verify(&VerificationRequest::new("x", "general"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_random_demo() {
        let router = Router::new().route(
            "/api/random-demo",
            get(|| async {
                Json(json!({
                    "success": true,
                    "demo": {"title": "Irrigation", "explanation": "Water at dawn."}
                }))
            }),
        );
        let api = HttpVerifierApi::new(&serve(router).await);

        let demo = api.random_demo().await.unwrap();
        assert!(demo.success);
        assert_eq!(demo.demo.unwrap().explanation, "Water at dawn.");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpVerifierApi::new(&Config::new(&format!("http://{}", addr)).unwrap());

        let err = api.random_demo().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
