//! HTTP client for communicating with the test case generator backend

use super::traits::ApiClientTrait;
use super::types::{
    ExamplesResponse, ExportRequest, GenerateRequest, GenerateResponse, ProviderList,
    ProviderTestOutcome, ProviderTestResponse, XLSX_CONTENT_TYPE,
};
use crate::error::ApiError;
use crate::state::{Example, FormInput, GenerationResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

/// Client for the generator's `/api` endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read a JSON body, mapping non-2xx and unparsable bodies to typed errors
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %text, "backend returned an error status");
            return Err(ApiError::http(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, body = %text, "failed to parse backend response");
            ApiError::parse(&text)
        })
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn list_providers(&self) -> Result<ProviderList, ApiError> {
        let response = self.http.get(self.url("/api/providers")).send().await?;
        Self::read_json(response).await
    }

    async fn test_provider(&self) -> Result<ProviderTestOutcome, ApiError> {
        let response = self.http.get(self.url("/api/test")).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Failed checks come back as 500 with a JSON explanation
        match serde_json::from_str::<ProviderTestResponse>(&text) {
            Ok(body) => Ok(body.into()),
            Err(_) if !status.is_success() => Err(ApiError::http(status.as_u16(), &text)),
            Err(_) => Err(ApiError::parse(&text)),
        }
    }

    async fn generate(&self, input: &FormInput) -> Result<GenerationResult, ApiError> {
        debug!(
            story_id = %input.story_id,
            provider = ?input.ai_provider,
            story_len = input.user_story.len(),
            "sending generate request"
        );

        let response = self
            .http
            .post(self.url("/api/generate"))
            .json(&GenerateRequest::from(input))
            .send()
            .await?;

        debug!(status = response.status().as_u16(), "generate response received");
        let body: GenerateResponse = Self::read_json(response).await?;
        body.into_result()
    }

    async fn export(&self, result: &GenerationResult) -> Result<Vec<u8>, ApiError> {
        debug!(story_id = %result.story_id, "sending export request");

        let response = self
            .http
            .post(self.url("/api/export"))
            .json(&ExportRequest::from(result))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            error!(status = status.as_u16(), body = %body, "export failed");
            return Err(ApiError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match content_type {
            Some(ref ct) if ct.contains(XLSX_CONTENT_TYPE) => {
                let bytes = response.bytes().await?;
                info!(story_id = %result.story_id, size = bytes.len(), "spreadsheet received");
                Ok(bytes.to_vec())
            }
            _ => {
                let body = response.text().await?;
                error!(content_type = ?content_type, body = %body, "unexpected export response type");
                Err(ApiError::UnexpectedContentType { content_type, body })
            }
        }
    }

    async fn list_examples(&self) -> Result<Vec<Example>, ApiError> {
        let response = self.http.get(self.url("/api/examples")).send().await?;
        let body: ExamplesResponse = Self::read_json(response).await?;
        debug!(count = body.examples.len(), "examples loaded");
        Ok(body.examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{header, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral port and return a client pointed at it
    async fn serve(router: Router) -> ApiClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        ApiClient::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap()
    }

    fn input(story: &str) -> FormInput {
        FormInput {
            user_story: story.to_string(),
            acceptance_criteria: "Given X".to_string(),
            story_id: "ABC-1".to_string(),
            story_title: "Login".to_string(),
            ai_provider: Some("gemini".to_string()),
        }
    }

    fn result() -> GenerationResult {
        GenerationResult {
            story_id: "ABC-1".to_string(),
            story_title: "Login".to_string(),
            test_cases: "| Test Case ID |\n| --- |\n| ABC-1001 |".to_string(),
            timestamp: "2024-05-01T12:00:00".to_string(),
            parsed_cases: Vec::new(),
            note: None,
        }
    }

    #[tokio::test]
    async fn test_list_providers() {
        let client = serve(Router::new().route(
            "/api/providers",
            get(|| async {
                Json(json!({"providers": ["openai", "gemini"], "current": "gemini"}))
            }),
        ))
        .await;

        let list = client.list_providers().await.unwrap();
        assert_eq!(list.providers, vec!["openai", "gemini"]);
        assert_eq!(list.current.as_deref(), Some("gemini"));
    }

    #[tokio::test]
    async fn test_generate_sends_form_fields() {
        let client = serve(Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "success": true,
                    "story_id": body["story_id"],
                    "story_title": body["story_title"],
                    "test_cases": format!("cases for {}", body["user_story"].as_str().unwrap_or("")),
                    "parsed_cases": [],
                    "timestamp": "2024-05-01T12:00:00.123456"
                }))
            }),
        ))
        .await;

        let result = client.generate(&input("As a user")).await.unwrap();
        assert_eq!(result.story_id, "ABC-1");
        assert_eq!(result.story_title, "Login");
        assert_eq!(result.test_cases, "cases for As a user");
    }

    #[tokio::test]
    async fn test_generate_http_error_carries_status_and_body() {
        let client = serve(Router::new().route(
            "/api/generate",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "User story is required"})),
                )
            }),
        ))
        .await;

        let err = client.generate(&input("x")).await.unwrap_err();
        match err {
            ApiError::Http { status, ref body } => {
                assert_eq!(status, 400);
                assert!(body.contains("User story is required"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_unparsable_body_is_parse_error() {
        let long_html = format!("<html>{}</html>", "z".repeat(500));
        let client = serve(Router::new().route(
            "/api/generate",
            post(move || {
                let body = long_html.clone();
                async move { body }
            }),
        ))
        .await;

        let err = client.generate(&input("x")).await.unwrap_err();
        match err {
            ApiError::Parse { ref snippet } => assert_eq!(snippet.chars().count(), 200),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_domain_error() {
        let client = serve(Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({"success": false, "error": "model overloaded"})) }),
        ))
        .await;

        let err = client.generate(&input("x")).await.unwrap_err();
        assert!(matches!(err, ApiError::Domain(ref m) if m == "model overloaded"));
    }

    #[tokio::test]
    async fn test_export_returns_spreadsheet_bytes() {
        let client = serve(Router::new().route(
            "/api/export",
            post(|| async {
                (
                    [(header::CONTENT_TYPE, XLSX_CONTENT_TYPE)],
                    vec![0x50u8, 0x4b, 0x03, 0x04],
                )
                    .into_response()
            }),
        ))
        .await;

        let bytes = client.export(&result()).await.unwrap();
        assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[tokio::test]
    async fn test_export_json_payload_is_unexpected() {
        let client = serve(Router::new().route(
            "/api/export",
            post(|| async { Json(json!({"error": "nope"})) }),
        ))
        .await;

        let err = client.export(&result()).await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedContentType { .. }));
    }

    #[tokio::test]
    async fn test_export_error_status() {
        let client = serve(Router::new().route(
            "/api/export",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "disk full"})),
                )
            }),
        ))
        .await;

        let err = client.export(&result()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status(500)));
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[tokio::test]
    async fn test_provider_failure_reported_from_500_body() {
        let client = serve(Router::new().route(
            "/api/test",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Provider test failed: invalid key",
                        "provider": "gemini"
                    })),
                )
            }),
        ))
        .await;

        let outcome = client.test_provider().await.unwrap();
        assert_eq!(
            outcome,
            ProviderTestOutcome::Failed {
                error: "Provider test failed: invalid key".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_list_examples() {
        let client = serve(Router::new().route(
            "/api/examples",
            get(|| async {
                Json(json!({"examples": [
                    {"id": "US001", "title": "Password Reset", "story": "User Story: a\nAcceptance Criteria:\n1. b"}
                ]}))
            }),
        ))
        .await;

        let examples = client.list_examples().await.unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].title, "Password Reset");
    }

    #[tokio::test]
    async fn test_network_failure() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = client.list_providers().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
