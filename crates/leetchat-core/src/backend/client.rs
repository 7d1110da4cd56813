//! HTTP client for the problem/todo API

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

use crate::config::BackendSettings;
use crate::types::CredentialContext;

use super::error::{BackendError, BackendResult};

/// Fixed service identity header
pub const SERVICE_TOKEN_HEADER: &str = "x-service-token";
/// CSRF header forwarded from the caller
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Longest error body echoed into a failure message
const MAX_ERROR_BODY: usize = 200;

/// Client for the downstream API.
///
/// Every method issues exactly one HTTP request and never retries.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    service_token: Option<String>,
}

impl BackendClient {
    /// Create a client from settings
    pub fn new(settings: &BackendSettings) -> BackendResult<Self> {
        let http = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self::with_http(http, settings))
    }

    /// Create a client around an existing reqwest client
    pub fn with_http(http: Client, settings: &BackendSettings) -> Self {
        Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            service_token: settings.service_token.clone(),
        }
    }

    /// Create a client for `base_url` with a request timeout and no service token
    pub fn for_base_url(base_url: impl Into<String>, timeout: Duration) -> BackendResult<Self> {
        let settings = BackendSettings {
            base_url: base_url.into(),
            service_token: None,
            timeout_secs: timeout.as_secs().max(1),
        };
        Self::new(&settings)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authenticated(&self, request: RequestBuilder, credentials: &CredentialContext) -> RequestBuilder {
        let request = request
            .header(reqwest::header::AUTHORIZATION, credentials.authorization())
            .header(CSRF_HEADER, credentials.csrf_token());
        match &self.service_token {
            Some(token) => request.header(SERVICE_TOKEN_HEADER, token),
            None => request,
        }
    }

    fn paged(request: RequestBuilder, limit: Option<u64>, page: Option<u64>) -> RequestBuilder {
        let mut query: Vec<(&str, u64)> = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit));
        }
        if let Some(page) = page {
            query.push(("page", page));
        }
        if query.is_empty() {
            request
        } else {
            request.query(&query)
        }
    }

    async fn send(request: RequestBuilder) -> BackendResult<Value> {
        let response = request.send().await.map_err(BackendError::from_reqwest)?;
        read_response(response).await
    }

    /// `GET /v1/problems` (public)
    pub async fn list_problems(&self, limit: Option<u64>, page: Option<u64>) -> BackendResult<Value> {
        let request = Self::paged(self.http.get(self.url("/v1/problems")), limit, page);
        Self::send(request).await
    }

    /// `POST /v1/users/todos` with `{problems: [...]}`
    pub async fn add_todos(&self, credentials: &CredentialContext, problems: &[String]) -> BackendResult<Value> {
        let request = self
            .http
            .post(self.url("/v1/users/todos"))
            .json(&json!({ "problems": problems }));
        Self::send(self.authenticated(request, credentials)).await
    }

    /// `GET /v1/users/todos`
    pub async fn list_todos(
        &self,
        credentials: &CredentialContext,
        limit: Option<u64>,
        page: Option<u64>,
    ) -> BackendResult<Value> {
        let request = Self::paged(self.http.get(self.url("/v1/users/todos")), limit, page);
        Self::send(self.authenticated(request, credentials)).await
    }

    /// `DELETE /v1/users/todos/{problem}`
    pub async fn remove_todo(&self, credentials: &CredentialContext, problem: &str) -> BackendResult<Value> {
        let encoded = utf8_percent_encode(problem, NON_ALPHANUMERIC).to_string();
        let request = self.http.delete(self.url(&format!("/v1/users/todos/{}", encoded)));
        Self::send(self.authenticated(request, credentials)).await
    }
}

/// Turn a response into a JSON payload or a `BackendError`
async fn read_response(response: Response) -> BackendResult<Value> {
    let status = response.status();
    let body = response.text().await.map_err(BackendError::from_reqwest)?;

    if !status.is_success() {
        return Err(BackendError::status(status.as_u16(), error_message(&body)));
    }
    if body.trim().is_empty() {
        return Ok(json!({ "status": status.as_u16() }));
    }
    serde_json::from_str(&body).map_err(|e| BackendError::InvalidBody(e.to_string()))
}

/// `message` field of a JSON error body, else the (shortened) raw body
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, service_token: Option<&str>) -> BackendClient {
        let settings = BackendSettings {
            base_url: format!("{}/", server.uri()),
            service_token: service_token.map(str::to_string),
            timeout_secs: 5,
        };
        BackendClient::new(&settings).unwrap()
    }

    fn creds() -> CredentialContext {
        CredentialContext::new("Bearer user-token", "csrf-123")
    }

    #[tokio::test]
    async fn test_list_problems_with_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/problems"))
            .and(query_param("limit", "5"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": "1" }] })))
            .expect(1)
            .mount(&server)
            .await;

        let body = client(&server, None).list_problems(Some(5), Some(2)).await.unwrap();
        assert_eq!(body["data"][0]["id"], "1");
    }

    #[tokio::test]
    async fn test_add_todos_sends_all_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/users/todos"))
            .and(header("authorization", "Bearer user-token"))
            .and(header("x-csrf-token", "csrf-123"))
            .and(header("x-service-token", "svc"))
            .and(body_json(json!({ "problems": ["a", "b"] })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "message": "Successfully added 2 problems to todo list" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let body = client(&server, Some("svc"))
            .add_todos(&creds(), &["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(body["message"], "Successfully added 2 problems to todo list");
    }

    #[tokio::test]
    async fn test_error_status_uses_message_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/users/todos"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "CSRF token mismatch" })))
            .mount(&server)
            .await;

        let err = client(&server, None).add_todos(&creds(), &["a".to_string()]).await.unwrap_err();
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "CSRF token mismatch");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remove_todo_encodes_path_and_handles_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/users/todos/abc%20123"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let body = client(&server, None).remove_todo(&creds(), "abc 123").await.unwrap();
        assert_eq!(body, json!({ "status": 204 }));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/problems"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server, None).list_problems(None, None).await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/problems"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = BackendClient::for_base_url(server.uri(), Duration::from_secs(1)).unwrap();
        let err = client.list_problems(None, None).await.unwrap_err();
        assert!(matches!(err, BackendError::Timeout));
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(""), "empty response");
        assert_eq!(error_message("plain failure"), "plain failure");
        assert_eq!(error_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(error_message(&"x".repeat(500)).len(), MAX_ERROR_BODY);
    }
}
