use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Result, TrackerError};

const JSON_MIME: &str = "application/json";

/// Hook into every request the client issues.
///
/// Nothing is installed by default; each middleware is added explicitly
/// through [`ApiClientBuilder::middleware`] and runs in insertion order.
pub trait Middleware: Send + Sync {
    /// Inspect or modify the outgoing request. Returning an error aborts
    /// the call before anything is sent.
    fn on_request(&self, _request: &mut Request) -> Result<()> {
        Ok(())
    }

    /// Observe a failed call. The error is returned to the caller unchanged
    /// afterwards.
    fn on_error(&self, _method: &Method, _url: &Url, _error: &TrackerError) {}
}

/// Debug-logs each outgoing request.
pub struct RequestLog;

impl Middleware for RequestLog {
    fn on_request(&self, request: &mut Request) -> Result<()> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        Ok(())
    }
}

/// Shared transport for all API calls: base address, default JSON headers,
/// middleware. Built once and passed by reference.
pub struct ApiClient {
    http: Client,
    base_url: String,
    middleware: Vec<Arc<dyn Middleware>>,
}

pub struct ApiClientBuilder {
    base_url: String,
    headers: Vec<(String, String)>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl ApiClientBuilder {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| TrackerError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TrackerError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(ApiClient {
            http,
            base_url,
            middleware: self.middleware,
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            headers: Vec::new(),
            middleware: Vec::new(),
        }
    }

    /// Client for the configured base URL and extra headers, no middleware.
    pub fn new(config: &Config) -> Result<Self> {
        Self::from_config(config).build()
    }

    /// Builder seeded with the configured base URL and extra headers.
    pub fn from_config(config: &Config) -> ApiClientBuilder {
        config
            .headers
            .iter()
            .fold(Self::builder(config.base_url()), |builder, (name, value)| {
                builder.header(name, value)
            })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/projects/42/`.
    pub fn url(&self, path: &str) -> Result<Url> {
        let full = format!("{}{}", self.base_url, path);
        Url::parse(&full).map_err(|e| TrackerError::InvalidBaseUrl {
            url: full,
            source: e,
        })
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, &[], None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.url(path)?;
        let result = self.execute(method.clone(), url.clone(), query, body).await;

        if let Err(e) = &result {
            error!(method = %method, url = %url, error = %e, "API request failed");
            for middleware in &self.middleware {
                middleware.on_error(&method, &url, e);
            }
        }

        result
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let mut builder = self.http.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let mut request = builder.build()?;
        for middleware in &self.middleware {
            middleware.on_request(&mut request)?;
        }

        let response = self.http.execute(request).await?;

        if !response.status().is_success() {
            return Err(TrackerError::Status {
                status: response.status().as_u16(),
                body: error_body(response.text().await),
            });
        }

        // 204 after DELETE and similar carry no body at all
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn error_body(text: reqwest::Result<String>) -> String {
    match text {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "failed to read error response body");
            "<failed to read response body>".to_string()
        }
    }
}

/// Validate the base address and drop any trailing slash so paths can be
/// appended as-is.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| TrackerError::InvalidBaseUrl {
        url: trimmed.to_string(),
        source: e,
    })?;

    if parsed.cannot_be_a_base() {
        return Err(TrackerError::InvalidBaseUrl {
            url: trimmed.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Default, Clone)]
    struct Recorder {
        errors: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Recorder {
        fn on_error(&self, method: &Method, url: &Url, error: &TrackerError) {
            self.errors
                .lock()
                .unwrap()
                .push(format!("{method} {} {:?}", url.path(), error.status()));
        }
    }

    struct Stamp;

    impl Middleware for Stamp {
        fn on_request(&self, request: &mut Request) -> Result<()> {
            request
                .headers_mut()
                .insert("x-stamp", HeaderValue::from_static("1"));
            Ok(())
        }
    }

    struct Veto;

    impl Middleware for Veto {
        fn on_request(&self, _request: &mut Request) -> Result<()> {
            Err(TrackerError::Rejected("no requests allowed".to_string()))
        }
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::builder(format!("{}/api", server.uri()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8000/api/").unwrap(),
            "http://127.0.0.1:8000/api"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8000/api").unwrap(),
            "http://127.0.0.1:8000/api"
        );
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(TrackerError::InvalidBaseUrl { .. })
        ));
        assert!(normalize_base_url("mailto:ops@example.org").is_err());
    }

    #[test]
    fn test_invalid_header_is_reported() {
        let result = ApiClient::builder("http://127.0.0.1:8000/api")
            .header("bad header", "x")
            .build();
        assert!(matches!(result, Err(TrackerError::InvalidHeader { .. })));
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::builder("http://127.0.0.1:8000/api/")
            .build()
            .unwrap();
        assert_eq!(
            client.url("/projects/42/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/projects/42/"
        );
    }

    #[tokio::test]
    async fn test_sends_json_headers_and_configured_extras() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/themes/"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .and(header("x-requested-with", "pagtrack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::builder(format!("{}/api", server.uri()))
            .header("X-Requested-With", "pagtrack")
            .build()
            .unwrap();
        let body = client.get("/themes/", &[]).await.unwrap();
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_post_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/projects/"))
            .and(body_json(json!({ "title": "Wells" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9 })))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server)
            .post("/projects/", &json!({ "title": "Wells" }))
            .await
            .unwrap();
        assert_eq!(body, json!({ "id": 9 }));
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/projects/1/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server).delete("/projects/1/").await.unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/404/"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"detail":"Not found."}"#),
            )
            .mount(&server)
            .await;

        let recorder = Recorder::default();
        let client = ApiClient::builder(format!("{}/api", server.uri()))
            .middleware(recorder.clone())
            .build()
            .unwrap();

        match client.get("/projects/404/", &[]).await {
            Err(TrackerError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"detail":"Not found."}"#);
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert_eq!(
            recorder.errors.lock().unwrap().as_slice(),
            ["GET /api/projects/404/ Some(404)"]
        );
    }

    #[tokio::test]
    async fn test_unreadable_error_body_gets_placeholder() {
        let read_error = reqwest::get("http://127.0.0.1:1/").await.unwrap_err();
        assert_eq!(error_body(Err(read_error)), "<failed to read response body>");
        assert_eq!(error_body(Ok("gone".to_string())), "gone");
    }

    #[tokio::test]
    async fn test_new_applies_config_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/kpis/"))
            .and(header("x-requested-with", "pagtrack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::parse("[headers]\nX-Requested-With = \"pagtrack\"\n")
            .unwrap()
            .with_base_url(Some(format!("{}/api/", server.uri())));
        let client = ApiClient::new(&config).unwrap();

        assert_eq!(client.base_url(), format!("{}/api", server.uri()));
        client.get("/dashboard/kpis/", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/kpis/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).get("/dashboard/kpis/", &[]).await;
        assert!(matches!(result, Err(TrackerError::Decode(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        // Nothing listens on port 1.
        let client = ApiClient::builder("http://127.0.0.1:1/api").build().unwrap();
        let result = client.get("/projects/", &[]).await;
        assert!(matches!(result, Err(TrackerError::Http(_))));
    }

    #[tokio::test]
    async fn test_request_middleware_can_modify_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/donors/"))
            .and(header("x-stamp", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::builder(format!("{}/api", server.uri()))
            .middleware(RequestLog)
            .middleware(Stamp)
            .build()
            .unwrap();
        client.get("/donors/", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_middleware_veto_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let recorder = Recorder::default();
        let client = ApiClient::builder(format!("{}/api", server.uri()))
            .middleware(Veto)
            .middleware(recorder.clone())
            .build()
            .unwrap();

        let result = client.get("/countries/", &[]).await;
        assert!(matches!(result, Err(TrackerError::Rejected(_))));
        assert_eq!(recorder.errors.lock().unwrap().len(), 1);
    }
}
