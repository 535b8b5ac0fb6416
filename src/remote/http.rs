//! HTTP gateway to the remote datastore.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use super::{Gateway, Method, RequestBody};
use crate::config::Config;
use crate::error::{Result, ServiceError};

/// Fixed per-request timeout. There is no caller-supplied deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway backed by `reqwest`.
///
/// Every request carries `Authorization: Bearer <token>` and a JSON content
/// type. Statuses outside 200..=299 fail with `ServiceError::Status` and the
/// body is dropped. Nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.db_service_endpoint, &config.db_service_token)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&format!("Bearer {}", self.token)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("Bearer token contains invalid header characters, sending without it"),
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn call(&self, endpoint: &str, method: Method, body: Option<RequestBody>) -> Result<Vec<u8>> {
        let mut request = self
            .client
            .request(reqwest_method(method), self.url(endpoint))
            .headers(self.headers());

        if let Some(body) = body {
            request = request.body(body.into_bytes()?);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("{} {} -> {}", method, endpoint, status.as_u16());

        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_get_sends_auth_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chapter"))
            .and(query_param("grade_id", "2"))
            .and(header("authorization", "Bearer secret"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":1}]"#))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpGateway::new(server.uri(), "secret").unwrap();
        let bytes = gateway.call("/chapter?grade_id=2", Method::Get, None).await.unwrap();

        assert_eq!(bytes, br#"[{"id":1}]"#.to_vec());
    }

    #[tokio::test]
    async fn test_patch_serializes_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/topic/4"))
            .and(body_json(json!({"cms_status_id": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpGateway::new(server.uri(), "secret").unwrap();
        gateway
            .call("/topic/4", Method::Patch, Some(json!({"cms_status_id": 1}).into()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_raw_body_sent_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tag"))
            .and(body_json(json!({"name": "algebra"})))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":9}"#))
            .mount(&server)
            .await;

        let gateway = HttpGateway::new(server.uri(), "secret").unwrap();
        let bytes = gateway
            .call("/tag", Method::Post, Some(br#"{"name":"algebra"}"#.to_vec().into()))
            .await
            .unwrap();

        assert_eq!(bytes, br#"{"id":9}"#.to_vec());
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/chapter/3"))
            .respond_with(ResponseTemplate::new(409).set_body_string("conflict details"))
            .mount(&server)
            .await;

        let gateway = HttpGateway::new(server.uri(), "secret").unwrap();
        let err = gateway.call("/chapter/3", Method::Delete, None).await.unwrap_err();

        assert!(matches!(err, ServiceError::Status(409)));
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let gateway = HttpGateway::new("http://127.0.0.1:1", "secret").unwrap();
        let err = gateway.call("/grade", Method::Get, None).await.unwrap_err();

        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
