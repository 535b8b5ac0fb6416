//! Gateway contract shared by the HTTP client and test doubles.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{Result, ServiceError};

/// HTTP verbs the datastore understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload, either already serialized or a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Raw(Vec<u8>),
    Json(serde_json::Value),
}

impl RequestBody {
    /// Serialize any value into a JSON body.
    pub fn json<S>(value: &S) -> Result<Self>
    where
        S: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(ServiceError::Encode)
    }

    /// Bytes to put on the wire.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Raw(bytes) => Ok(bytes),
            Self::Json(value) => serde_json::to_vec(&value).map_err(ServiceError::Encode),
        }
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes)
    }
}

/// One request per call against the remote datastore.
///
/// `endpoint` is a path (with optional query string) relative to the
/// datastore base address. Implementations return the raw response body on
/// a 2xx status and an error otherwise. They keep no state between calls.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn call(&self, endpoint: &str, method: Method, body: Option<RequestBody>) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_body_bytes() {
        let body = RequestBody::json(&json!({"code": "CH-1"})).unwrap();
        assert_eq!(body.into_bytes().unwrap(), br#"{"code":"CH-1"}"#.to_vec());
    }

    #[test]
    fn test_raw_body_passthrough() {
        let body = RequestBody::from(b"{\"name\":\"X\"}".to_vec());
        assert_eq!(body.into_bytes().unwrap(), b"{\"name\":\"X\"}".to_vec());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
