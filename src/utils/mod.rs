//! Utility functions.
//!
//! Small helpers shared by the service and resource layers.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ServiceError};

static NUMERIC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+$").expect("valid numeric suffix pattern"));

/// Parse identifier text into a fixed-width integer.
///
/// The target type bounds the accepted range, so `"300"` is rejected for an
/// `i8` subject ID.
pub fn parse_id<T: FromStr>(kind: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| ServiceError::InvalidId {
        kind,
        value: raw.to_string(),
    })
}

/// Trailing decimal digits of a code, or 0 if there are none.
///
/// `"CH-12"` gives 12, `"ALG"` gives 0. Suffixes too large for `u64` also
/// give 0.
pub fn numeric_suffix(code: &str) -> u64 {
    NUMERIC_SUFFIX
        .find(code)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Append an identifier segment to an endpoint.
///
/// An empty `id` means the endpoint already names the resource.
pub fn join_endpoint(endpoint: &str, id: &str) -> String {
    if id.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}/{}", endpoint, id)
    }
}

/// Build a `?k=v&...` query string, or an empty string for no pairs.
pub fn query_string<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    if encoded.is_empty() {
        encoded
    } else {
        format!("?{}", encoded)
    }
}
