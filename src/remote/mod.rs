//! Remote datastore access.
//!
//! The datastore speaks JSON over HTTP with one endpoint per entity
//! collection. `Gateway` is the seam; `HttpGateway` is the real client.

mod gateway;
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use gateway::{Gateway, Method, RequestBody};
pub use http::{HttpGateway, REQUEST_TIMEOUT};
