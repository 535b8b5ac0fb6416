//! Generic cached resource service.
//!
//! ## Architecture
//!
//! - `Resource` - entity types the datastore serves
//! - `Shared` / `SharedList` - aliased handles into cached data
//! - `ResourceService` - list/get/add/update/delete/archive for one entity
//!   type, backed by the process-wide `ResourceCache` and a `Gateway`

mod cached;
mod resource;

pub use cached::{FetchPolicy, ResourceService};
pub use resource::{Resource, Shared, SharedList, share};
