//! Syllabus - cached resource layer for a curriculum CMS.
//!
//! Screens of the content-management tool read and edit curricula, chapters,
//! topics, tests and problems held by a remote datastore. This crate keeps
//! recently fetched lists in a process-wide TTL cache and hands out shared
//! handles into them, so an edit through one handle is seen by every view.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - process-wide TTL store with Moka
//! - `remote` - HTTP gateway to the datastore
//! - `service` - generic cached list/get/add/update/delete per entity type
//! - `views` - association, sorting and filtering of cached lists
//! - `models` - entity types
//! - `resources` - per-entity flows the screens run
//! - `utils` - identifier parsing and endpoint helpers

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod remote;
pub mod resources;
pub mod service;
pub mod utils;
pub mod views;

pub use cache::{CacheConfig, ResourceCache, spawn_sweeper};
pub use config::Config;
pub use error::{Result, ServiceError};
pub use remote::{Gateway, HttpGateway};
pub use resources::Services;
pub use service::{FetchPolicy, ResourceService, Shared, SharedList};
