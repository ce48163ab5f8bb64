//! # tess-store
//!
//! [`DataService`] implementations for Tessera.
//!
//! - [`RestStore`]: PostgREST-style HTTP backend (`reqwest`), with retry on
//!   transient failures and counts read from `Content-Range`
//! - [`MemoryStore`]: read-only JSON fixture store for offline runs and tests
//! - [`StoreBackend`]: runtime choice between the two
//!
//! [`DataService`]: tess_core::service::DataService

pub mod backend;
pub mod error;
pub mod helpers;
pub mod http;
pub mod memory;
pub mod rest;
pub mod retry;

pub use backend::StoreBackend;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use retry::RetryConfig;
