//! # tess-core
//!
//! Core types shared across all Tessera crates.
//!
//! - Entity kinds and per-kind record structs for the tenant-owned collections
//! - Principal and tenant key identity types
//! - Query predicates and result pages exchanged with a data service
//! - The [`service::DataService`] contract implemented by stores
//! - Report value types produced by a run and rendered by the CLI
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod predicate;
pub mod report;
pub mod service;
