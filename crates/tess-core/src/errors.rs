//! Cross-cutting error types for Tessera.
//!
//! Domain-specific errors (`AuthError`, `StoreError`, `RunError`) live in
//! their own crates. A unified error is deferred to `tess-cli` where all crate
//! errors converge into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Tessera crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not name a known entity kind.
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
