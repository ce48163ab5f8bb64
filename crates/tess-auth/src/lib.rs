//! # tess-auth
//!
//! Identity resolution for Tessera runs.
//!
//! Reads an already-issued access token (config/env → OS keychain → credentials
//! file), resolves the session principal through a [`DataService`], derives the
//! principal's tenant key, and hands out the [`OperatorGrant`] that gates the
//! unscoped integrity scan. Tessera never issues credentials itself.
//!
//! [`DataService`]: tess_core::service::DataService

pub mod error;
pub mod operator;
pub mod session;
pub mod tenant;
pub mod token;

pub use error::AuthError;
pub use operator::{GrantSource, OperatorGrant};
pub use session::resolve_session;
pub use tenant::resolve_tenant;
pub use token::{TokenSource, decode_expiry, resolve_access_token};
