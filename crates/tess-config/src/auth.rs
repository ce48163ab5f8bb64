//! Access token configuration.
//!
//! Tessera never issues credentials. It only reads an access token that the
//! external auth collaborator already minted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Access token of the signed-in principal.
    #[serde(default)]
    pub access_token: String,

    /// Override for the credentials file (defaults to `~/.tessera/credentials`).
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

impl AuthConfig {
    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_absent() {
        let config = AuthConfig {
            access_token: "  ".into(),
            ..Default::default()
        };
        assert!(!config.has_access_token());
    }
}
