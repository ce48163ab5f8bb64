//! Access token lookup.
//!
//! Tiers, highest priority first: `auth.access_token` (usually from
//! `TESSERA_AUTH__ACCESS_TOKEN`), the OS keychain, then `~/.tessera/credentials`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use chrono::{DateTime, Utc};
use tess_config::AuthConfig;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "tessera-cli";
const KEYRING_USER: &str = "access-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const EXPIRY_BUFFER_SECS: i64 = 30;

/// Where a token was found (for `whoami` output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Config,
    Keyring,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Keyring => "keyring",
            Self::File => "file",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the keyring service name.
///
/// Defaults to `"tessera-cli"`. Override via `TESSERA_KEYRING_SERVICE` so tests
/// never touch real credentials.
fn keyring_service() -> String {
    std::env::var("TESSERA_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Load a raw token and the tier it came from. Does not check expiry.
#[must_use]
pub fn load(config: &AuthConfig) -> Option<(String, TokenSource)> {
    // 1. Config / env
    if config.has_access_token() {
        return Some((config.access_token.trim().to_string(), TokenSource::Config));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(token) = entry.get_password()
        && !token.trim().is_empty()
    {
        return Some((token.trim().to_string(), TokenSource::Keyring));
    }

    // 3. File fallback
    let path = credentials_path(config).ok()?;
    load_file(&path).map(|token| (token, TokenSource::File))
}

/// Detect which tier the current token comes from.
#[must_use]
pub fn detect_token_source(config: &AuthConfig) -> Option<TokenSource> {
    load(config).map(|(_, source)| source)
}

/// Resolve a usable access token.
///
/// A JWT whose `exp` has passed (or is within a few seconds of passing) counts
/// as absent, so an expired session fails fast without a network round-trip.
/// Opaque tokens are passed through unchecked.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` if no tier holds a token or the token
/// is expired.
pub fn resolve_access_token(config: &AuthConfig) -> Result<String, AuthError> {
    let Some((token, source)) = load(config) else {
        return Err(AuthError::not_authenticated("no access token found"));
    };

    match decode_expiry(&token) {
        Ok(expires_at) if is_near_expiry(expires_at, Utc::now()) => {
            tracing::warn!(
                %expires_at,
                %source,
                "access token is expired or about to expire",
            );
            Err(AuthError::not_authenticated(format!(
                "access token from {source} expired at {expires_at}"
            )))
        }
        Ok(_) => Ok(token),
        Err(error) => {
            tracing::debug!(%error, %source, "token expiry not readable; using token as-is");
            Ok(token)
        }
    }
}

fn is_near_expiry(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at.timestamp() - now.timestamp() <= EXPIRY_BUFFER_SECS
}

/// Decode JWT `exp` claim without signature validation.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}

// --- Private file helpers ---

fn credentials_path(config: &AuthConfig) -> Result<PathBuf, AuthError> {
    if let Some(path) = &config.credentials_path {
        return Ok(path.clone());
    }
    dirs::home_dir()
        .map(|h| h.join(".tessera").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| AuthError::TokenStoreError("home directory not found".into()))
}

fn load_file(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    fn make_jwt_with_exp(exp: i64) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(format!(r#"{{"sub":"user_123","exp":{exp}}}"#));
        let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    fn config_with_file(path: &Path) -> AuthConfig {
        AuthConfig {
            access_token: String::new(),
            credentials_path: Some(path.to_path_buf()),
        }
    }

    #[test]
    fn default_credentials_path_is_under_home() {
        let path = credentials_path(&AuthConfig::default()).expect("should resolve");
        assert!(path.ends_with(".tessera/credentials"));
    }

    #[test]
    fn config_token_wins() {
        let config = AuthConfig {
            access_token: " opaque-token \n".into(),
            credentials_path: None,
        };
        assert_eq!(
            load(&config),
            Some(("opaque-token".to_string(), TokenSource::Config))
        );
        assert_eq!(resolve_access_token(&config).unwrap(), "opaque-token");
    }

    #[test]
    fn file_tier_is_used_when_config_is_empty() {
        Jail::expect_with(|jail| {
            jail.set_env("TESSERA_KEYRING_SERVICE", "tessera-cli-test-unset");
            let tmp = tempfile::TempDir::new().expect("tmp dir");
            let creds = tmp.path().join("credentials");
            std::fs::write(&creds, "file-token\n").expect("write");

            let config = config_with_file(&creds);
            assert_eq!(detect_token_source(&config), Some(TokenSource::File));
            assert_eq!(resolve_access_token(&config).unwrap(), "file-token");
            Ok(())
        });
    }

    #[test]
    fn whitespace_only_file_counts_as_missing() {
        Jail::expect_with(|jail| {
            jail.set_env("TESSERA_KEYRING_SERVICE", "tessera-cli-test-unset");
            let tmp = tempfile::TempDir::new().expect("tmp dir");
            let creds = tmp.path().join("credentials");
            std::fs::write(&creds, "   \n  ").expect("write");

            let err = resolve_access_token(&config_with_file(&creds)).unwrap_err();
            assert!(matches!(err, AuthError::NotAuthenticated { .. }));
            Ok(())
        });
    }

    #[test]
    fn expired_jwt_is_rejected_without_network() {
        let past_exp = Utc::now().timestamp() - 3600;
        let config = AuthConfig {
            access_token: make_jwt_with_exp(past_exp),
            credentials_path: None,
        };
        let err = resolve_access_token(&config).unwrap_err();
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn live_jwt_is_accepted() {
        let jwt = make_jwt_with_exp(Utc::now().timestamp() + 3600);
        let config = AuthConfig {
            access_token: jwt.clone(),
            credentials_path: None,
        };
        assert_eq!(resolve_access_token(&config).unwrap(), jwt);
    }

    #[test]
    fn decode_expiry_valid_jwt() {
        let future_exp = Utc::now().timestamp() + 3600;
        let dt = decode_expiry(&make_jwt_with_exp(future_exp)).unwrap();
        assert_eq!(dt.timestamp(), future_exp);
    }

    #[test]
    fn decode_expiry_invalid_format() {
        let err = decode_expiry("not-a-jwt").unwrap_err();
        assert!(err.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn decode_expiry_missing_exp_claim() {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#);
        let payload =
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"sub":"user_123"}"#);
        let jwt = format!("{header}.{payload}.sig");
        let err = decode_expiry(&jwt).unwrap_err();
        assert!(err.to_string().contains("missing exp claim"));
    }

    #[test]
    fn decode_expiry_bad_base64() {
        let err = decode_expiry("header.!!!invalid!!!.signature").unwrap_err();
        assert!(err.to_string().contains("base64 decode failed"));
    }

    #[test]
    fn near_expiry_uses_buffer() {
        let now = Utc::now();
        let soon = now + chrono::Duration::seconds(EXPIRY_BUFFER_SECS - 1);
        let later = now + chrono::Duration::seconds(EXPIRY_BUFFER_SECS + 60);
        assert!(is_near_expiry(soon, now));
        assert!(!is_near_expiry(later, now));
    }
}
