//! PostgREST-style HTTP data service.
//!
//! Reads go to `{url}/rest/v1/{collection}` with filters rendered as
//! `column=op.value` query parameters and `Prefer: count=exact`, so the match
//! count comes back in `Content-Range`. The session principal comes from
//! `{url}/auth/v1/user`.

use serde::Deserialize;
use tess_auth::OperatorGrant;
use tess_config::StoreConfig;
use tess_core::entities::Profile;
use tess_core::enums::EntityKind;
use tess_core::identity::Principal;
use tess_core::predicate::Predicate;
use tess_core::service::{DataService, QueryPage};

use crate::error::StoreError;
use crate::helpers::{decode_rows, filter_params};
use crate::http::{check_response, content_range, parse_content_range};
use crate::retry::{RetryConfig, with_retry};

const USER_AGENT: &str = concat!("tessera/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

/// HTTP client for a PostgREST-compatible backend.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bearer: String,
    retry: RetryConfig,
}

impl RestStore {
    /// A store acting as the signed-in principal.
    ///
    /// Every read goes through the backend's row-level policies for that
    /// principal, in addition to the explicit tenant filter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotConfigured` if `store.url` or `store.anon_key`
    /// is missing, or `StoreError::Http` if the HTTP client fails to build.
    pub fn for_session(config: &StoreConfig, access_token: &str) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::NotConfigured(
                "store.url and store.anon_key are required".into(),
            ));
        }
        Self::build(config, config.anon_key.clone(), access_token.to_string())
    }

    /// A privileged store that bypasses row-level policies, for the orphan scan.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotConfigured` if the URL or service key is missing.
    pub fn privileged(config: &StoreConfig, grant: &OperatorGrant) -> Result<Self, StoreError> {
        if config.url.is_empty() || !config.has_service_key() {
            return Err(StoreError::NotConfigured(
                "store.url and store.service_key are required for operator access".into(),
            ));
        }
        tracing::debug!(source = ?grant.source(), "building privileged store handle");
        Self::build(config, config.service_key.clone(), config.service_key.clone())
    }

    fn build(config: &StoreConfig, api_key: String, bearer: String) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
            bearer,
            retry: RetryConfig::from(&config.retry),
        })
    }

    /// URL for a filtered read of `kind`, capped at `limit` rows.
    #[must_use]
    pub fn query_url(&self, kind: EntityKind, predicate: &Predicate, limit: usize) -> String {
        let mut params = vec!["select=*".to_string()];
        params.extend(filter_params(predicate));
        if let Some(column) = predicate.order_by() {
            params.push(format!("order={column}.asc"));
        }
        params.push(format!("limit={limit}"));
        format!(
            "{}/rest/v1/{}?{}",
            self.base_url,
            kind.collection(),
            params.join("&")
        )
    }

    async fn get(&self, url: &str, with_count: bool) -> Result<reqwest::Response, StoreError> {
        with_retry(&self.retry, url, move || async move {
            let mut request = self
                .http
                .get(url)
                .header("apikey", &self.api_key)
                .bearer_auth(&self.bearer)
                .header(reqwest::header::ACCEPT, "application/json");
            if with_count {
                request = request.header("Prefer", "count=exact");
            }
            check_response(request.send().await?).await
        })
        .await
    }
}

impl DataService for RestStore {
    type Error = StoreError;

    async fn query(
        &self,
        kind: EntityKind,
        predicate: &Predicate,
        limit: usize,
    ) -> Result<QueryPage, StoreError> {
        let url = self.query_url(kind, predicate, limit);
        tracing::debug!(%kind, %url, "store read");

        let resp = self.get(&url, true).await?;
        let range = content_range(&resp);
        let rows: Vec<serde_json::Value> = resp.json().await?;
        let count = parse_content_range(range.as_deref(), rows.len());
        let items = decode_rows(kind, rows)?;
        tracing::debug!(%kind, total = count.total, exact = count.exact, "store read done");
        Ok(QueryPage { count, items })
    }

    async fn current_principal(&self) -> Result<Option<Principal>, StoreError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        match self.get(&url, false).await {
            Ok(resp) => {
                let user: AuthUser = resp.json().await?;
                Ok(Some(Principal {
                    id: user.id,
                    email: user.email,
                }))
            }
            Err(StoreError::Api {
                status: 401 | 403, ..
            }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn profile_by_id(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        let url = self.query_url(EntityKind::Profile, &Predicate::by_id(id), 1);
        let resp = self.get(&url, false).await?;
        let rows: Vec<serde_json::Value> = resp.json().await?;
        rows.into_iter()
            .next()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| StoreError::Decode(format!("profile {id}: {e}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tess_core::identity::TenantKey;

    fn config() -> StoreConfig {
        StoreConfig {
            url: "https://abc.example.co/".into(),
            anon_key: "anon".into(),
            ..Default::default()
        }
    }

    #[test]
    fn scoped_url_has_tenant_filter_and_limit() {
        let store = RestStore::for_session(&config(), "token").unwrap();
        let key = TenantKey::new("org-42").unwrap();
        assert_eq!(
            store.query_url(EntityKind::Project, &Predicate::scoped(&key), 5),
            "https://abc.example.co/rest/v1/projects?select=*&tenant_key=eq.org-42&limit=5"
        );
    }

    #[test]
    fn attendance_url_adds_date_filter() {
        let store = RestStore::for_session(&config(), "token").unwrap();
        let key = TenantKey::new("org-42").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let predicate = Predicate::scoped(&key).on_date(date);
        assert_eq!(
            store.query_url(EntityKind::AttendanceRecord, &predicate, 5),
            "https://abc.example.co/rest/v1/attendance?select=*&tenant_key=eq.org-42&date=eq.2026-10-16&limit=5"
        );
    }

    #[test]
    fn orphan_url_uses_is_null() {
        let store = RestStore::for_session(&config(), "token").unwrap();
        assert_eq!(
            store.query_url(EntityKind::Profile, &Predicate::orphaned(), 5),
            "https://abc.example.co/rest/v1/profiles?select=*&tenant_key=is.null&limit=5"
        );
    }

    #[test]
    fn ordered_url_sorts_before_limit() {
        let store = RestStore::for_session(&config(), "token").unwrap();
        assert_eq!(
            store.query_url(EntityKind::Project, &Predicate::orphaned().ordered_by_id(), 1000),
            "https://abc.example.co/rest/v1/projects?select=*&tenant_key=is.null&order=id.asc&limit=1000"
        );
    }

    #[test]
    fn session_store_requires_url_and_key() {
        let err = RestStore::for_session(&StoreConfig::default(), "token").unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured(_)));
    }

    #[test]
    fn privileged_store_requires_service_key() {
        let grant = OperatorGrant::local_fixture();
        let err = RestStore::privileged(&config(), &grant).unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured(_)));

        let with_key = StoreConfig {
            service_key: "service".into(),
            ..config()
        };
        assert!(RestStore::privileged(&with_key, &grant).is_ok());
    }
}
