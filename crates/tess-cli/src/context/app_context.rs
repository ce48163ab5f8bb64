use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tess_auth::{OperatorGrant, TokenSource, resolve_access_token, token};
use tess_config::TesseraConfig;
use tess_store::{MemoryStore, RestStore, StoreBackend};

/// Shared state for one CLI invocation.
///
/// Holds the loaded config and, when `--fixture` was given, the fixture store.
/// Store handles for the configured backend are built lazily so commands that
/// never touch the network (or never need operator access) do not require it.
pub struct AppContext {
    pub config: TesseraConfig,
    fixture: Option<Arc<StoreBackend>>,
}

impl AppContext {
    /// Build the context, loading the fixture file if one was selected.
    pub fn init(config: TesseraConfig, fixture: Option<&Path>) -> anyhow::Result<Self> {
        let fixture = fixture
            .map(|path| {
                MemoryStore::load(path)
                    .with_context(|| format!("failed to load fixture {}", path.display()))
            })
            .transpose()?
            .map(|store| Arc::new(StoreBackend::Memory(store)));

        Ok(Self { config, fixture })
    }

    /// Where the store handle for this invocation comes from.
    #[must_use]
    pub fn backend_label(&self) -> &'static str {
        self.fixture.as_deref().map_or("rest", StoreBackend::label)
    }

    /// Where the session token would be read from, for diagnostics.
    #[must_use]
    pub fn token_source(&self) -> Option<TokenSource> {
        if self.fixture.is_some() {
            return None;
        }
        token::detect_token_source(&self.config.auth)
    }

    /// A store acting as the signed-in principal.
    pub fn session_store(&self) -> anyhow::Result<Arc<StoreBackend>> {
        if let Some(store) = &self.fixture {
            return Ok(Arc::clone(store));
        }

        let access_token = resolve_access_token(&self.config.auth)?;
        let store = RestStore::for_session(&self.config.store, &access_token)
            .context("failed to build session store")?;
        Ok(Arc::new(StoreBackend::Rest(store)))
    }

    /// A privileged store for the orphan scan, with the grant that allows it.
    pub fn operator_store(&self) -> anyhow::Result<(Arc<StoreBackend>, OperatorGrant)> {
        if let Some(store) = &self.fixture {
            return Ok((Arc::clone(store), OperatorGrant::local_fixture()));
        }

        let grant = OperatorGrant::from_store_config(&self.config.store)?;
        let store = RestStore::privileged(&self.config.store, &grant)
            .context("failed to build operator store")?;
        Ok((Arc::new(StoreBackend::Rest(store)), grant))
    }
}
