//! Report run configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tess_core::enums::EntityKind;

use crate::error::ConfigError;

/// Default cap on concurrent reads against the store.
const fn default_max_concurrency() -> usize {
    8
}

/// Default wall-clock budget for one run, in seconds.
const fn default_run_timeout_secs() -> u64 {
    30
}

fn default_integrity_kinds() -> Vec<EntityKind> {
    EntityKind::INTEGRITY_CHECKED.to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Maximum number of reads in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Run-level deadline. Reads still pending when it passes are reported as timed out.
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,

    /// Kinds included in the orphan scan.
    #[serde(default = "default_integrity_kinds")]
    pub integrity_kinds: Vec<EntityKind>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            run_timeout_secs: default_run_timeout_secs(),
            integrity_kinds: default_integrity_kinds(),
        }
    }
}

impl ReportConfig {
    pub const fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.max_concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.run_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.run_timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReportConfig::default();
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.run_timeout(), Duration::from_secs(30));
        assert_eq!(
            config.integrity_kinds,
            vec![EntityKind::Profile, EntityKind::Project]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = ReportConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "report.max_concurrency"
        ));
    }
}
