//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How long an alert banner stays visible.
const fn default_alert_ttl_ms() -> u64 {
    3_000
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Lifetime of transient success/error alerts.
    #[serde(default = "default_alert_ttl_ms")]
    pub alert_ttl_ms: u64,

    /// `chrono` format used to render dates and `created_at`.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            alert_ttl_ms: default_alert_ttl_ms(),
            date_format: default_date_format(),
        }
    }
}

impl GeneralConfig {
    /// Reject values that would hide every alert or blank every date.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero alert TTL or an empty
    /// date format.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.alert_ttl_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.alert_ttl_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.date_format".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
