//! REST endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix placed before `/{owner}/{resource}`.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Sent verbatim as `Authorization: Bearer <token>` when non-empty.
    #[serde(default)]
    pub bearer_token: String,

    /// Whole-request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            bearer_token: String::new(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.bearer_token.trim().is_empty()
    }

    /// Endpoint for one resource: `{base_url}{prefix}/{owner}/{resource}`,
    /// without a trailing slash.
    #[must_use]
    pub fn endpoint(&self, owner: &str, resource: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.prefix.trim_matches('/');
        let mut url = String::from(base);
        for segment in [prefix, owner.trim_matches('/'), resource.trim_matches('/')] {
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }
        url
    }

    /// Check that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for any other scheme.
    pub fn check(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: format!("'{base}' must start with http:// or https://"),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.prefix, "/api/v1");
        assert!(!config.has_token());
        assert!(config.timeout_secs.is_none());
        assert!(config.check().is_ok());
    }

    #[test]
    fn endpoint_joins_segments() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:8000/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("asantelis", "animales"),
            "http://127.0.0.1:8000/api/v1/asantelis/animales"
        );
    }

    #[test]
    fn endpoint_skips_empty_prefix() {
        let config = ApiConfig {
            prefix: String::new(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("rpalma", "contactos"),
            "http://localhost:8000/rpalma/contactos"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = ApiConfig {
            base_url: "localhost:8000".into(),
            ..Default::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.check().is_err());
    }
}
