//! # vitrina-config
//!
//! Layered configuration loading for Vitrina using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VITRINA_*` prefix, `__` as separator)
//! 2. Project-level `.vitrina/config.toml`
//! 3. User-level `~/.config/vitrina/config.toml`
//! 4. Built-in defaults
//!
//! CLI flags are applied by the binary on top of the loaded value.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VITRINA_API__BASE_URL` -> `api.base_url`,
//! `VITRINA_GENERAL__ALERT_TTL_MS` -> `general.alert_ttl_ms`, etc.
//!
//! # Extra resources
//!
//! Resources that are not in the built-in catalog are declared as
//! `[[resources]]` tables using the `EntitySchema` shape:
//!
//! ```toml
//! [[resources]]
//! name = "receta"
//! plural = "recetas"
//! owner = "rgarcia"
//! resource = "recetas"
//!
//! [[resources.fields]]
//! name = "nombre"
//! label = "Nombre"
//! ```

mod api;
mod error;
mod general;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vitrina_core::{EntitySchema, catalog};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VitrinaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub resources: Vec<EntitySchema>,
}

impl VitrinaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or the result does not
    /// pass [`Self::check`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv() {
            if !error.not_found() {
                tracing::warn!(%error, "failed to read .env file");
            }
        }
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".vitrina/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VITRINA_").split("__"))
    }

    /// Validate the API section and every configured resource.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.api.check()?;
        self.general.check()?;
        for schema in &self.resources {
            schema.check()?;
        }
        Ok(())
    }

    /// Built-in catalog merged with configured resources.
    #[must_use]
    pub fn schemas(&self) -> Vec<EntitySchema> {
        catalog::merged(&self.resources)
    }

    /// Resolve a resource by segment or plural noun.
    ///
    /// # Errors
    ///
    /// Returns [`vitrina_core::CoreError::UnknownResource`] when nothing matches.
    pub fn schema(&self, resource: &str) -> Result<EntitySchema, vitrina_core::CoreError> {
        catalog::find(resource, &self.resources)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vitrina").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = VitrinaConfig::default();
        assert!(!config.api.has_token());
        assert!(config.resources.is_empty());
        assert!(config.check().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = VitrinaConfig::figment();
        let config: VitrinaConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.general.alert_ttl_ms, 3_000);
    }

    #[test]
    fn schema_lookup_uses_catalog() {
        let config = VitrinaConfig::default();
        let schema = config.schema("libros").expect("builtin");
        assert_eq!(schema.owner, "jparedes");
        assert_eq!(config.schemas().len(), catalog::builtins().len());
    }
}
