use anyhow::Context;
use vitrina_client::CrudClient;
use vitrina_config::VitrinaConfig;
use vitrina_core::EntitySchema;
use vitrina_view::Coordinator;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: VitrinaConfig,
}

impl AppContext {
    pub fn init(config: VitrinaConfig) -> anyhow::Result<Self> {
        config.check()?;
        tracing::debug!(
            base_url = %config.api.base_url,
            extra_resources = config.resources.len(),
            "context ready"
        );
        Ok(Self { config })
    }

    /// Resolve a resource by segment or plural.
    pub fn schema(&self, resource: &str) -> anyhow::Result<EntitySchema> {
        self.config
            .schema(resource)
            .context("run 'vtr resources' to see what is available")
    }

    /// HTTP client for one resource.
    pub fn client(&self, resource: &str) -> anyhow::Result<CrudClient> {
        let schema = self.schema(resource)?;
        CrudClient::new(&self.config.api, schema).context("failed to build HTTP client")
    }

    /// Coordinator over the HTTP client for one resource.
    pub fn coordinator(&self, resource: &str) -> anyhow::Result<Coordinator<CrudClient>> {
        Ok(Coordinator::with_config(
            self.client(resource)?,
            &self.config.general,
        ))
    }
}
