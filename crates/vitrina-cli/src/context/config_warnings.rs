use vitrina_config::VitrinaConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &VitrinaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &VitrinaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let defaults = VitrinaConfig::default();

    let mut warnings = Vec::new();

    let api_is_default = config.api.base_url == defaults.api.base_url
        && config.api.prefix == defaults.api.prefix
        && !config.api.has_token();
    if api_is_default && has_single_underscore(&env_keys, "VITRINA_API") {
        warnings.push(
            "API config appears default while VITRINA_API_* env vars exist. Use double underscores (example: VITRINA_API__BASE_URL)."
                .to_string(),
        );
    }

    let general_is_default = config.general.alert_ttl_ms == defaults.general.alert_ttl_ms
        && config.general.date_format == defaults.general.date_format;
    if general_is_default && has_single_underscore(&env_keys, "VITRINA_GENERAL") {
        warnings.push(
            "General config appears default while VITRINA_GENERAL_* env vars exist. Use double underscores (example: VITRINA_GENERAL__DATE_FORMAT)."
                .to_string(),
        );
    }

    warnings
}

/// `PREFIX_X` but not `PREFIX__X`.
fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
