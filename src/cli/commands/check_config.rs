use crate::config::Config;

/// Human-readable summary of the effective configuration. Key values are
/// never printed.
#[must_use]
pub fn config_summary(config: &Config) -> Vec<String> {
    vec![
        format!("Database:     {}", config.general.database_path),
        format!("Port:         {}", config.server.port),
        format!("API keys:     {} configured", config.security.api_keys.len()),
        format!(
            "CORS origins: {}",
            config.server.cors_allowed_origins.join(", ")
        ),
        format!(
            "Logging:      {} ({})",
            config.general.log_level, config.general.log_format
        ),
    ]
}

pub fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    config.validate()?;

    println!("✓ Configuration is valid");
    for line in config_summary(config) {
        println!("  {line}");
    }

    if config.security.api_keys.is_empty() {
        println!("  ! No API keys set: create, update and delete will be refused");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_hides_key_values() {
        let mut config = Config::default();
        config.security.api_keys = vec!["super-secret".to_string(), "other".to_string()];

        let summary = config_summary(&config).join("\n");
        assert!(summary.contains("2 configured"));
        assert!(!summary.contains("super-secret"));
    }
}
