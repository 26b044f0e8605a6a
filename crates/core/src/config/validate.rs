use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Provider API key is non-empty
/// - URLs are non-empty
/// - Timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.provider.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "provider.api_key cannot be empty".to_string(),
        ));
    }

    if config.provider.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "provider.base_url cannot be empty".to_string(),
        ));
    }

    if config.provider.dataset_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "provider.dataset_url cannot be empty".to_string(),
        ));
    }

    if config.provider.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "provider.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
