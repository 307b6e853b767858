use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Endpoint base URL is http(s) and paths are absolute
/// - Progress interval and step are non-zero, cap is strictly between 0 and 100
/// - Output filename is a bare file name
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let endpoint = &config.endpoint;
    if !(endpoint.base_url.starts_with("http://") || endpoint.base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "endpoint.base_url must start with http:// or https://, got '{}'",
            endpoint.base_url
        )));
    }
    for (key, path) in [
        ("endpoint.process_path", &endpoint.process_path),
        ("endpoint.status_path", &endpoint.status_path),
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "{} must start with '/'",
                key
            )));
        }
    }

    let progress = &config.progress;
    if progress.interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "progress.interval_ms cannot be 0".to_string(),
        ));
    }
    if progress.step == 0 {
        return Err(ConfigError::ValidationError(
            "progress.step cannot be 0".to_string(),
        ));
    }
    if progress.cap == 0 || progress.cap >= 100 {
        return Err(ConfigError::ValidationError(
            "progress.cap must be between 1 and 99".to_string(),
        ));
    }

    let filename = &config.output.filename;
    if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
        return Err(ConfigError::ValidationError(
            "output.filename must be a plain file name".to_string(),
        ));
    }

    Ok(())
}
