use std::path::Path;

use crate::config::schema::ConvertConfig;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConvertConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ConvertConfig, ConfigError> {
    let config: ConvertConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &ConvertConfig) -> Result<(), ConfigError> {
    if config.source_directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation {
            message: "Source directory must not be empty".to_string(),
        });
    }

    if config.destination_directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation {
            message: "Destination directory must not be empty".to_string(),
        });
    }

    if config.source_directory == config.destination_directory {
        return Err(ConfigError::Validation {
            message: format!(
                "Source and destination must differ: {}",
                config.source_directory.display()
            ),
        });
    }

    if config.wiki_base.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation {
            message: format!("Wiki base contains whitespace: '{}'", config.wiki_base),
        });
    }

    Ok(())
}
