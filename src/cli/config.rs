// ABOUTME: Configuration management for the stackforge application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_output_dir: Option<PathBuf>,

    #[serde(default)]
    pub default_format: OutputFormat,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AwsConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output_dir: None,
            default_format: OutputFormat::Json,
            aws: AwsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = serde_yaml::from_str(&contents)?;

            // Merge with environment variables
            config.merge_env();

            Ok(config)
        } else {
            let mut config = Config::default();
            config.merge_env();
            Ok(config)
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Result<PathBuf> {
        let possible_paths = vec![
            PathBuf::from("stackforge.yaml"),
            PathBuf::from("stackforge.yml"),
            PathBuf::from(".stackforge.yaml"),
            PathBuf::from(".stackforge.yml"),
        ];

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".stackforge").join("config.yaml");
            if home_config.exists() {
                return Ok(home_config);
            }
        }

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return Ok(path);
            }
        }

        // Return default path (may not exist)
        Ok(PathBuf::from("stackforge.yaml"))
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        // AWS configuration
        if let Ok(region) = std::env::var("AWS_REGION") {
            self.aws.region = Some(region);
        }
        if let Ok(profile) = std::env::var("AWS_PROFILE") {
            self.aws.profile = Some(profile);
        }

        // Output configuration
        if let Ok(output_dir) = std::env::var("STACKFORGE_OUTPUT_DIR") {
            self.default_output_dir = Some(PathBuf::from(output_dir));
        }

        // Logging configuration
        if let Ok(level) = std::env::var("STACKFORGE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STACKFORGE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert!(config.default_output_dir.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
default_format: yaml
logging:
  level: debug
  format: compact
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::load(Some(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(config.default_format, OutputFormat::Yaml);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
    }
}
