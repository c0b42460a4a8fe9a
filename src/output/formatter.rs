// ABOUTME: Output formatters for the supported template formats (JSON, YAML)
// ABOUTME: Handles serialization of built templates for emission

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::template::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait TemplateFormatter: Send + Sync {
    fn format_template(&self, template: &Template) -> Result<String>;
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct YamlFormatter;

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn new_pretty() -> Self {
        Self { pretty: true }
    }
}

impl TemplateFormatter for JsonFormatter {
    fn format_template(&self, template: &Template) -> Result<String> {
        let output = if self.pretty {
            template.to_json_pretty()?
        } else {
            template.to_json()?
        };
        Ok(output)
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateFormatter for YamlFormatter {
    fn format_template(&self, template: &Template) -> Result<String> {
        Ok(template.to_yaml()?)
    }
}
