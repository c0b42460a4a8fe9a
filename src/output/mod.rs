// ABOUTME: Output handling for built templates
// ABOUTME: Handles JSON/YAML formatting and writing to stdout or files

pub mod error;
pub mod formatter;
pub mod writer;

use std::collections::HashMap;
use std::path::PathBuf;

use self::error::{OutputError, Result};
use self::formatter::{JsonFormatter, TemplateFormatter, YamlFormatter};
use self::writer::{FileWriter, OutputWriter, StdoutWriter};
use crate::template::Template;

pub use self::formatter::OutputFormat;

/// Where a formatted template ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File { path: PathBuf },
}

impl OutputDestination {
    pub fn writer_type(&self) -> &'static str {
        match self {
            OutputDestination::Stdout => "stdout",
            OutputDestination::File { .. } => "file",
        }
    }
}

pub struct OutputHandler {
    formatters: HashMap<String, Box<dyn TemplateFormatter>>,
    writers: HashMap<String, Box<dyn OutputWriter>>,
}

impl OutputHandler {
    pub fn new() -> Self {
        let mut handler = Self {
            formatters: HashMap::new(),
            writers: HashMap::new(),
        };

        // Register built-in formatters
        handler.register_formatter("json", Box::new(JsonFormatter::new()));
        handler.register_formatter("pretty", Box::new(JsonFormatter::new_pretty()));
        handler.register_formatter("yaml", Box::new(YamlFormatter::new()));

        // Register built-in writers
        handler.register_writer("stdout", Box::new(StdoutWriter::new()));
        handler.register_writer("file", Box::new(FileWriter::new()));

        handler
    }

    pub fn register_formatter(&mut self, name: &str, formatter: Box<dyn TemplateFormatter>) {
        self.formatters.insert(name.to_string(), formatter);
    }

    pub fn register_writer(&mut self, name: &str, writer: Box<dyn OutputWriter>) {
        self.writers.insert(name.to_string(), writer);
    }

    /// Format a template and write it to the destination.
    pub async fn output_template(
        &self,
        template: &Template,
        format: OutputFormat,
        pretty: bool,
        destination: &OutputDestination,
    ) -> Result<()> {
        let formatter_name = match (format, pretty) {
            (OutputFormat::Json, true) => "pretty",
            (OutputFormat::Json, false) => "json",
            (OutputFormat::Yaml, _) => "yaml",
        };

        let formatter =
            self.formatters
                .get(formatter_name)
                .ok_or_else(|| OutputError::FormatterNotFound {
                    format: formatter_name.to_string(),
                })?;

        let formatted_output = formatter.format_template(template)?;

        let writer = self
            .writers
            .get(destination.writer_type())
            .ok_or_else(|| OutputError::WriterNotFound {
                writer_type: destination.writer_type().to_string(),
            })?;

        writer.write(&formatted_output, destination).await
    }

    pub fn list_formatters(&self) -> Vec<&str> {
        self.formatters.keys().map(|k| k.as_str()).collect()
    }

    pub fn list_writers(&self) -> Vec<&str> {
        self.writers.keys().map(|k| k.as_str()).collect()
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::postgresql::PostgresqlStack;
    use crate::stacks::StackDefinition;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_output_template_to_file() {
        let template = PostgresqlStack.build().unwrap();
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("postgresql.json");

        let handler = OutputHandler::new();
        handler
            .output_template(
                &template,
                OutputFormat::Json,
                true,
                &OutputDestination::File { path: path.clone() },
            )
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["Description"], "PostgreSQL");
    }

    #[test]
    fn test_builtin_registrations() {
        let handler = OutputHandler::new();

        let mut formatters = handler.list_formatters();
        formatters.sort_unstable();
        assert_eq!(formatters, vec!["json", "pretty", "yaml"]);

        let mut writers = handler.list_writers();
        writers.sort_unstable();
        assert_eq!(writers, vec!["file", "stdout"]);
    }
}
