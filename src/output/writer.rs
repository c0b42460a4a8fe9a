// ABOUTME: Output writers for the supported destinations (stdout, files)
// ABOUTME: Handles writing formatted templates to their destination

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::{OutputError, Result};
use super::OutputDestination;

#[async_trait]
pub trait OutputWriter: Send + Sync {
    async fn write(&self, content: &str, destination: &OutputDestination) -> Result<()>;
}

pub struct StdoutWriter;

pub struct FileWriter;

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl StdoutWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputWriter for StdoutWriter {
    async fn write(&self, content: &str, _destination: &OutputDestination) -> Result<()> {
        println!("{}", content);
        debug!("Output written to stdout ({} chars)", content.len());
        Ok(())
    }
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputWriter for FileWriter {
    async fn write(&self, content: &str, destination: &OutputDestination) -> Result<()> {
        let path = match destination {
            OutputDestination::File { path } => path,
            OutputDestination::Stdout => {
                return Err(OutputError::WriteError {
                    message: "file writer needs a file destination".to_string(),
                })
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| OutputError::WriteError {
                        message: format!("Failed to create directory {}: {}", parent.display(), e),
                    })?;
            }
        }

        fs::write(path, content)
            .await
            .map_err(|e| OutputError::WriteError {
                message: format!("Failed to write file {}: {}", path.display(), e),
            })?;

        debug!("Output written to {} ({} chars)", path.display(), content.len());
        Ok(())
    }
}
