// ABOUTME: Error types for output handling operations
// ABOUTME: Defines specific error types for formatting and writing built templates

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Formatter not found: {format}")]
    FormatterNotFound { format: String },

    #[error("Writer not found: {writer_type}")]
    WriterNotFound { writer_type: String },

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] crate::template::TemplateError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
