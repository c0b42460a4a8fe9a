// ABOUTME: Error types for template construction and validation
// ABOUTME: Defines specific error types for the template module operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Duplicate parameter name: {name}")]
    DuplicateParameter { name: String },

    #[error("Duplicate mapping name: {name}")]
    DuplicateMapping { name: String },

    #[error("Duplicate resource name: {name}")]
    DuplicateResource { name: String },

    #[error("Duplicate output name: {name}")]
    DuplicateOutput { name: String },

    #[error("Failed to serialize template to JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to serialize template to YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("'{location}' references unknown parameter or resource '{target}'")]
    UnknownReference { location: String, target: String },

    #[error("'{location}' gets an attribute of unknown resource '{target}'")]
    UnknownAttributeTarget { location: String, target: String },

    #[error("'{location}' looks up unknown mapping '{mapping}'")]
    UnknownMapping { location: String, mapping: String },

    #[error("Resource '{resource}' depends on unknown resource '{dependency}'")]
    UnknownDependency { resource: String, dependency: String },

    #[error("Circular dependency detected between resources: {resources:?}")]
    CircularDependency { resources: Vec<String> },

    #[error(
        "Output '{output}' echoes no-echo parameter '{parameter}' without being marked sensitive"
    )]
    UnmarkedSensitiveOutput { output: String, parameter: String },
}

pub type Result<T> = std::result::Result<T, TemplateError>;
