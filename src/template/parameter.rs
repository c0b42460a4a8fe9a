// ABOUTME: Template parameter declarations supplied externally at deploy time
// ABOUTME: Defines the Parameter struct with type, default, and constraint fields

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterType {
    String,
    Number,
}

/// A named input the provisioning engine prompts for at deploy time.
/// Parameters are declared once at build time and never mutated; `no_echo`
/// marks values the engine must not display in logs or consoles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(rename = "Type")]
    pub parameter_type: ParameterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_echo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_pattern: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_description: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Parameter {
    /// Declare a string parameter with no constraints.
    pub fn string() -> Self {
        Self {
            parameter_type: ParameterType::String,
            description: None,
            default: None,
            no_echo: false,
            min_length: None,
            max_length: None,
            allowed_pattern: None,
            allowed_values: Vec::new(),
            constraint_description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the parameter as sensitive so the engine never echoes its value.
    pub fn no_echo(mut self) -> Self {
        self.no_echo = true;
        self
    }

    pub fn with_length_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn with_allowed_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_pattern = Some(pattern.into());
        self
    }

    pub fn with_constraint_description(mut self, description: impl Into<String>) -> Self {
        self.constraint_description = Some(description.into());
        self
    }
}
