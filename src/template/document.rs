// ABOUTME: The template document itself with its ordered sections and builder
// ABOUTME: Handles section construction, duplicate detection, and serialization

use indexmap::IndexMap;
use serde::Serialize;

use super::error::{Result, TemplateError};
use super::parameter::Parameter;
use super::resource::Resource;
use super::value::Value;

/// The template format version understood by the provisioning engine.
pub const FORMAT_VERSION: &str = "2010-09-09";

/// A two-level lookup table consumed by `Fn::FindInMap`, e.g. region to AMI.
pub type Mapping = IndexMap<String, IndexMap<String, String>>;

/// A value republished after the stack is applied, usually a reference or an
/// attribute lookup on a resource. `sensitive` is builder metadata: it marks
/// outputs that deliberately echo a no-echo parameter and is never
/// serialized, since the provisioning engine has no such field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub sensitive: bool,
}

impl Output {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            description: None,
            sensitive: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Record that this output knowingly surfaces a no-echo parameter.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// An ordered, immutable-once-built template document. Sections keep
/// insertion order so serializing the same declarations twice produces
/// byte-identical output; nothing in the document depends on clocks or
/// random identifiers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub mappings: IndexMap<String, Mapping>,
    pub resources: IndexMap<String, Resource>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub outputs: IndexMap<String, Output>,
}

impl Template {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            description: Some(description.into()),
            parameters: IndexMap::new(),
            mappings: IndexMap::new(),
            resources: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Declare a parameter. Duplicate names fail immediately; forward
    /// references from resources declared earlier are fine because
    /// resolution happens in a later pass by the provisioning engine.
    pub fn add_parameter(&mut self, name: impl Into<String>, parameter: Parameter) -> Result<()> {
        let name = name.into();
        if self.parameters.contains_key(&name) {
            return Err(TemplateError::DuplicateParameter { name });
        }
        self.parameters.insert(name, parameter);
        Ok(())
    }

    pub fn add_mapping(&mut self, name: impl Into<String>, mapping: Mapping) -> Result<()> {
        let name = name.into();
        if self.mappings.contains_key(&name) {
            return Err(TemplateError::DuplicateMapping { name });
        }
        self.mappings.insert(name, mapping);
        Ok(())
    }

    pub fn add_resource(&mut self, name: impl Into<String>, resource: Resource) -> Result<()> {
        let name = name.into();
        if self.resources.contains_key(&name) {
            return Err(TemplateError::DuplicateResource { name });
        }
        self.resources.insert(name, resource);
        Ok(())
    }

    pub fn add_output(&mut self, name: impl Into<String>, output: Output) -> Result<()> {
        let name = name.into();
        if self.outputs.contains_key(&name) {
            return Err(TemplateError::DuplicateOutput { name });
        }
        self.outputs.insert(name, output);
        Ok(())
    }

    pub fn get_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn get_resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn get_output(&self, name: &str) -> Option<&Output> {
        self.outputs.get(name)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn has_resource(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// Parameter names in declaration order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.keys().map(|k| k.as_str()).collect()
    }

    /// Serialize the document as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(TemplateError::JsonError)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(TemplateError::JsonError)
    }

    /// Serialize the document as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(TemplateError::YamlError)
    }
}
