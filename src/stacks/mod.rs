// ABOUTME: Built-in stack definitions and the registry that serves them
// ABOUTME: Contains the StackDefinition trait and the postgresql and jenkins stacks

pub mod jenkins;
pub mod postgresql;

use indexmap::IndexMap;

use crate::template::error::Result;
use crate::template::Template;

/// A named, self-contained description of one infrastructure stack. A
/// definition accepts no runtime input; `build` assembles the document from
/// static literals in a single linear pass.
pub trait StackDefinition: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn build(&self) -> Result<Template>;
}

pub struct StackRegistry {
    definitions: IndexMap<String, Box<dyn StackDefinition>>,
}

impl StackRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            definitions: IndexMap::new(),
        };

        // Register all built-in stack definitions
        registry.register(Box::new(postgresql::PostgresqlStack));
        registry.register(Box::new(jenkins::JenkinsStack));

        registry
    }

    pub fn register(&mut self, definition: Box<dyn StackDefinition>) {
        let name = definition.name().to_string();
        self.definitions.insert(name, definition);
    }

    pub fn get(&self, name: &str) -> Option<&dyn StackDefinition> {
        self.definitions.get(name).map(|definition| definition.as_ref())
    }

    /// Stack names in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.definitions.keys().map(|k| k.as_str()).collect()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &dyn StackDefinition> {
        self.definitions.values().map(|definition| definition.as_ref())
    }
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stacks_are_registered() {
        let registry = StackRegistry::new();
        assert_eq!(registry.list(), vec!["postgresql", "jenkins"]);
        assert!(registry.get("postgresql").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_builtin_stacks_build() {
        let registry = StackRegistry::new();
        for definition in registry.definitions() {
            let template = definition.build().unwrap();
            assert!(!template.resources.is_empty());
        }
    }
}
