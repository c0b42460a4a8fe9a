// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides shared functionality for building stacks and inspecting documents

#![allow(dead_code)]

use tempfile::TempDir;

use stackforge::stacks::{jenkins::JenkinsStack, postgresql::PostgresqlStack, StackDefinition};
use stackforge::template::Template;

/// Temporary working directory for tests that write files.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    pub fn file_path(&self, name: &str) -> std::path::PathBuf {
        self.temp_dir.path().join(name)
    }
}

pub fn build_postgresql() -> Template {
    PostgresqlStack.build().expect("postgresql stack builds")
}

pub fn build_jenkins() -> Template {
    JenkinsStack.build().expect("jenkins stack builds")
}

/// Serialize a template and parse it back as generic JSON for assertions.
pub fn to_json_value(template: &Template) -> serde_json::Value {
    serde_json::from_str(&template.to_json().expect("template serializes"))
        .expect("serialized template is valid JSON")
}
