// ABOUTME: Main library module for the stackforge template builder
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod output;
pub mod stacks;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use output::{OutputFormat, OutputHandler};
pub use stacks::{StackDefinition, StackRegistry};
pub use template::{Output, Parameter, Resource, Template, TemplateValidator, Value};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
