// ABOUTME: Command implementations for the stackforge CLI
// ABOUTME: Handles execution of build, validate, params, and list commands

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::config::Config;
use crate::output::{OutputDestination, OutputFormat, OutputHandler};
use crate::stacks::{StackDefinition, StackRegistry};
use crate::template::TemplateValidator;

/// Build a stack template and emit it to stdout or a file
pub async fn build_stack(
    stack_name: &str,
    format: OutputFormat,
    pretty: bool,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    info!("Building stack template: {}", stack_name);

    let registry = StackRegistry::new();
    let definition = lookup_stack(&registry, stack_name)?;

    let template = definition
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build stack '{}': {}", stack_name, e))?;
    info!(
        "Built template with {} parameters and {} resources",
        template.parameters.len(),
        template.resources.len()
    );

    let destination = match output {
        Some(path) => {
            let path = match &config.default_output_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            };
            OutputDestination::File { path }
        }
        None => OutputDestination::Stdout,
    };

    let handler = OutputHandler::new();
    handler
        .output_template(&template, format, pretty, &destination)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to emit template: {}", e))?;

    if let OutputDestination::File { path } = &destination {
        info!("Template written to: {}", path.display());
    }

    Ok(())
}

/// Validate a stack template without emitting it
pub async fn validate_stack(stack_name: &str, strict: bool, _config: &Config) -> Result<()> {
    info!("Validating stack template: {}", stack_name);

    let registry = StackRegistry::new();
    let definition = lookup_stack(&registry, stack_name)?;

    let template = definition
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build stack '{}': {}", stack_name, e))?;

    let validator = TemplateValidator::new();
    let warnings = validator
        .validate(&template)
        .map_err(|e| anyhow::anyhow!("Stack '{}' is invalid: {}", stack_name, e))?;

    println!("✓ Stack '{}' is valid", stack_name);
    println!("  Parameters: {}", template.parameters.len());
    println!("  Resources: {}", template.resources.len());
    println!("  Outputs: {}", template.outputs.len());

    for warning in &warnings {
        println!("  Warning: {}", warning);
    }

    if strict && !warnings.is_empty() {
        return Err(anyhow::anyhow!(
            "Validation produced {} warning(s) in strict mode",
            warnings.len()
        ));
    }

    info!("Stack validation completed successfully");

    Ok(())
}

/// Show the parameters a stack accepts at deploy time
pub async fn show_params(stack_name: &str, _config: &Config) -> Result<()> {
    let registry = StackRegistry::new();
    let definition = lookup_stack(&registry, stack_name)?;

    let template = definition
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build stack '{}': {}", stack_name, e))?;

    println!("Parameters for stack '{}':", stack_name);
    for (name, parameter) in &template.parameters {
        let mut notes = Vec::new();
        if let Some(default) = &parameter.default {
            notes.push(format!("default: {}", default));
        }
        if parameter.no_echo {
            notes.push("no-echo".to_string());
        }
        if let Some(description) = &parameter.description {
            notes.push(description.clone());
        }

        if notes.is_empty() {
            println!("  {}", name);
        } else {
            println!("  {:<20} {}", name, notes.join(", "));
        }
    }

    Ok(())
}

/// List available stack definitions
pub async fn list_stacks(_config: &Config) -> Result<()> {
    let registry = StackRegistry::new();

    println!("Available stacks:");
    for definition in registry.definitions() {
        println!("  {:<14} {}", definition.name(), definition.description());
    }

    Ok(())
}

fn lookup_stack<'a>(registry: &'a StackRegistry, name: &str) -> Result<&'a dyn StackDefinition> {
    registry.get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown stack '{}'. Available stacks: {}",
            name,
            registry.list().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_known_stack() {
        let config = Config::default();
        validate_stack("postgresql", false, &config).await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_strict_fails_on_sensitive_warning() {
        let config = Config::default();
        let result = validate_stack("postgresql", true, &config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_stack_lists_alternatives() {
        let config = Config::default();
        let error = build_stack("missing", OutputFormat::Json, false, None, &config)
            .await
            .unwrap_err();
        assert!(error.to_string().contains("postgresql"));
    }
}
