// ABOUTME: Structural validation of built templates before handoff
// ABOUTME: Checks reference resolution, dependency cycles, and sensitive outputs

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::Graph;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::warn;

use super::document::Template;
use super::error::{Result, ValidationError};
use super::value::PSEUDO_PARAMETERS;

/// A reference expression found while walking a serialized section.
enum Expression {
    Ref(String),
    GetAtt(String),
    FindInMap(String),
}

/// Opt-in structural checks on a built template. The builder itself only
/// enforces unique keys; everything here is normally the provisioning
/// engine's job and exists so mistakes surface before submission.
#[derive(Debug, Clone, Default)]
pub struct TemplateValidator;

impl TemplateValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate reference resolution, the dependency graph, and output
    /// hygiene. Returns the warnings produced along the way; the first
    /// hard error aborts the pass.
    pub fn validate(&self, template: &Template) -> Result<Vec<String>> {
        let mut warnings = Vec::new();

        self.check_resource_references(template)?;
        self.check_dependency_graph(template)?;
        self.check_outputs(template, &mut warnings)?;

        Ok(warnings)
    }

    /// Every Ref, Fn::GetAtt, and Fn::FindInMap inside a resource must name
    /// a parameter, resource, mapping, or pseudo parameter declared in the
    /// same document.
    fn check_resource_references(&self, template: &Template) -> Result<()> {
        for (name, resource) in &template.resources {
            let location = format!("Resources.{}", name);
            let serialized = serde_json::to_value(resource)?;

            for expression in collect_expressions(&serialized) {
                self.check_expression(template, &location, &expression)?;
            }
        }

        Ok(())
    }

    fn check_expression(
        &self,
        template: &Template,
        location: &str,
        expression: &Expression,
    ) -> Result<()> {
        match expression {
            Expression::Ref(target) => {
                if !PSEUDO_PARAMETERS.contains(&target.as_str())
                    && !template.has_parameter(target)
                    && !template.has_resource(target)
                {
                    return Err(ValidationError::UnknownReference {
                        location: location.to_string(),
                        target: target.clone(),
                    }
                    .into());
                }
            }
            Expression::GetAtt(target) => {
                if !template.has_resource(target) {
                    return Err(ValidationError::UnknownAttributeTarget {
                        location: location.to_string(),
                        target: target.clone(),
                    }
                    .into());
                }
            }
            Expression::FindInMap(mapping) => {
                if !template.mappings.contains_key(mapping) {
                    return Err(ValidationError::UnknownMapping {
                        location: location.to_string(),
                        mapping: mapping.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Build the resource dependency graph from explicit DependsOn entries
    /// and implicit references, then topologically sort it to reject cycles.
    fn check_dependency_graph(&self, template: &Template) -> Result<()> {
        let mut graph: Graph<String, ()> = Graph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        for name in template.resources.keys() {
            let index = graph.add_node(name.clone());
            indices.insert(name.as_str(), index);
        }

        for (name, resource) in &template.resources {
            let node = indices[name.as_str()];

            for dependency in &resource.depends_on {
                match indices.get(dependency.as_str()) {
                    Some(&dep_node) => {
                        graph.add_edge(dep_node, node, ());
                    }
                    None => {
                        return Err(ValidationError::UnknownDependency {
                            resource: name.clone(),
                            dependency: dependency.clone(),
                        }
                        .into());
                    }
                }
            }

            // References to another resource are implicit dependencies.
            let serialized = serde_json::to_value(resource)?;
            for expression in collect_expressions(&serialized) {
                let target = match expression {
                    Expression::Ref(target) | Expression::GetAtt(target) => target,
                    Expression::FindInMap(_) => continue,
                };
                if let Some(&dep_node) = indices.get(target.as_str()) {
                    graph.add_edge(dep_node, node, ());
                }
            }
        }

        toposort(&graph, None).map_err(|cycle| ValidationError::CircularDependency {
            resources: vec![graph[cycle.node_id()].clone()],
        })?;

        Ok(())
    }

    /// Outputs must reference declared entities, and an output whose value
    /// touches a no-echo parameter must be explicitly marked sensitive.
    /// Marked sensitive outputs are allowed but reported as warnings.
    fn check_outputs(&self, template: &Template, warnings: &mut Vec<String>) -> Result<()> {
        for (name, output) in &template.outputs {
            let location = format!("Outputs.{}", name);
            let serialized = serde_json::to_value(&output.value)?;

            for expression in collect_expressions(&serialized) {
                self.check_expression(template, &location, &expression)?;

                if let Expression::Ref(target) = &expression {
                    let echoes_secret = template
                        .get_parameter(target)
                        .map(|parameter| parameter.no_echo)
                        .unwrap_or(false);

                    if echoes_secret && !output.sensitive {
                        return Err(ValidationError::UnmarkedSensitiveOutput {
                            output: name.clone(),
                            parameter: target.clone(),
                        }
                        .into());
                    }
                }
            }

            if output.sensitive {
                let message = format!(
                    "Output '{}' surfaces a sensitive value in the stack outputs",
                    name
                );
                warn!("{}", message);
                warnings.push(message);
            }
        }

        Ok(())
    }
}

/// Walk a serialized section and collect every reference expression in it.
fn collect_expressions(value: &JsonValue) -> Vec<Expression> {
    let mut expressions = Vec::new();
    walk(value, &mut expressions);
    expressions
}

fn walk(value: &JsonValue, out: &mut Vec<Expression>) {
    match value {
        JsonValue::Object(map) => {
            if let Some(JsonValue::String(target)) = map.get("Ref") {
                out.push(Expression::Ref(target.clone()));
            }
            if let Some(JsonValue::Array(args)) = map.get("Fn::GetAtt") {
                if let Some(JsonValue::String(resource)) = args.first() {
                    out.push(Expression::GetAtt(resource.clone()));
                }
            }
            if let Some(JsonValue::Array(args)) = map.get("Fn::FindInMap") {
                if let Some(JsonValue::String(mapping)) = args.first() {
                    out.push(Expression::FindInMap(mapping.clone()));
                }
            }
            for nested in map.values() {
                walk(nested, out);
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                walk(item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::document::Output;
    use crate::template::error::TemplateError;
    use crate::template::parameter::Parameter;
    use crate::template::resource::{DbSubnetGroupProperties, Resource, ResourceKind};
    use crate::template::value::Value;

    fn subnet_group(subnet_ref: &str) -> Resource {
        Resource::new(ResourceKind::DbSubnetGroup(DbSubnetGroupProperties {
            db_subnet_group_description: "Database Subnet Group".to_string(),
            subnet_ids: vec![Value::reference(subnet_ref)],
            tags: Vec::new(),
        }))
    }

    fn assert_validation_error(
        result: Result<Vec<String>>,
        matcher: impl Fn(&ValidationError) -> bool,
    ) {
        match result {
            Err(TemplateError::ValidationError(error)) => assert!(matcher(&error)),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_template_passes() {
        let mut template = Template::new("test");
        template
            .add_parameter("DevOpsSubnetA", Parameter::string())
            .unwrap();
        template
            .add_resource("DBSNGroup", subnet_group("DevOpsSubnetA"))
            .unwrap();

        let warnings = TemplateValidator::new().validate(&template).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_reference_fails() {
        let mut template = Template::new("test");
        template
            .add_resource("DBSNGroup", subnet_group("MissingSubnet"))
            .unwrap();

        let result = TemplateValidator::new().validate(&template);
        assert_validation_error(result, |error| {
            matches!(error, ValidationError::UnknownReference { target, .. } if target == "MissingSubnet")
        });
    }

    #[test]
    fn test_pseudo_parameters_resolve() {
        let mut template = Template::new("test");
        template
            .add_output("StackName", Output::new(Value::stack_name()))
            .unwrap();
        // A template with no resources is still structurally checkable.
        TemplateValidator::new().validate(&template).unwrap();
    }

    #[test]
    fn test_unknown_depends_on_fails() {
        let mut template = Template::new("test");
        template
            .add_parameter("DevOpsSubnetA", Parameter::string())
            .unwrap();
        template
            .add_resource(
                "DBSNGroup",
                subnet_group("DevOpsSubnetA").with_depends_on("missing"),
            )
            .unwrap();

        let result = TemplateValidator::new().validate(&template);
        assert_validation_error(result, |error| {
            matches!(error, ValidationError::UnknownDependency { dependency, .. } if dependency == "missing")
        });
    }

    #[test]
    fn test_circular_depends_on_fails() {
        let mut template = Template::new("test");
        template
            .add_parameter("DevOpsSubnetA", Parameter::string())
            .unwrap();
        template
            .add_resource(
                "GroupA",
                subnet_group("DevOpsSubnetA").with_depends_on("GroupB"),
            )
            .unwrap();
        template
            .add_resource(
                "GroupB",
                subnet_group("DevOpsSubnetA").with_depends_on("GroupA"),
            )
            .unwrap();

        let result = TemplateValidator::new().validate(&template);
        assert_validation_error(result, |error| {
            matches!(error, ValidationError::CircularDependency { .. })
        });
    }

    #[test]
    fn test_unmarked_sensitive_output_fails() {
        let mut template = Template::new("test");
        template
            .add_parameter("MasterUserPassword", Parameter::string().no_echo())
            .unwrap();
        template
            .add_output(
                "MasterUserPassword",
                Output::new(Value::reference("MasterUserPassword")),
            )
            .unwrap();

        let result = TemplateValidator::new().validate(&template);
        assert_validation_error(result, |error| {
            matches!(error, ValidationError::UnmarkedSensitiveOutput { .. })
        });
    }

    #[test]
    fn test_marked_sensitive_output_warns() {
        let mut template = Template::new("test");
        template
            .add_parameter("MasterUserPassword", Parameter::string().no_echo())
            .unwrap();
        template
            .add_output(
                "MasterUserPassword",
                Output::new(Value::reference("MasterUserPassword")).sensitive(),
            )
            .unwrap();

        let warnings = TemplateValidator::new().validate(&template).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("MasterUserPassword"));
    }
}
