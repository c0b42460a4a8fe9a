// ABOUTME: Typed CloudFormation template model for stackforge
// ABOUTME: Provides document construction, reference expressions, and validation

pub mod document;
pub mod error;
pub mod parameter;
pub mod resource;
pub mod validation;
pub mod value;

pub use document::{Mapping, Output, Template, FORMAT_VERSION};
pub use error::{Result, TemplateError, ValidationError};
pub use parameter::{Parameter, ParameterType};
pub use resource::{
    CreationPolicy, DbInstanceProperties, DbSubnetGroupProperties, Ec2InstanceProperties,
    Resource, ResourceKind, ResourceSignal, SecurityGroupProperties, SecurityGroupRule, Tag,
};
pub use validation::TemplateValidator;
pub use value::Value;
