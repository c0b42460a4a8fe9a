// ABOUTME: Property value model including CloudFormation intrinsic functions
// ABOUTME: Defines the Value enum for literals, references, and Fn:: expressions

use indexmap::IndexMap;
use serde::Serialize;

/// Pseudo parameter resolving to the name of the enclosing stack.
pub const PSEUDO_STACK_NAME: &str = "AWS::StackName";

/// Pseudo parameter resolving to the region the stack is deployed into.
pub const PSEUDO_REGION: &str = "AWS::Region";

/// Pseudo parameters CloudFormation resolves without a declaration.
pub const PSEUDO_PARAMETERS: &[&str] = &[
    "AWS::AccountId",
    "AWS::NoValue",
    "AWS::Partition",
    "AWS::Region",
    "AWS::StackId",
    "AWS::StackName",
    "AWS::URLSuffix",
];

/// A property value in a template: a literal, a collection, or a reference
/// expression resolved by CloudFormation at deploy time. The intrinsic
/// variants serialize to the `{"Ref": ...}` / `{"Fn::...": ...}` forms the
/// provisioning engine expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    Number(i64),
    Ref {
        #[serde(rename = "Ref")]
        target: String,
    },
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        target: (String, String),
    },
    Join {
        #[serde(rename = "Fn::Join")]
        parts: (String, Vec<Value>),
    },
    Base64 {
        #[serde(rename = "Fn::Base64")]
        content: Box<Value>,
    },
    FindInMap {
        #[serde(rename = "Fn::FindInMap")]
        lookup: (String, Box<Value>, String),
    },
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Reference to a parameter or resource declared in the same document.
    pub fn reference(target: impl Into<String>) -> Self {
        Value::Ref {
            target: target.into(),
        }
    }

    /// Attribute lookup on a resource (`Fn::GetAtt`).
    pub fn get_att(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Value::GetAtt {
            target: (resource.into(), attribute.into()),
        }
    }

    /// Concatenate values with a separator (`Fn::Join`).
    pub fn join(separator: impl Into<String>, parts: Vec<Value>) -> Self {
        Value::Join {
            parts: (separator.into(), parts),
        }
    }

    /// Base64-encode a value at deploy time (`Fn::Base64`).
    pub fn base64(content: Value) -> Self {
        Value::Base64 {
            content: Box::new(content),
        }
    }

    /// Two-level mapping lookup (`Fn::FindInMap`). The top-level key may
    /// itself be a reference, e.g. `AWS::Region`.
    pub fn find_in_map(
        mapping: impl Into<String>,
        top_level_key: Value,
        second_level_key: impl Into<String>,
    ) -> Self {
        Value::FindInMap {
            lookup: (mapping.into(), Box::new(top_level_key), second_level_key.into()),
        }
    }

    /// Reference to the enclosing stack's name.
    pub fn stack_name() -> Self {
        Self::reference(PSEUDO_STACK_NAME)
    }

    /// Reference to the deployment region.
    pub fn region() -> Self {
        Self::reference(PSEUDO_REGION)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
