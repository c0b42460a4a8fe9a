// ABOUTME: Typed resource declarations for the provisioned entity kinds
// ABOUTME: Defines the ResourceKind tagged enum and per-kind property structs

use serde::Serialize;

use super::value::Value;

/// A provisioned entity: a tagged kind with its typed properties plus the
/// resource-level attributes CloudFormation understands (`DependsOn`,
/// `CreationPolicy`).
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    #[serde(flatten)]
    pub kind: ResourceKind,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(rename = "CreationPolicy", skip_serializing_if = "Option::is_none")]
    pub creation_policy: Option<CreationPolicy>,
}

impl Resource {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            depends_on: Vec::new(),
            creation_policy: None,
        }
    }

    pub fn with_depends_on(mut self, resource: impl Into<String>) -> Self {
        self.depends_on.push(resource.into());
        self
    }

    pub fn with_creation_policy(mut self, policy: CreationPolicy) -> Self {
        self.creation_policy = Some(policy);
        self
    }

    /// The provider type tag for this resource, e.g. `AWS::RDS::DBInstance`.
    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }
}

impl From<ResourceKind> for Resource {
    fn from(kind: ResourceKind) -> Self {
        Self::new(kind)
    }
}

/// The resource kinds this builder can declare, tagged with the provider
/// type string. Keeping properties in per-kind structs pushes provider
/// schema errors to build time instead of apply time.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum ResourceKind {
    #[serde(rename = "AWS::EC2::SecurityGroup")]
    SecurityGroup(SecurityGroupProperties),
    #[serde(rename = "AWS::RDS::DBSubnetGroup")]
    DbSubnetGroup(DbSubnetGroupProperties),
    #[serde(rename = "AWS::RDS::DBInstance")]
    DbInstance(Box<DbInstanceProperties>),
    #[serde(rename = "AWS::EC2::Instance")]
    Ec2Instance(Ec2InstanceProperties),
}

impl ResourceKind {
    pub fn type_tag(&self) -> &'static str {
        match self {
            ResourceKind::SecurityGroup(_) => "AWS::EC2::SecurityGroup",
            ResourceKind::DbSubnetGroup(_) => "AWS::RDS::DBSubnetGroup",
            ResourceKind::DbInstance(_) => "AWS::RDS::DBInstance",
            ResourceKind::Ec2Instance(_) => "AWS::EC2::Instance",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroupProperties {
    pub group_description: String,
    pub vpc_id: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_group_ingress: Vec<SecurityGroupRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_group_egress: Vec<SecurityGroupRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// One ingress or egress rule. Ports and protocol are kept as strings, the
/// form the provisioning engine accepts for these fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroupRule {
    pub cidr_ip: Value,
    pub ip_protocol: String,
    pub from_port: String,
    pub to_port: String,
}

impl SecurityGroupRule {
    pub fn new(
        ip_protocol: impl Into<String>,
        from_port: impl Into<String>,
        to_port: impl Into<String>,
        cidr_ip: impl Into<Value>,
    ) -> Self {
        Self {
            cidr_ip: cidr_ip.into(),
            ip_protocol: ip_protocol.into(),
            from_port: from_port.into(),
            to_port: to_port.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbSubnetGroupProperties {
    #[serde(rename = "DBSubnetGroupDescription")]
    pub db_subnet_group_description: String,
    pub subnet_ids: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbInstanceProperties {
    pub allocated_storage: String,
    pub allow_major_version_upgrade: String,
    pub auto_minor_version_upgrade: String,
    pub backup_retention_period: String,
    pub preferred_backup_window: String,
    pub copy_tags_to_snapshot: String,
    #[serde(rename = "DBInstanceClass")]
    pub db_instance_class: Value,
    #[serde(rename = "DBSubnetGroupName")]
    pub db_subnet_group_name: Value,
    #[serde(rename = "DBName")]
    pub db_name: Value,
    pub engine: String,
    pub engine_version: Value,
    pub master_username: Value,
    pub master_user_password: Value,
    #[serde(rename = "MultiAZ")]
    pub multi_az: Value,
    pub publicly_accessible: String,
    #[serde(rename = "VPCSecurityGroups")]
    pub vpc_security_groups: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ec2InstanceProperties {
    pub image_id: Value,
    pub instance_type: String,
    pub key_name: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_group_ids: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// A single `{Key, Value}` entry in a resource tag set. Values may be
/// reference expressions, e.g. a join over the stack name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: Value,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreationPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_signal: Option<ResourceSignal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceSignal {
    pub timeout: String,
}

impl CreationPolicy {
    /// Wait for a resource signal before marking the resource created.
    pub fn resource_signal(timeout: impl Into<String>) -> Self {
        Self {
            resource_signal: Some(ResourceSignal {
                timeout: timeout.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_name_tag() -> Tag {
        Tag::new(
            "Name",
            Value::join("", vec![Value::stack_name(), Value::from(" resource")]),
        )
    }

    #[test]
    fn test_security_group_serialization() {
        let resource = Resource::new(ResourceKind::SecurityGroup(SecurityGroupProperties {
            group_description: "Allow everything".to_string(),
            vpc_id: Value::reference("DevOpsVPC"),
            security_group_ingress: vec![SecurityGroupRule::new("-1", "5432", "5432", "0.0.0.0/0")],
            security_group_egress: vec![SecurityGroupRule::new("-1", "0", "65535", "0.0.0.0/0")],
            tags: vec![stack_name_tag()],
        }));

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["Type"], "AWS::EC2::SecurityGroup");
        assert_eq!(json["Properties"]["GroupDescription"], "Allow everything");
        assert_eq!(
            json["Properties"]["VpcId"],
            serde_json::json!({ "Ref": "DevOpsVPC" })
        );
        assert_eq!(
            json["Properties"]["SecurityGroupIngress"][0]["FromPort"],
            "5432"
        );
        assert_eq!(json["Properties"]["SecurityGroupEgress"][0]["ToPort"], "65535");
    }

    #[test]
    fn test_resource_attributes_serialization() {
        let resource = Resource::new(ResourceKind::DbSubnetGroup(DbSubnetGroupProperties {
            db_subnet_group_description: "Database Subnet Group".to_string(),
            subnet_ids: vec![Value::reference("DevOpsSubnetA")],
            tags: Vec::new(),
        }))
        .with_depends_on("sb-pgsql-sg")
        .with_creation_policy(CreationPolicy::resource_signal("PT5M"));

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["DependsOn"], serde_json::json!(["sb-pgsql-sg"]));
        assert_eq!(
            json["CreationPolicy"]["ResourceSignal"]["Timeout"],
            "PT5M"
        );
        assert_eq!(
            json["Properties"]["DBSubnetGroupDescription"],
            "Database Subnet Group"
        );
    }

    #[test]
    fn test_attributes_omitted_when_unset() {
        let resource = Resource::new(ResourceKind::DbSubnetGroup(DbSubnetGroupProperties {
            db_subnet_group_description: "Database Subnet Group".to_string(),
            subnet_ids: vec![Value::reference("DevOpsSubnetA")],
            tags: Vec::new(),
        }));

        let json = serde_json::to_value(&resource).unwrap();
        assert!(json.get("DependsOn").is_none());
        assert!(json.get("CreationPolicy").is_none());
        assert!(json["Properties"].get("Tags").is_none());
    }

    #[test]
    fn test_db_instance_field_casing() {
        let resource = Resource::new(ResourceKind::DbInstance(Box::new(DbInstanceProperties {
            allocated_storage: "30".to_string(),
            allow_major_version_upgrade: "false".to_string(),
            auto_minor_version_upgrade: "false".to_string(),
            backup_retention_period: "7".to_string(),
            preferred_backup_window: "11:15-12:15".to_string(),
            copy_tags_to_snapshot: "true".to_string(),
            db_instance_class: Value::reference("DBInstanceClass"),
            db_subnet_group_name: Value::reference("DBSNGroup"),
            db_name: Value::reference("DBName"),
            engine: "postgres".to_string(),
            engine_version: Value::reference("EngineVersion"),
            master_username: Value::reference("MasterUsername"),
            master_user_password: Value::reference("MasterUserPassword"),
            multi_az: Value::reference("MultiAZ"),
            publicly_accessible: "false".to_string(),
            vpc_security_groups: vec![Value::reference("sb-pgsql-sg")],
            tags: vec![stack_name_tag()],
        })));

        let json = serde_json::to_value(&resource).unwrap();
        let properties = &json["Properties"];

        // The provider spells these with irregular capitalisation.
        assert!(properties.get("DBInstanceClass").is_some());
        assert!(properties.get("DBSubnetGroupName").is_some());
        assert!(properties.get("DBName").is_some());
        assert!(properties.get("MultiAZ").is_some());
        assert!(properties.get("VPCSecurityGroups").is_some());
        assert_eq!(properties["Engine"], "postgres");
    }
}
