// ABOUTME: Stack definition for a managed PostgreSQL database
// ABOUTME: Declares the database instance, its security group, and subnet group

use crate::template::error::Result;
use crate::template::{
    DbInstanceProperties, DbSubnetGroupProperties, Output, Parameter, Resource, ResourceKind,
    SecurityGroupProperties, SecurityGroupRule, Tag, Template, Value,
};

use super::StackDefinition;

const PROJECT_TAG: &str = "Solar";
const COST_CENTRE_TAG: &str = "Solar";

/// A PostgreSQL RDS instance placed in an existing VPC, with a security
/// group open on the database port and a subnet group spanning three
/// subnets. The master password is deliberately republished as a stack
/// output; the output carries the sensitive marker so the choice is audited
/// by the validator rather than slipping through.
pub struct PostgresqlStack;

impl PostgresqlStack {
    /// `Name` tag shared by every resource in this stack.
    fn name_tag() -> Tag {
        Tag::new(
            "Name",
            Value::join("", vec![Value::stack_name(), Value::from(" resource")]),
        )
    }
}

impl StackDefinition for PostgresqlStack {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn description(&self) -> &'static str {
        "Managed PostgreSQL database with security group and subnet group"
    }

    fn build(&self) -> Result<Template> {
        let mut template = Template::new("PostgreSQL");

        template.add_parameter(
            "DevOpsVPC",
            Parameter::string().with_description("ID of the VPC to use"),
        )?;
        template.add_parameter(
            "DevOpsSubnetA",
            Parameter::string().with_description("ID of a subnet to use"),
        )?;
        template.add_parameter(
            "DevOpsSubnetB",
            Parameter::string().with_description("ID of a subnet to use"),
        )?;
        template.add_parameter(
            "DevOpsSubnetC",
            Parameter::string().with_description("ID of a subnet to use"),
        )?;
        template.add_parameter("DBName", Parameter::string())?;
        template.add_parameter("MasterUsername", Parameter::string())?;
        template.add_parameter("MasterUserPassword", Parameter::string().no_echo())?;
        template.add_parameter("EngineVersion", Parameter::string())?;
        template.add_parameter("MultiAZ", Parameter::string().with_default("false"))?;
        template.add_parameter(
            "DBInstanceClass",
            Parameter::string().with_default("db.t2.medium"),
        )?;

        template.add_resource(
            "sb-pgsql-sg",
            Resource::new(ResourceKind::SecurityGroup(SecurityGroupProperties {
                group_description: "Allow everything".to_string(),
                vpc_id: Value::reference("DevOpsVPC"),
                security_group_ingress: vec![SecurityGroupRule::new(
                    "-1", "5432", "5432", "0.0.0.0/0",
                )],
                security_group_egress: vec![SecurityGroupRule::new(
                    "-1", "0", "65535", "0.0.0.0/0",
                )],
                tags: vec![Self::name_tag()],
            })),
        )?;

        template.add_resource(
            "DBSNGroup",
            Resource::new(ResourceKind::DbSubnetGroup(DbSubnetGroupProperties {
                db_subnet_group_description: "Database Subnet Group".to_string(),
                subnet_ids: vec![
                    Value::reference("DevOpsSubnetA"),
                    Value::reference("DevOpsSubnetB"),
                    Value::reference("DevOpsSubnetC"),
                ],
                tags: vec![Self::name_tag()],
            })),
        )?;

        template.add_resource(
            "sb-pgsql-db",
            Resource::new(ResourceKind::DbInstance(Box::new(DbInstanceProperties {
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
                tags: vec![
                    Self::name_tag(),
                    Tag::new("Project", PROJECT_TAG),
                    Tag::new("CostCentre", COST_CENTRE_TAG),
                ],
            }))),
        )?;

        template.add_output(
            "DBEndpoint",
            Output::new(Value::get_att("sb-pgsql-db", "Endpoint.Address")),
        )?;
        template.add_output("DBName", Output::new(Value::reference("DBName")))?;
        template.add_output(
            "MasterUsername",
            Output::new(Value::reference("MasterUsername")),
        )?;
        template.add_output(
            "MasterUserPassword",
            Output::new(Value::reference("MasterUserPassword")).sensitive(),
        )?;

        Ok(template)
    }
}
