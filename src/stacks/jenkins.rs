// ABOUTME: Stack definition for a single-instance Jenkins master
// ABOUTME: Declares the EC2 instance, its security group, and a region AMI mapping

use indexmap::IndexMap;

use crate::template::error::Result;
use crate::template::{
    CreationPolicy, Ec2InstanceProperties, Mapping, Output, Parameter, Resource, ResourceKind,
    SecurityGroupProperties, SecurityGroupRule, Tag, Template, Value,
};

use super::StackDefinition;

const CIDR_PATTERN: &str = r"(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})";

/// An EC2 Jenkins master reachable over SSH and the Jenkins HTTP port, with
/// the AMI resolved per region through a mapping. The instance signals the
/// provisioning engine once its boot script finishes.
pub struct JenkinsStack;

impl JenkinsStack {
    fn instance_tags() -> Vec<Tag> {
        vec![
            Tag::new("Name", "jenkins-master"),
            Tag::new("Role", "jenkins"),
            Tag::new("Owner", "Peter Brown"),
            Tag::new("Env", "dev"),
        ]
    }

    fn region_map() -> Mapping {
        let mut amis = IndexMap::new();
        amis.insert("AMI".to_string(), "ami-559bb136".to_string());

        let mut mapping = IndexMap::new();
        mapping.insert("ap-southeast-2".to_string(), amis);
        mapping
    }

    /// Boot script that reports back to the provisioning engine so the
    /// creation policy can observe the signal.
    fn user_data() -> Value {
        Value::base64(Value::join(
            "",
            vec![
                Value::from("#!/bin/bash -xe\n"),
                Value::from("/opt/aws/bin/cfn-signal -e $? "),
                Value::from("         --stack "),
                Value::stack_name(),
                Value::from("         --resource JenkinsInstance"),
                Value::from("         --region "),
                Value::region(),
                Value::from("\n"),
            ],
        ))
    }
}

impl StackDefinition for JenkinsStack {
    fn name(&self) -> &'static str {
        "jenkins"
    }

    fn description(&self) -> &'static str {
        "EC2 Jenkins master with SSH and HTTP access"
    }

    fn build(&self) -> Result<Template> {
        let mut template = Template::new("Configures an EC2 jenkins master");

        template.add_parameter(
            "KeyName",
            Parameter::string().with_description(
                "Name of an existing ec2 keypair to enable SSH access to instance",
            ),
        )?;
        template.add_parameter(
            "SSHLocation",
            Parameter::string()
                .with_description("The IP address range that can be used to SSH to the EC2 instances")
                .with_default("0.0.0.0/0")
                .with_length_bounds(9, 18)
                .with_allowed_pattern(CIDR_PATTERN)
                .with_constraint_description(
                    "must be a valid IP CIDR range of the form x.x.x.x/x.",
                ),
        )?;
        template.add_parameter(
            "VpcId",
            Parameter::string()
                .with_description("VpcId of your existing Virtual Private Cloud (VPC)"),
        )?;

        template.add_mapping("RegionMap", Self::region_map())?;

        template.add_resource(
            "JenkinsSecurityGroup",
            Resource::new(ResourceKind::SecurityGroup(SecurityGroupProperties {
                group_description: "Enable SSH access via port 22".to_string(),
                vpc_id: Value::reference("VpcId"),
                security_group_ingress: vec![
                    SecurityGroupRule::new("tcp", "22", "22", Value::reference("SSHLocation")),
                    SecurityGroupRule::new("tcp", "8080", "8080", Value::reference("SSHLocation")),
                ],
                security_group_egress: Vec::new(),
                tags: Self::instance_tags(),
            })),
        )?;

        template.add_resource(
            "JenkinsInstance",
            Resource::new(ResourceKind::Ec2Instance(Ec2InstanceProperties {
                image_id: Value::find_in_map("RegionMap", Value::region(), "AMI"),
                instance_type: "t2.micro".to_string(),
                key_name: Value::reference("KeyName"),
                security_group_ids: vec![Value::reference("JenkinsSecurityGroup")],
                user_data: Some(Self::user_data()),
                tags: Self::instance_tags(),
            }))
            .with_creation_policy(CreationPolicy::resource_signal("PT5M")),
        )?;

        template.add_output(
            "InstanceId",
            Output::new(Value::reference("JenkinsInstance"))
                .with_description("InstanceId of the newly created EC2 instance"),
        )?;
        template.add_output(
            "AZ",
            Output::new(Value::get_att("JenkinsInstance", "AvailabilityZone"))
                .with_description("Availability Zone of the newly created EC2 instance"),
        )?;
        template.add_output(
            "PublicIP",
            Output::new(Value::get_att("JenkinsInstance", "PublicIp"))
                .with_description("Public IP address of the newly created EC2 instance"),
        )?;
        template.add_output(
            "PrivateIP",
            Output::new(Value::get_att("JenkinsInstance", "PrivateIp"))
                .with_description("Private IP address of the newly created EC2 instance"),
        )?;
        template.add_output(
            "PublicDNS",
            Output::new(Value::get_att("JenkinsInstance", "PublicDnsName"))
                .with_description("Public DNSName of the newly created EC2 instance"),
        )?;
        template.add_output(
            "PrivateDNS",
            Output::new(Value::get_att("JenkinsInstance", "PrivateDnsName"))
                .with_description("Private DNSName of the newly created EC2 instance"),
        )?;

        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateValidator;

    #[test]
    fn test_builds_and_validates_cleanly() {
        let template = JenkinsStack.build().unwrap();
        let warnings = TemplateValidator::new().validate(&template).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_region_mapping_present() {
        let template = JenkinsStack.build().unwrap();
        let mapping = template.mappings.get("RegionMap").unwrap();
        assert_eq!(
            mapping["ap-southeast-2"]["AMI"],
            "ami-559bb136".to_string()
        );
    }

    #[test]
    fn test_instance_has_creation_policy_and_six_outputs() {
        let template = JenkinsStack.build().unwrap();

        let instance = template.get_resource("JenkinsInstance").unwrap();
        let policy = instance.creation_policy.as_ref().unwrap();
        assert_eq!(
            policy.resource_signal.as_ref().unwrap().timeout,
            "PT5M"
        );

        assert_eq!(template.outputs.len(), 6);
    }

    #[test]
    fn test_ssh_location_constraints() {
        let template = JenkinsStack.build().unwrap();
        let parameter = template.get_parameter("SSHLocation").unwrap();
        assert_eq!(parameter.min_length, Some(9));
        assert_eq!(parameter.max_length, Some(18));
        assert_eq!(parameter.default.as_deref(), Some("0.0.0.0/0"));
        assert!(parameter.allowed_pattern.is_some());
    }
}
