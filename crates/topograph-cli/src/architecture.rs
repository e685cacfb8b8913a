//! The HA web application topology.
//!
//! A Terraform-managed VPC with an application load balancer and NAT gateway
//! in the public subnets, an auto scaling group of two instances in the
//! private subnets, instances managed through SSM under an IAM role, and the
//! Terraform state backend (S3 bucket plus DynamoDB lock table) outside the
//! VPC.

use topograph::{
    TopologyBuilder,
    graph::GraphError,
    resource::ResourceKind,
    semantic::{Diagram, Direction},
};

pub const TITLE: &str = "HA Web Application Architecture";

/// Builds the architecture diagram.
///
/// # Errors
///
/// Fails only if the declarations below reference a node that does not exist.
pub fn ha_web_application() -> Result<Diagram, GraphError> {
    let mut builder = TopologyBuilder::new(TITLE).with_direction(Direction::TopBottom);
    declare(&mut builder)?;
    Ok(builder.finish())
}

/// Declares the topology's nodes, clusters and edges on `builder`.
pub fn declare(builder: &mut TopologyBuilder) -> Result<(), GraphError> {
    builder.node("s3", ResourceKind::StorageBucket, "Terraform State S3 Bucket")?;
    builder.node("dynamodb", ResourceKind::LockTable, "State Lock Table")?;

    builder.cluster("VPC", |vpc| {
        vpc.cluster("Public Subnets", |public| {
            public.node("alb", ResourceKind::LoadBalancer, "Application Load Balancer")?;
            public.node("nat", ResourceKind::NatGateway, "NAT Gateway")?;
            Ok(())
        })?;

        vpc.cluster("Private Subnets", |private| {
            private.node("asg", ResourceKind::AutoScalingGroup, "Auto Scaling Group")?;
            private.node("ec2_1", ResourceKind::ComputeInstance, "App Instance 1")?;
            private.node("ec2_2", ResourceKind::ComputeInstance, "App Instance 2")?;
            private.fan_out("asg", ["ec2_1", "ec2_2"])
        })?;

        vpc.edge("alb", "asg")?;

        vpc.node("ssm", ResourceKind::ManagementAgent, "AWS SSM")?;
        vpc.node("iam", ResourceKind::IamRole, "EC2 SSM Role")?;
        vpc.fan_in(["ec2_1", "ec2_2"], "ssm")?;
        vpc.fan_out("iam", ["ec2_1", "ec2_2"])
    })?;

    builder.node("tf_cli", ResourceKind::Rack, "Terraform CLI")?;
    builder.fan_out("tf_cli", ["s3", "dynamodb"])
}
