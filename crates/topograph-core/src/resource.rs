//! Resource kinds that a diagram node can depict.
//!
//! A [`ResourceKind`] carries everything the exporter needs to draw a node
//! without an icon set: a Graphviz shape and a fill color per service
//! category. When an icon directory is configured, [`ResourceKind::icon_path`]
//! names the image inside it.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::Deserialize;

/// Service category, mirroring how cloud providers group their icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Network,
    Compute,
    Management,
    Security,
    Storage,
    Database,
    Generic,
}

impl Category {
    /// Lower-case directory name used in icon paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Compute => "compute",
            Self::Management => "management",
            Self::Security => "security",
            Self::Storage => "storage",
            Self::Database => "database",
            Self::Generic => "compute",
        }
    }

    /// Fill color used when no icon is available.
    pub fn fill_color(self) -> &'static str {
        match self {
            Self::Network => "#E6DBFF",
            Self::Compute => "#FFE3C7",
            Self::Management => "#FBD3E6",
            Self::Security => "#F8D6DB",
            Self::Storage => "#E1EDC9",
            Self::Database => "#F3D4F5",
            Self::Generic => "#E8E8E8",
        }
    }
}

/// Kind of infrastructure resource a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    LoadBalancer,
    NatGateway,
    AutoScalingGroup,
    ComputeInstance,
    ManagementAgent,
    IamRole,
    StorageBucket,
    LockTable,
    Rack,
}

impl ResourceKind {
    /// All kinds, in declaration order.
    pub const ALL: [ResourceKind; 9] = [
        Self::LoadBalancer,
        Self::NatGateway,
        Self::AutoScalingGroup,
        Self::ComputeInstance,
        Self::ManagementAgent,
        Self::IamRole,
        Self::StorageBucket,
        Self::LockTable,
        Self::Rack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadBalancer => "load_balancer",
            Self::NatGateway => "nat_gateway",
            Self::AutoScalingGroup => "auto_scaling_group",
            Self::ComputeInstance => "compute_instance",
            Self::ManagementAgent => "management_agent",
            Self::IamRole => "iam_role",
            Self::StorageBucket => "storage_bucket",
            Self::LockTable => "lock_table",
            Self::Rack => "rack",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::LoadBalancer | Self::NatGateway => Category::Network,
            Self::AutoScalingGroup | Self::ComputeInstance => Category::Compute,
            Self::ManagementAgent => Category::Management,
            Self::IamRole => Category::Security,
            Self::StorageBucket => Category::Storage,
            Self::LockTable => Category::Database,
            Self::Rack => Category::Generic,
        }
    }

    /// Graphviz shape used when the node is drawn without an icon.
    pub fn shape(self) -> &'static str {
        match self {
            Self::StorageBucket | Self::LockTable => "cylinder",
            Self::Rack => "box3d",
            Self::IamRole => "note",
            _ => "box",
        }
    }

    /// Icon location relative to an icon directory, e.g. `aws/network/nat-gateway.png`.
    pub fn icon_path(self) -> PathBuf {
        let provider = match self.category() {
            Category::Generic => "generic",
            _ => "aws",
        };
        let file = match self {
            Self::LoadBalancer => "elastic-load-balancing-application-load-balancer.png",
            Self::NatGateway => "nat-gateway.png",
            Self::AutoScalingGroup => "ec2-auto-scaling.png",
            Self::ComputeInstance => "ec2.png",
            Self::ManagementAgent => "systems-manager.png",
            Self::IamRole => "identity-and-access-management-iam-role.png",
            Self::StorageBucket => "simple-storage-service-s3.png",
            Self::LockTable => "dynamodb.png",
            Self::Rack => "rack.png",
        };
        [provider, self.category().as_str(), file].iter().collect()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown resource kind `{s}`"))
    }
}
