//! Point-in-time views of a managed resource

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag mapping attached to a cloud object
pub type Tags = BTreeMap<String, String>;

/// Kind of managed resource
///
/// Sibling kinds are reconciled by their own implementations; they are
/// listed here so snapshots and cache entries of every kind share one key
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Network,
    Subnet,
    ServerPool,
    InternetGateway,
    RouteTable,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Network => write!(f, "network"),
            ResourceKind::Subnet => write!(f, "subnet"),
            ResourceKind::ServerPool => write!(f, "server-pool"),
            ResourceKind::InternetGateway => write!(f, "internet-gateway"),
            ResourceKind::RouteTable => write!(f, "route-table"),
        }
    }
}

/// Observed or desired state of one resource
///
/// An empty `cloud_id` means the object does not exist remotely yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kind: ResourceKind,

    /// Logical name
    pub name: String,

    /// Provider-assigned identifier, empty until created
    pub cloud_id: String,

    pub tags: Tags,
}

impl Snapshot {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            cloud_id: String::new(),
            tags: Tags::new(),
        }
    }

    pub fn with_cloud_id(mut self, cloud_id: impl Into<String>) -> Self {
        self.cloud_id = cloud_id.into();
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Whether the snapshot refers to an object that exists remotely
    pub fn is_created(&self) -> bool {
        !self.cloud_id.is_empty()
    }
}
