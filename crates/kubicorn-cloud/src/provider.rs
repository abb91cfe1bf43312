//! Cloud provider client trait definition

use crate::error::Result;
use crate::snapshot::Tags;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The subset of the EC2 API that route table reconciliation consumes
///
/// The driver constructs one client and passes it into every resource
/// operation. Calls are issued one at a time; each is awaited before the
/// next is made.
#[async_trait]
pub trait Ec2Api: Send + Sync {
    /// Describe route tables carrying the given tag
    async fn describe_route_tables(&self, filter: &TagFilter) -> Result<Vec<RouteTableInfo>>;

    /// Create a route table in a VPC, returning its ID
    async fn create_route_table(&self, vpc_id: &str) -> Result<String>;

    /// Add a route from a route table to a gateway
    async fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr: &str,
        gateway_id: &str,
    ) -> Result<()>;

    /// Describe internet gateways carrying the given tag
    async fn describe_internet_gateways(
        &self,
        filter: &TagFilter,
    ) -> Result<Vec<InternetGatewayInfo>>;

    /// Associate a route table with a subnet, returning the association ID
    async fn associate_route_table(&self, route_table_id: &str, subnet_id: &str)
    -> Result<String>;

    async fn disassociate_route_table(&self, association_id: &str) -> Result<()>;

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()>;

    /// Attach tags to any provider object
    async fn create_tags(&self, resource_id: &str, tags: &[Tag]) -> Result<()>;
}

/// Filter matching objects whose tag `key` equals `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Filter name in the provider's `tag:<key>` syntax
    pub fn filter_name(&self) -> String {
        format!("tag:{}", self.key)
    }

    /// Whether a tag list satisfies this filter
    pub fn matches(&self, tags: &[Tag]) -> bool {
        tags.iter().any(|t| t.key == self.key && t.value == self.value)
    }
}

impl std::fmt::Display for TagFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tag:{}={}", self.key, self.value)
    }
}

/// A single key/value tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Convert a tag mapping into the provider's list form
pub fn tag_list(tags: &Tags) -> Vec<Tag> {
    tags.iter().map(|(k, v)| Tag::new(k, v)).collect()
}

/// Route table as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableInfo {
    pub route_table_id: String,

    pub tags: Vec<Tag>,

    /// Subnet associations in the order the provider reports them
    pub associations: Vec<RouteTableAssociation>,
}

impl RouteTableInfo {
    /// Tags as a mapping; later duplicates win
    pub fn tag_map(&self) -> Tags {
        self.tags
            .iter()
            .map(|t| (t.key.clone(), t.value.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableAssociation {
    pub association_id: String,

    pub subnet_id: Option<String>,
}

/// Internet gateway as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternetGatewayInfo {
    pub internet_gateway_id: String,

    pub tags: Vec<Tag>,
}
