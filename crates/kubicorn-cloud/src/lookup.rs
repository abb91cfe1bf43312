//! Identity-by-tag lookups
//!
//! The provider has no foreign keys between objects, so every cross-resource
//! reference is resolved by filtering on a namespaced tag whose value is the
//! referenced entity's logical name. Cloud IDs are never used as the key
//! because they may not exist yet.
//!
//! A lookup that should identify one object must find exactly one. Zero or
//! several matches abort the caller; the first candidate is never picked.

use crate::error::{CloudError, Result};
use crate::provider::{Ec2Api, InternetGatewayInfo, RouteTableInfo, TagFilter};

/// Tag key naming the subnet a route table is paired with
pub const ROUTE_TABLE_SUBNET_PAIR_TAG: &str = "kubicorn-route-table-subnet-pair";

/// Tag key naming the cluster an internet gateway belongs to
pub const INTERNET_GATEWAY_NAME_TAG: &str = "kubicorn-internet-gateway-name";

pub const NAME_TAG: &str = "Name";
pub const CLUSTER_TAG: &str = "KubernetesCluster";

/// Take the single element of a lookup result, or fail with a cardinality fault
pub fn expect_one<T>(found: Vec<T>, resource: &'static str, filter: &TagFilter) -> Result<T> {
    let count = found.len();
    match <[T; 1]>::try_from(found) {
        Ok([one]) => Ok(one),
        Err(_) => Err(CloudError::Cardinality {
            resource,
            expected: 1,
            found: count,
            filter: filter.to_string(),
        }),
    }
}

/// Find the route table paired with a subnet
pub async fn route_table_for_subnet(
    client: &dyn Ec2Api,
    subnet_name: &str,
) -> Result<RouteTableInfo> {
    let filter = TagFilter::new(ROUTE_TABLE_SUBNET_PAIR_TAG, subnet_name);
    tracing::debug!("Looking up route table by {}", filter);
    let found = client.describe_route_tables(&filter).await?;
    expect_one(found, "route tables", &filter)
}

/// Find the internet gateway belonging to a cluster
pub async fn internet_gateway_for_cluster(
    client: &dyn Ec2Api,
    cluster_name: &str,
) -> Result<InternetGatewayInfo> {
    let filter = TagFilter::new(INTERNET_GATEWAY_NAME_TAG, cluster_name);
    tracing::debug!("Looking up internet gateway by {}", filter);
    let found = client.describe_internet_gateways(&filter).await?;
    expect_one(found, "internet gateways", &filter)
}
