//! Route table resource
//!
//! One route table per subnet. The table is paired with its subnet through
//! the `kubicorn-route-table-subnet-pair` tag, carries a default route to
//! the cluster's internet gateway, and is associated with the subnet.

use crate::cache::PassCache;
use crate::compare::is_equal;
use crate::error::{CloudError, Result};
use crate::lookup::{
    CLUSTER_TAG, NAME_TAG, ROUTE_TABLE_SUBNET_PAIR_TAG, internet_gateway_for_cluster,
    route_table_for_subnet,
};
use crate::model::{Cluster, Subnet};
use crate::provider::{Ec2Api, tag_list};
use crate::resource::Resource;
use crate::snapshot::{ResourceKind, Snapshot, Tags};
use async_trait::async_trait;

/// Destination of the default route
pub const DEFAULT_ROUTE_CIDR: &str = "0.0.0.0/0";

/// Route table bound to one subnet of one server pool
///
/// The pool and subnet are referenced by name and resolved against the
/// cluster passed into each operation, so identifiers written by sibling
/// resources earlier in the pass are always seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    name: String,
    server_pool: String,
    subnet: String,
}

impl RouteTable {
    pub fn new(
        name: impl Into<String>,
        server_pool: impl Into<String>,
        subnet: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            server_pool: server_pool.into(),
            subnet: subnet.into(),
        }
    }

    fn locate_subnet<'a>(&self, cluster: &'a Cluster) -> Result<&'a Subnet> {
        cluster.subnet(&self.server_pool, &self.subnet).ok_or_else(|| {
            CloudError::MissingPrerequisite(format!(
                "subnet [{}] of server pool [{}] is not in cluster [{}]",
                self.subnet, self.server_pool, cluster.name
            ))
        })
    }

    /// Cloud ID of the target subnet, which must already be realized
    fn subnet_id(&self, cluster: &Cluster) -> Result<String> {
        let subnet = self.locate_subnet(cluster)?;
        if !subnet.is_realized() {
            return Err(CloudError::MissingPrerequisite(format!(
                "unable to find subnet id for subnet [{}]",
                subnet.name
            )));
        }
        Ok(subnet.identifier.clone())
    }
}

#[async_trait]
impl Resource for RouteTable {
    fn kind(&self) -> ResourceKind {
        ResourceKind::RouteTable
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn actual(
        &self,
        client: &dyn Ec2Api,
        cache: &mut PassCache,
        known: &Cluster,
    ) -> Result<Snapshot> {
        tracing::debug!("Computing actual route table: {}", self.name);
        if let Some(cached) = cache.actual(self.kind(), &self.name) {
            tracing::debug!("Using cached actual route table: {}", self.name);
            return Ok(cached.clone());
        }

        let subnet = self.locate_subnet(known)?;

        // The table cannot exist before its subnet does.
        let actual = if subnet.is_realized() {
            let rt = route_table_for_subnet(client, &subnet.name).await?;
            Snapshot::new(self.kind(), &subnet.name)
                .with_cloud_id(&subnet.name)
                .with_tags(rt.tag_map())
        } else {
            Snapshot::new(self.kind(), &self.name)
        };

        cache.set_actual(&self.name, actual.clone());
        Ok(actual)
    }

    fn expected(&self, cache: &mut PassCache, known: &Cluster) -> Snapshot {
        tracing::debug!("Computing expected route table: {}", self.name);
        if let Some(cached) = cache.expected(self.kind(), &self.name) {
            tracing::debug!("Using cached expected route table: {}", self.name);
            return cached.clone();
        }

        let expected = Snapshot::new(self.kind(), &self.server_pool)
            .with_cloud_id(&self.server_pool)
            .with_tag(NAME_TAG, &self.server_pool)
            .with_tag(CLUSTER_TAG, &known.name)
            .with_tag(ROUTE_TABLE_SUBNET_PAIR_TAG, &self.subnet);

        cache.set_expected(&self.name, expected.clone());
        expected
    }

    async fn apply(
        &self,
        client: &dyn Ec2Api,
        actual: &Snapshot,
        expected: &Snapshot,
        cluster: &Cluster,
    ) -> Result<Snapshot> {
        tracing::debug!("Applying route table: {}", self.name);
        if is_equal(actual, expected)? {
            tracing::debug!("Route table {} is up to date", self.name);
            return Ok(expected.clone());
        }

        // Both prerequisites are local reads; check them before the first mutation.
        let vpc_id = &cluster.network.identifier;
        if vpc_id.is_empty() {
            return Err(CloudError::MissingPrerequisite(format!(
                "network identifier for cluster [{}]",
                cluster.name
            )));
        }
        let subnet_id = self.subnet_id(cluster)?;

        let route_table_id = client.create_route_table(vpc_id).await?;
        tracing::info!("Created route table: {}", route_table_id);

        let gateway = internet_gateway_for_cluster(client, &cluster.name).await?;
        tracing::info!(
            "Routing {} via internet gateway {}",
            route_table_id,
            gateway.internet_gateway_id
        );
        client
            .create_route(&route_table_id, DEFAULT_ROUTE_CIDR, &gateway.internet_gateway_id)
            .await?;

        client
            .associate_route_table(&route_table_id, &subnet_id)
            .await?;

        let created = Snapshot::new(self.kind(), &expected.name)
            .with_cloud_id(&route_table_id)
            .with_tags(expected.tags.clone());
        self.tag(client, &created, &expected.tags).await?;
        tracing::info!(
            "Associated route table {} with subnet {}",
            route_table_id,
            subnet_id
        );

        Ok(created)
    }

    async fn delete(
        &self,
        client: &dyn Ec2Api,
        actual: &Snapshot,
        _known: &Cluster,
    ) -> Result<Snapshot> {
        tracing::debug!("Deleting route table: {}", self.name);
        if !actual.is_created() {
            return Err(CloudError::MissingIdentifier(format!(
                "cannot delete route table {} before it is created",
                actual.name
            )));
        }

        let rt = route_table_for_subnet(client, &self.subnet).await?;

        match rt.associations.first() {
            Some(association) => {
                client
                    .disassociate_route_table(&association.association_id)
                    .await?;
            }
            None => {
                tracing::warn!(
                    "Route table {} has no association to detach",
                    rt.route_table_id
                );
            }
        }

        client.delete_route_table(&rt.route_table_id).await?;
        tracing::info!("Deleted route table: {}", rt.route_table_id);

        Ok(Snapshot::new(self.kind(), &actual.name).with_tags(actual.tags.clone()))
    }

    fn render(&self, _snapshot: &Snapshot, cluster: Cluster) -> Result<Cluster> {
        Ok(cluster)
    }

    async fn tag(&self, client: &dyn Ec2Api, target: &Snapshot, tags: &Tags) -> Result<()> {
        if !target.is_created() {
            return Err(CloudError::MissingIdentifier(format!(
                "cannot tag route table {} before it is created",
                target.name
            )));
        }

        for (key, value) in tags {
            tracing::debug!("Tagging {} with {}={}", target.cloud_id, key, value);
        }
        client.create_tags(&target.cloud_id, &tag_list(tags)).await
    }
}
