//! Resource reconciliation contract
//!
//! A driver reconciles one resource per pass:
//!
//! ```text
//! actual ──► expected ──► is_equal? ──yes──► unchanged
//!                              │
//!                              no
//!                              ▼
//!                            apply
//! ```
//!
//! `delete` is invoked on its own during teardown.

use crate::cache::PassCache;
use crate::error::Result;
use crate::model::Cluster;
use crate::provider::Ec2Api;
use crate::route_table::RouteTable;
use crate::snapshot::{ResourceKind, Snapshot, Tags};
use async_trait::async_trait;

/// Capability set shared by every resource kind
#[async_trait]
pub trait Resource: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Logical name, used as the cache key
    fn name(&self) -> &str;

    /// Observe what currently exists remotely, cached for the pass
    async fn actual(
        &self,
        client: &dyn Ec2Api,
        cache: &mut PassCache,
        known: &Cluster,
    ) -> Result<Snapshot>;

    /// Derive what should exist from the cluster model, cached for the pass
    fn expected(&self, cache: &mut PassCache, known: &Cluster) -> Snapshot;

    /// Converge remote state on `expected`, returning the resulting snapshot
    async fn apply(
        &self,
        client: &dyn Ec2Api,
        actual: &Snapshot,
        expected: &Snapshot,
        cluster: &Cluster,
    ) -> Result<Snapshot>;

    /// Remove the remote object, returning the snapshot with its cloud ID cleared
    async fn delete(&self, client: &dyn Ec2Api, actual: &Snapshot, known: &Cluster)
    -> Result<Snapshot>;

    /// Write identifiers derived from `snapshot` back into the cluster model
    fn render(&self, snapshot: &Snapshot, cluster: Cluster) -> Result<Cluster>;

    /// Attach tags to the object addressed by `target.cloud_id`
    async fn tag(&self, client: &dyn Ec2Api, target: &Snapshot, tags: &Tags) -> Result<()>;
}

/// Closed set of resource kinds implemented by this crate
#[derive(Debug, Clone)]
pub enum AnyResource {
    RouteTable(RouteTable),
}

impl From<RouteTable> for AnyResource {
    fn from(resource: RouteTable) -> Self {
        AnyResource::RouteTable(resource)
    }
}

impl AnyResource {
    fn inner(&self) -> &dyn Resource {
        match self {
            AnyResource::RouteTable(r) => r,
        }
    }
}

#[async_trait]
impl Resource for AnyResource {
    fn kind(&self) -> ResourceKind {
        self.inner().kind()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    async fn actual(
        &self,
        client: &dyn Ec2Api,
        cache: &mut PassCache,
        known: &Cluster,
    ) -> Result<Snapshot> {
        self.inner().actual(client, cache, known).await
    }

    fn expected(&self, cache: &mut PassCache, known: &Cluster) -> Snapshot {
        self.inner().expected(cache, known)
    }

    async fn apply(
        &self,
        client: &dyn Ec2Api,
        actual: &Snapshot,
        expected: &Snapshot,
        cluster: &Cluster,
    ) -> Result<Snapshot> {
        self.inner().apply(client, actual, expected, cluster).await
    }

    async fn delete(
        &self,
        client: &dyn Ec2Api,
        actual: &Snapshot,
        known: &Cluster,
    ) -> Result<Snapshot> {
        self.inner().delete(client, actual, known).await
    }

    fn render(&self, snapshot: &Snapshot, cluster: Cluster) -> Result<Cluster> {
        self.inner().render(snapshot, cluster)
    }

    async fn tag(&self, client: &dyn Ec2Api, target: &Snapshot, tags: &Tags) -> Result<()> {
        self.inner().tag(client, target, tags).await
    }
}
