//! kubicorn cloud reconciliation core
//!
//! This crate provides the per-resource reconciliation contract for kubicorn,
//! together with its route table implementation.
//!
//! Each resource computes what exists remotely (`actual`), what the desired
//! cluster says should exist (`expected`), and applies or deletes the
//! difference. Cross-resource references are resolved through identity tags,
//! because the provider API has no relational joins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            Reconciliation driver                 │
//! │   (owns Cluster, PassCache and the client)       │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                kubicorn-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │           Resource Contract               │   │
//! │  │  trait Resource { actual, expected, ... } │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐ ┌────────────┐ ┌───────────┐  │
//! │  │  Comparator  │ │ Tag Lookup │ │ PassCache │  │
//! │  └──────────────┘ └────────────┘ └───────────┘  │
//! └─────────────────┬───────────────────────────────┘
//!                   │ trait Ec2Api
//! ┌─────────────────▼───────────────────────────────┐
//! │              kubicorn-cloud-aws                  │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod compare;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod resource;
pub mod route_table;
pub mod snapshot;

// Re-exports
pub use cache::{CacheKey, PassCache};
pub use compare::is_equal;
pub use error::{CloudError, Result};
pub use model::{Cluster, Network, ServerPool, Subnet};
pub use provider::{Ec2Api, InternetGatewayInfo, RouteTableAssociation, RouteTableInfo, Tag, TagFilter};
pub use resource::{AnyResource, Resource};
pub use route_table::RouteTable;
pub use snapshot::{ResourceKind, Snapshot, Tags};
