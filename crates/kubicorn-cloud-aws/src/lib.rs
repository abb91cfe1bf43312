//! AWS provider for kubicorn
//!
//! This crate implements the `Ec2Api` trait on top of `aws-sdk-ec2`, so the
//! reconciliation core can manage route tables in a real AWS account.
//!
//! # Example
//!
//! ```ignore
//! use kubicorn_cloud::{Cluster, PassCache, Resource, RouteTable};
//! use kubicorn_cloud_aws::{AwsConfig, AwsEc2};
//!
//! let client = AwsEc2::connect(&AwsConfig::from_env()).await;
//! let resource = RouteTable::new("pool-a", "pool-a", "pool-a");
//! let mut cache = PassCache::new();
//!
//! let actual = resource.actual(&client, &mut cache, &cluster).await?;
//! let expected = resource.expected(&mut cache, &cluster);
//! resource.apply(&client, &actual, &expected, &cluster).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::AwsEc2;
pub use config::AwsConfig;
pub use error::{AwsError, Result};
