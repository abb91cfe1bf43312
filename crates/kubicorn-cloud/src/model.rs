//! Desired-state cluster model
//!
//! Identifiers start empty and are filled in as sibling resources are
//! realized during a reconciliation pass.

use serde::{Deserialize, Serialize};

/// Root aggregate of the desired topology
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,

    #[serde(default)]
    pub network: Network,

    /// Server pools in declaration order
    #[serde(default)]
    pub server_pools: Vec<ServerPool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Cloud identifier of the VPC, empty until realized
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPool {
    pub name: String,

    #[serde(default)]
    pub identifier: String,

    #[serde(default)]
    pub subnets: Vec<Subnet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub name: String,

    /// Cloud identifier, empty until the subnet is realized
    #[serde(default)]
    pub identifier: String,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_network(mut self, identifier: impl Into<String>) -> Self {
        self.network.identifier = identifier.into();
        self
    }

    pub fn with_server_pool(mut self, pool: ServerPool) -> Self {
        self.server_pools.push(pool);
        self
    }

    /// Find a server pool by name
    pub fn server_pool(&self, name: &str) -> Option<&ServerPool> {
        self.server_pools.iter().find(|p| p.name == name)
    }

    /// Find a subnet by its owning pool and its own name
    pub fn subnet(&self, pool: &str, subnet: &str) -> Option<&Subnet> {
        self.server_pool(pool)?.subnets.iter().find(|s| s.name == subnet)
    }

    /// Mutable access to a subnet, used by the resource that realizes it.
    pub fn subnet_mut(&mut self, pool: &str, subnet: &str) -> Option<&mut Subnet> {
        self.server_pools
            .iter_mut()
            .find(|p| p.name == pool)?
            .subnets
            .iter_mut()
            .find(|s| s.name == subnet)
    }
}

impl ServerPool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_subnet(mut self, subnet: Subnet) -> Self {
        self.subnets.push(subnet);
        self
    }
}

impl Subnet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: String::new(),
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn is_realized(&self) -> bool {
        !self.identifier.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cluster {
        Cluster::new("demo")
            .with_network("vpc-1")
            .with_server_pool(
                ServerPool::new("pool-a").with_subnet(Subnet::new("pool-a").with_identifier("subnet-1")),
            )
            .with_server_pool(ServerPool::new("pool-b").with_subnet(Subnet::new("pool-b")))
    }

    #[test]
    fn test_subnet_lookup_is_scoped_to_pool() {
        let cluster = sample();
        assert_eq!(
            cluster.subnet("pool-a", "pool-a").map(|s| s.identifier.as_str()),
            Some("subnet-1")
        );
        assert!(cluster.subnet("pool-b", "pool-a").is_none());
        assert!(cluster.subnet("missing", "pool-a").is_none());
        assert!(!cluster.subnet("pool-b", "pool-b").unwrap().is_realized());
    }

    #[test]
    fn test_subnet_mut_fills_identifier() {
        let mut cluster = sample();
        cluster.subnet_mut("pool-b", "pool-b").unwrap().identifier = "subnet-2".into();
        assert!(cluster.subnet("pool-b", "pool-b").unwrap().is_realized());
    }

    #[test]
    fn test_deserialize_with_missing_identifiers() {
        let json = r#"{
            "name": "demo",
            "server_pools": [
                { "name": "pool-a", "subnets": [ { "name": "pool-a" } ] }
            ]
        }"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.network.identifier, "");
        assert_eq!(cluster.server_pools.len(), 1);
        assert!(!cluster.subnet("pool-a", "pool-a").unwrap().is_realized());
    }
}
