use async_trait::async_trait;
use kubicorn_cloud::{
    CloudError, Ec2Api, InternetGatewayInfo, Result, RouteTableAssociation, RouteTableInfo, Tag,
    TagFilter,
};
use kubicorn_cloud::lookup::INTERNET_GATEWAY_NAME_TAG;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub route_table_id: String,
    pub destination_cidr: String,
    pub gateway_id: String,
}

#[derive(Debug, Default)]
struct State {
    route_tables: Vec<RouteTableInfo>,
    gateways: Vec<InternetGatewayInfo>,
    routes: Vec<Route>,
    calls: Vec<&'static str>,
    fail_on: Option<&'static str>,
    next_id: u32,
}

impl State {
    fn record(&mut self, call: &'static str) -> Result<()> {
        self.calls.push(call);
        if self.fail_on == Some(call) {
            return Err(CloudError::Transport(format!("{} failed", call)));
        }
        Ok(())
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// In-memory EC2 that records every call
#[derive(Debug, Default)]
pub struct FakeEc2 {
    state: Mutex<State>,
}

#[allow(dead_code)]
impl FakeEc2 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an internet gateway tagged for a cluster
    pub fn with_gateway(self, id: &str, cluster_name: &str) -> Self {
        self.state.lock().unwrap().gateways.push(InternetGatewayInfo {
            internet_gateway_id: id.to_string(),
            tags: vec![Tag::new(INTERNET_GATEWAY_NAME_TAG, cluster_name)],
        });
        self
    }

    pub fn with_route_table(self, route_table: RouteTableInfo) -> Self {
        self.state.lock().unwrap().route_tables.push(route_table);
        self
    }

    /// Make the named call fail with a transport fault
    pub fn fail_on(&self, call: &'static str) {
        self.state.lock().unwrap().fail_on = Some(call);
    }

    pub fn clear_failure(&self) {
        self.state.lock().unwrap().fail_on = None;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that change remote state
    pub fn mutations(&self) -> Vec<&'static str> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("describe"))
            .collect()
    }

    pub fn route_tables(&self) -> Vec<RouteTableInfo> {
        self.state.lock().unwrap().route_tables.clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.state.lock().unwrap().routes.clone()
    }
}

#[async_trait]
impl Ec2Api for FakeEc2 {
    async fn describe_route_tables(&self, filter: &TagFilter) -> Result<Vec<RouteTableInfo>> {
        let mut state = self.state.lock().unwrap();
        state.record("describe_route_tables")?;
        Ok(state
            .route_tables
            .iter()
            .filter(|rt| filter.matches(&rt.tags))
            .cloned()
            .collect())
    }

    async fn create_route_table(&self, vpc_id: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.record("create_route_table")?;
        assert!(!vpc_id.is_empty());
        let id = state.next_id("rtb");
        state.route_tables.push(RouteTableInfo {
            route_table_id: id.clone(),
            ..Default::default()
        });
        Ok(id)
    }

    async fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr: &str,
        gateway_id: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record("create_route")?;
        state.routes.push(Route {
            route_table_id: route_table_id.to_string(),
            destination_cidr: destination_cidr.to_string(),
            gateway_id: gateway_id.to_string(),
        });
        Ok(())
    }

    async fn describe_internet_gateways(
        &self,
        filter: &TagFilter,
    ) -> Result<Vec<InternetGatewayInfo>> {
        let mut state = self.state.lock().unwrap();
        state.record("describe_internet_gateways")?;
        Ok(state
            .gateways
            .iter()
            .filter(|gw| filter.matches(&gw.tags))
            .cloned()
            .collect())
    }

    async fn associate_route_table(
        &self,
        route_table_id: &str,
        subnet_id: &str,
    ) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.record("associate_route_table")?;
        let id = state.next_id("rtbassoc");
        let rt = state
            .route_tables
            .iter_mut()
            .find(|rt| rt.route_table_id == route_table_id)
            .ok_or_else(|| CloudError::Transport(format!("unknown route table {}", route_table_id)))?;
        rt.associations.push(RouteTableAssociation {
            association_id: id.clone(),
            subnet_id: Some(subnet_id.to_string()),
        });
        Ok(id)
    }

    async fn disassociate_route_table(&self, association_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record("disassociate_route_table")?;
        for rt in state.route_tables.iter_mut() {
            rt.associations.retain(|a| a.association_id != association_id);
        }
        Ok(())
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_route_table")?;
        let associated = state
            .route_tables
            .iter()
            .any(|rt| rt.route_table_id == route_table_id && !rt.associations.is_empty());
        if associated {
            return Err(CloudError::Transport(format!(
                "DependencyViolation: route table {} has associations",
                route_table_id
            )));
        }
        state.route_tables.retain(|rt| rt.route_table_id != route_table_id);
        Ok(())
    }

    async fn create_tags(&self, resource_id: &str, tags: &[Tag]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record("create_tags")?;
        let rt = state
            .route_tables
            .iter_mut()
            .find(|rt| rt.route_table_id == resource_id)
            .ok_or_else(|| CloudError::Transport(format!("unknown resource {}", resource_id)))?;
        for tag in tags {
            rt.tags.retain(|t| t.key != tag.key);
            rt.tags.push(tag.clone());
        }
        Ok(())
    }
}
