//! aws-sdk-ec2 backed implementation of `Ec2Api`

use crate::config::AwsConfig;
use crate::error::{AwsError, Result};
use async_trait::async_trait;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter, InternetGateway, RouteTable};
use kubicorn_cloud::{
    CloudError, Ec2Api, InternetGatewayInfo, RouteTableAssociation, RouteTableInfo, Tag,
    TagFilter,
};

/// EC2 client handle
///
/// Built once by the driver and shared by reference with every resource
/// operation in a pass.
#[derive(Debug, Clone)]
pub struct AwsEc2 {
    client: Client,
}

impl AwsEc2 {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Resolve the SDK configuration and build a client from it
    pub async fn connect(config: &AwsConfig) -> Self {
        let sdk_config = config.load().await;
        Self::new(Client::new(&sdk_config))
    }
}

fn sdk_error<E: std::error::Error>(operation: &'static str, err: E) -> CloudError {
    AwsError::Sdk {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
    .into()
}

fn tag_filter(filter: &TagFilter) -> Filter {
    Filter::builder()
        .name(filter.filter_name())
        .values(&filter.value)
        .build()
}

fn ec2_tag(tag: &Tag) -> aws_sdk_ec2::types::Tag {
    aws_sdk_ec2::types::Tag::builder()
        .key(&tag.key)
        .value(&tag.value)
        .build()
}

/// Keyless tags carry no identity and are skipped
fn tags_from_ec2(tags: &[aws_sdk_ec2::types::Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|t| Some(Tag::new(t.key()?, t.value().unwrap_or_default())))
        .collect()
}

fn route_table_info(rt: &RouteTable) -> Result<RouteTableInfo> {
    let route_table_id = rt.route_table_id().ok_or(AwsError::MissingField {
        operation: "DescribeRouteTables",
        field: "RouteTableId",
    })?;

    let associations = rt
        .associations()
        .iter()
        .filter_map(|a| {
            Some(RouteTableAssociation {
                association_id: a.route_table_association_id()?.to_string(),
                subnet_id: a.subnet_id().map(str::to_string),
            })
        })
        .collect();

    Ok(RouteTableInfo {
        route_table_id: route_table_id.to_string(),
        tags: tags_from_ec2(rt.tags()),
        associations,
    })
}

fn gateway_info(gw: &InternetGateway) -> Result<InternetGatewayInfo> {
    let internet_gateway_id = gw.internet_gateway_id().ok_or(AwsError::MissingField {
        operation: "DescribeInternetGateways",
        field: "InternetGatewayId",
    })?;

    Ok(InternetGatewayInfo {
        internet_gateway_id: internet_gateway_id.to_string(),
        tags: tags_from_ec2(gw.tags()),
    })
}

#[async_trait]
impl Ec2Api for AwsEc2 {
    async fn describe_route_tables(
        &self,
        filter: &TagFilter,
    ) -> kubicorn_cloud::Result<Vec<RouteTableInfo>> {
        tracing::debug!("DescribeRouteTables {}", filter);
        let output = self
            .client
            .describe_route_tables()
            .filters(tag_filter(filter))
            .send()
            .await
            .map_err(|e| sdk_error("DescribeRouteTables", e))?;

        let tables = output
            .route_tables()
            .iter()
            .map(route_table_info)
            .collect::<Result<Vec<_>>>()?;
        Ok(tables)
    }

    async fn create_route_table(&self, vpc_id: &str) -> kubicorn_cloud::Result<String> {
        tracing::debug!("CreateRouteTable in VPC {}", vpc_id);
        let output = self
            .client
            .create_route_table()
            .vpc_id(vpc_id)
            .send()
            .await
            .map_err(|e| sdk_error("CreateRouteTable", e))?;

        let id = output
            .route_table()
            .and_then(|rt| rt.route_table_id())
            .ok_or(AwsError::MissingField {
                operation: "CreateRouteTable",
                field: "RouteTable.RouteTableId",
            })?;
        Ok(id.to_string())
    }

    async fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr: &str,
        gateway_id: &str,
    ) -> kubicorn_cloud::Result<()> {
        tracing::debug!(
            "CreateRoute {} -> {} in {}",
            destination_cidr,
            gateway_id,
            route_table_id
        );
        self.client
            .create_route()
            .route_table_id(route_table_id)
            .destination_cidr_block(destination_cidr)
            .gateway_id(gateway_id)
            .send()
            .await
            .map_err(|e| sdk_error("CreateRoute", e))?;
        Ok(())
    }

    async fn describe_internet_gateways(
        &self,
        filter: &TagFilter,
    ) -> kubicorn_cloud::Result<Vec<InternetGatewayInfo>> {
        tracing::debug!("DescribeInternetGateways {}", filter);
        let output = self
            .client
            .describe_internet_gateways()
            .filters(tag_filter(filter))
            .send()
            .await
            .map_err(|e| sdk_error("DescribeInternetGateways", e))?;

        let gateways = output
            .internet_gateways()
            .iter()
            .map(gateway_info)
            .collect::<Result<Vec<_>>>()?;
        Ok(gateways)
    }

    async fn associate_route_table(
        &self,
        route_table_id: &str,
        subnet_id: &str,
    ) -> kubicorn_cloud::Result<String> {
        tracing::debug!("AssociateRouteTable {} with {}", route_table_id, subnet_id);
        let output = self
            .client
            .associate_route_table()
            .route_table_id(route_table_id)
            .subnet_id(subnet_id)
            .send()
            .await
            .map_err(|e| sdk_error("AssociateRouteTable", e))?;

        let id = output.association_id().ok_or(AwsError::MissingField {
            operation: "AssociateRouteTable",
            field: "AssociationId",
        })?;
        Ok(id.to_string())
    }

    async fn disassociate_route_table(&self, association_id: &str) -> kubicorn_cloud::Result<()> {
        tracing::debug!("DisassociateRouteTable {}", association_id);
        self.client
            .disassociate_route_table()
            .association_id(association_id)
            .send()
            .await
            .map_err(|e| sdk_error("DisassociateRouteTable", e))?;
        Ok(())
    }

    async fn delete_route_table(&self, route_table_id: &str) -> kubicorn_cloud::Result<()> {
        tracing::debug!("DeleteRouteTable {}", route_table_id);
        self.client
            .delete_route_table()
            .route_table_id(route_table_id)
            .send()
            .await
            .map_err(|e| sdk_error("DeleteRouteTable", e))?;
        Ok(())
    }

    async fn create_tags(&self, resource_id: &str, tags: &[Tag]) -> kubicorn_cloud::Result<()> {
        tracing::debug!("CreateTags on {} ({} tags)", resource_id, tags.len());
        self.client
            .create_tags()
            .resources(resource_id)
            .set_tags(Some(tags.iter().map(ec2_tag).collect()))
            .send()
            .await
            .map_err(|e| sdk_error("CreateTags", e))?;
        Ok(())
    }
}
