//! AWS client configuration

use aws_config::BehaviorVersion;
use aws_sdk_ec2::config::Region;

pub const REGION_ENV: &str = "KUBICORN_AWS_REGION";
pub const PROFILE_ENV: &str = "KUBICORN_AWS_PROFILE";
pub const ENDPOINT_URL_ENV: &str = "KUBICORN_AWS_ENDPOINT_URL";

/// Settings layered over the AWS SDK default provider chain
///
/// Unset fields fall back to whatever the SDK resolves on its own
/// (`AWS_REGION`, shared config files, instance metadata).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsConfig {
    pub region: Option<String>,

    /// Named profile from the shared config files
    pub profile: Option<String>,

    /// Override for the EC2 endpoint, e.g. a local emulator
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    /// Create AwsConfig from environment variables
    pub fn from_env() -> Self {
        Self {
            region: non_empty_var(REGION_ENV),
            profile: non_empty_var(PROFILE_ENV),
            endpoint_url: non_empty_var(ENDPOINT_URL_ENV),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Resolve the SDK configuration
    pub async fn load(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        tracing::debug!(
            "Loading AWS config (region: {:?}, profile: {:?}, endpoint: {:?})",
            self.region,
            self.profile,
            self.endpoint_url
        );
        loader.load().await
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_reads_all_settings() {
        temp_env::with_vars(
            [
                (REGION_ENV, Some("eu-west-1")),
                (PROFILE_ENV, Some("kubicorn")),
                (ENDPOINT_URL_ENV, Some("http://localhost:4566")),
            ],
            || {
                let config = AwsConfig::from_env();
                assert_eq!(config.region.as_deref(), Some("eu-west-1"));
                assert_eq!(config.profile.as_deref(), Some("kubicorn"));
                assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
            },
        );
    }

    #[test]
    fn test_from_env_treats_blank_as_unset() {
        temp_env::with_vars(
            [
                (REGION_ENV, Some("  ")),
                (PROFILE_ENV, None),
                (ENDPOINT_URL_ENV, None),
            ],
            || {
                assert_eq!(AwsConfig::from_env(), AwsConfig::default());
            },
        );
    }

    #[test]
    fn test_builders() {
        let config = AwsConfig::default()
            .with_region("us-east-1")
            .with_profile("ops")
            .with_endpoint_url("http://localhost:4566");
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.profile.as_deref(), Some("ops"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[tokio::test]
    async fn test_load_applies_region() {
        let sdk_config = AwsConfig::default().with_region("ap-northeast-1").load().await;
        assert_eq!(
            sdk_config.region().map(|r| r.as_ref()),
            Some("ap-northeast-1")
        );
    }
}
