//! AWS provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("EC2 request {operation} failed: {message}")]
    Sdk {
        operation: &'static str,
        message: String,
    },

    #[error("EC2 response for {operation} is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("Cloud error: {0}")]
    CloudError(#[from] kubicorn_cloud::CloudError),
}

impl From<AwsError> for kubicorn_cloud::CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::CloudError(inner) => inner,
            other => kubicorn_cloud::CloudError::Transport(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
