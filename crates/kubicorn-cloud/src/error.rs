//! Reconciliation error types

use crate::snapshot::ResourceKind;
use thiserror::Error;

/// Reconciliation errors
#[derive(Error, Debug)]
pub enum CloudError {
    /// The provider call itself failed
    #[error("Provider request failed: {0}")]
    Transport(String),

    /// A tag lookup matched a number of objects other than the one expected
    #[error("Found [{found}] {resource} for filter [{filter}], expected {expected}")]
    Cardinality {
        resource: &'static str,
        expected: usize,
        found: usize,
        filter: String,
    },

    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),

    #[error("Resource has no cloud ID: {0}")]
    MissingIdentifier(String),

    #[error("Cannot compare a {left} snapshot with a {right} snapshot")]
    KindMismatch {
        left: ResourceKind,
        right: ResourceKind,
    },
}

impl CloudError {
    /// Whether re-running the failed operation unchanged may succeed.
    ///
    /// Only transport faults are transient. Every other variant needs the
    /// tag state or the reconciliation order fixed first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CloudError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
