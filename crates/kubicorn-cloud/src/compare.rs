//! Structural comparison of snapshots

use crate::error::{CloudError, Result};
use crate::snapshot::Snapshot;

/// Compare two snapshots of the same resource kind.
///
/// Equal when name, cloud ID and every tag key/value pair match. Tag order
/// is irrelevant. Snapshots of different kinds are rejected.
pub fn is_equal(a: &Snapshot, b: &Snapshot) -> Result<bool> {
    if a.kind != b.kind {
        return Err(CloudError::KindMismatch {
            left: a.kind,
            right: b.kind,
        });
    }

    Ok(a.name == b.name && a.cloud_id == b.cloud_id && a.tags == b.tags)
}
