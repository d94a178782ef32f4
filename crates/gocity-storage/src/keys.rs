//! Project name validation and object key generation.
//!
//! Key format: `{project_name}.json`. Appending a fixed suffix keeps distinct
//! project names on distinct keys, as long as the object store does not
//! rewrite the name. Names that a store would normalize (leading, trailing or
//! repeated `/`, `.` and `..` segments, control characters) are rejected, and
//! every backend applies the same check.

use crate::{StorageError, StorageResult};
use gocity_core::constants::OBJECT_KEY_EXTENSION;

/// Check that a project name can be stored without being rewritten.
pub fn validate_project_name(project_name: &str) -> StorageResult<()> {
    if project_name.trim().is_empty() {
        return Err(invalid("project name must not be empty"));
    }
    if project_name.starts_with('/') || project_name.ends_with('/') {
        return Err(invalid("project name must not start or end with '/'"));
    }
    if project_name.chars().any(|c| c.is_control()) {
        return Err(invalid("project name must not contain control characters"));
    }
    for segment in project_name.split('/') {
        if segment.is_empty() {
            return Err(invalid("project name must not contain empty segments"));
        }
        if segment == "." || segment == ".." {
            return Err(invalid("project name must not contain '.' or '..' segments"));
        }
    }
    Ok(())
}

/// Generate the object key for a project name.
#[cfg(feature = "storage-gcs")]
pub fn object_key(project_name: &str) -> StorageResult<String> {
    validate_project_name(project_name)?;
    Ok(format!("{}.{}", project_name, OBJECT_KEY_EXTENSION))
}

fn invalid(reason: &str) -> StorageError {
    StorageError::InvalidKey(reason.to_string())
}
