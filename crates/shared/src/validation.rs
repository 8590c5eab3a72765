//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a permission key on the wire.
const MAX_PERMISSION_KEY_LENGTH: usize = 128;

/// Maximum number of ids accepted in a single selection list.
const MAX_SELECTION_IDS: usize = 1000;

/// Maximum length of a permission group name.
const MAX_GROUP_NAME_LENGTH: usize = 100;

/// Validates that a role identifier is positive.
pub fn validate_role_id(role_id: i64) -> Result<(), ValidationError> {
    if role_id > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("role_id_range");
        err.message = Some("Role id must be positive".into());
        Err(err)
    }
}

/// Validates a permission key as it appears on the wire.
///
/// Empty keys are allowed (label-only rows are part of the catalog shape),
/// but a key must never contain a comma or whitespace: the flat payload field
/// is comma-delimited and a stray separator would corrupt it.
pub fn validate_permission_key(key: &str) -> Result<(), ValidationError> {
    if key.len() > MAX_PERMISSION_KEY_LENGTH {
        let mut err = ValidationError::new("permission_key_length");
        err.message = Some("Permission key exceeds maximum length".into());
        return Err(err);
    }
    if key.contains(',') || key.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("permission_key_charset");
        err.message = Some("Permission key must not contain commas or whitespace".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a permission group name (non-empty, bounded).
pub fn validate_group_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || name.len() > MAX_GROUP_NAME_LENGTH {
        let mut err = ValidationError::new("group_name_length");
        err.message = Some("Group name must be between 1 and 100 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a selected-id list (non-negative ids, bounded length).
pub fn validate_id_list(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.len() > MAX_SELECTION_IDS {
        let mut err = ValidationError::new("id_list_length");
        err.message = Some("Selection list exceeds maximum size".into());
        return Err(err);
    }
    if ids.iter().any(|id| *id < 0) {
        let mut err = ValidationError::new("id_list_range");
        err.message = Some("Selection ids must be non-negative".into());
        return Err(err);
    }
    Ok(())
}
