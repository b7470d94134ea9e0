use super::UsedIdRegistry;
use serde::Serialize;

pub const MIN_COMMON_ID_LEN: usize = 3;
pub const MIN_UNIQUE_ID_LEN: usize = 5;

/// Outcome of an id check. Validation never fails; a bad id is a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdValidation {
    pub is_valid: bool,
    pub message: String,
    pub is_duplicate: bool,
}

impl IdValidation {
    fn ok() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
            is_duplicate: false,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            is_duplicate: false,
        }
    }

    fn duplicate(id: &str) -> Self {
        Self {
            is_valid: false,
            message: format!("Unique ID {id} is already in use"),
            is_duplicate: true,
        }
    }
}

impl std::fmt::Display for IdValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid {
            write!(f, "valid")
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Checks the raw input; callers wanting whitespace forgiven pass it through
/// [`format_common_id`](super::format_common_id) first.
pub fn validate_common_id(id: &str) -> IdValidation {
    if id.trim().is_empty() {
        return IdValidation::invalid("Common ID is required");
    }
    if id.chars().count() < MIN_COMMON_ID_LEN {
        return IdValidation::invalid(format!(
            "Common ID must be at least {MIN_COMMON_ID_LEN} characters"
        ));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return IdValidation::invalid(
            "Common ID may only contain letters, numbers and hyphens",
        );
    }
    IdValidation::ok()
}

/// Checks `id` against the registry. `exclude_id` is the id the record currently
/// holds, so re-validating an unchanged id during an edit is not a duplicate.
pub fn validate_unique_id(
    registry: &UsedIdRegistry,
    id: &str,
    exclude_id: Option<&str>,
) -> IdValidation {
    if id.trim().is_empty() {
        return IdValidation::invalid("Unique ID is required");
    }
    if id.trim() != id {
        return IdValidation::invalid("Unique ID may not start or end with whitespace");
    }
    if id.chars().count() < MIN_UNIQUE_ID_LEN {
        return IdValidation::invalid(format!(
            "Unique ID must be at least {MIN_UNIQUE_ID_LEN} characters"
        ));
    }
    if registry.is_used(id) && exclude_id != Some(id) {
        return IdValidation::duplicate(id);
    }
    IdValidation::ok()
}
