//! Entity validation.
//!
//! Every function here is pure: it turns raw candidate input into a
//! validated command, or rejects the whole record. Nothing is partially
//! accepted.

use thiserror::Error;

use crate::error::IbflixError;
use crate::models::academy::{ClassProgress, ProgressCandidate, ProgressStatus};
use crate::models::permission::{PermissionUpdate, PermissionUpdateCandidate};
use crate::models::role::Role;
use crate::models::user::{CreateUser, UserCandidate};

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_DOMAIN_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for IbflixError {
    fn from(err: ValidationError) -> Self {
        IbflixError::Validation {
            field: err.field.into(),
            message: err.message,
        }
    }
}

/// Validate a user candidate.
///
/// A missing role becomes `default_role`, and a missing active flag
/// becomes `true`.
pub fn validate_user(
    candidate: UserCandidate,
    default_role: Role,
) -> Result<CreateUser, ValidationError> {
    let email = candidate.email.trim().to_string();
    validate_email(&email)?;

    let role = match candidate.role.as_deref() {
        Some(raw) => parse_role(raw)?,
        None => default_role,
    };

    Ok(CreateUser {
        org_id: candidate.org_id,
        name: candidate.name,
        email,
        role,
        is_active: candidate.is_active.unwrap_or(true),
    })
}

pub fn validate_permission_update(
    candidate: PermissionUpdateCandidate,
) -> Result<PermissionUpdate, ValidationError> {
    Ok(PermissionUpdate {
        user_id: candidate.user_id,
        role: parse_role(&candidate.role)?,
        is_active: candidate.is_active,
    })
}

pub fn validate_progress(candidate: ProgressCandidate) -> Result<ClassProgress, ValidationError> {
    let status = match candidate.status.trim() {
        "started" => ProgressStatus::Started,
        "completed" => ProgressStatus::Completed,
        other => {
            return Err(ValidationError::new(
                "status",
                format!("expected `started` or `completed`, got {other:?}"),
            ));
        }
    };

    let pct = candidate.progress_pct;
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::new(
            "progress_pct",
            format!("must be between 0 and 100, got {pct}"),
        ));
    }

    Ok(ClassProgress {
        user_id: candidate.user_id,
        class_id: candidate.class_id,
        status,
        progress_pct: pct,
    })
}

fn parse_role(raw: &str) -> Result<Role, ValidationError> {
    raw.parse::<Role>().map_err(|e| {
        let allowed: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
        ValidationError::new("role", format!("{e}; expected one of {allowed:?}"))
    })
}

/// Check that `email` is a syntactically valid address.
///
/// Accepts `local@domain` where the domain has at least two labels. Quoted
/// local parts and IP-literal domains are rejected.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| Err(ValidationError::new("email", reason.to_string()));

    if email.is_empty() {
        return invalid("must not be empty");
    }
    if email.len() > MAX_EMAIL_LEN {
        return invalid("is too long");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return invalid("missing `@`");
    };
    if domain.contains('@') {
        return invalid("contains more than one `@`");
    }

    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return invalid("local part must be 1 to 64 characters");
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_graphic() && !"()<>[]\\,;:\"".contains(c))
    {
        return invalid("local part contains a forbidden character");
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return invalid("local part has a misplaced dot");
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return invalid("domain must contain a dot");
    }
    for label in labels {
        if label.is_empty() || label.len() > MAX_DOMAIN_LABEL_LEN {
            return invalid("domain label must be 1 to 63 characters");
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return invalid("domain contains a forbidden character");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return invalid("domain label must not start or end with `-`");
        }
    }

    Ok(())
}
