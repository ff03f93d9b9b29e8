//! Error types for team management operations

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use team_auth::CredentialError;
use team_store::StoreError;
use thiserror::Error;

/// Field-level validation failures, keyed by wire field name.
///
/// Each field maps to the codes of every rule it violated (`required`,
/// `email`, `min_length`, `array_not_empty`, `role`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a violated rule for a field.
    pub fn add(&mut self, field: impl Into<String>, code: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(code.into());
    }

    /// Names of every field with at least one violation.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Codes recorded for a field.
    pub fn codes(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check if a field has any violation.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, codes) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, codes.join(", "))?;
            first = false;
        }
        Ok(())
    }
}

/// Team management error types.
#[derive(Debug, Error)]
pub enum TeamError {
    /// Request failed validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Role cannot be granted through this path
    #[error("Role cannot be granted to a team member")]
    RoleNotInvitable,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// User already belongs to the organization
    #[error("User is already a member of this organization")]
    AlreadyMember,

    /// User is not part of the organization
    #[error("User is not part of this organization")]
    NotMember,

    /// Acting user does not outrank the target
    #[error("You do not have permission to perform this action")]
    InsufficientPermission,

    /// Organization does not exist
    #[error("Organization not found")]
    OrganizationNotFound,

    /// User does not exist
    #[error("User not found")]
    UserNotFound,

    /// Organization is full
    #[error("Organization has reached its limit of {0} members")]
    TeamLimitReached(usize),

    /// Storage or credential failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for team management operations.
pub type TeamResult<T> = Result<T, TeamError>;

impl TeamError {
    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, TeamError::Internal(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            TeamError::Validation(_)
            | TeamError::PasswordMismatch
            | TeamError::RoleNotInvitable => 400,

            TeamError::InsufficientPermission | TeamError::TeamLimitReached(_) => 403,

            TeamError::NotMember | TeamError::OrganizationNotFound | TeamError::UserNotFound => 404,

            TeamError::EmailTaken | TeamError::AlreadyMember => 409,

            TeamError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            TeamError::Validation(_) => "VALIDATION_ERROR",
            TeamError::PasswordMismatch => "PASSWORD_MISMATCH",
            TeamError::RoleNotInvitable => "ROLE_NOT_INVITABLE",
            TeamError::EmailTaken => "EMAIL_TAKEN",
            TeamError::AlreadyMember => "ALREADY_MEMBER",
            TeamError::NotMember => "NOT_MEMBER",
            TeamError::InsufficientPermission => "INSUFFICIENT_PERMISSION",
            TeamError::OrganizationNotFound => "ORGANIZATION_NOT_FOUND",
            TeamError::UserNotFound => "USER_NOT_FOUND",
            TeamError::TeamLimitReached(_) => "TEAM_LIMIT_REACHED",
            TeamError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for TeamError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken => TeamError::EmailTaken,
            StoreError::AlreadyMember => TeamError::AlreadyMember,
            StoreError::NotAMember => TeamError::NotMember,
            StoreError::Outranked => TeamError::InsufficientPermission,
            StoreError::OrganizationNotFound => TeamError::OrganizationNotFound,
            StoreError::UserNotFound => TeamError::UserNotFound,
            StoreError::MemberLimitReached(limit) => TeamError::TeamLimitReached(limit),
            StoreError::Backend(message) => TeamError::Internal(message),
        }
    }
}

impl From<CredentialError> for TeamError {
    fn from(err: CredentialError) -> Self {
        TeamError::Internal(err.to_string())
    }
}

impl From<FieldErrors> for TeamError {
    fn from(errors: FieldErrors) -> Self {
        TeamError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::default();
        errors.add("password", "min_length");
        errors.add("email", "email");
        errors.add("email", "required");

        assert_eq!(errors.to_string(), "email: email, required; password: min_length");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "password"]);
        assert!(errors.codes("role").is_empty());
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            TeamError::from(StoreError::NotAMember),
            TeamError::NotMember
        ));
        assert!(matches!(
            TeamError::from(StoreError::Outranked),
            TeamError::InsufficientPermission
        ));
        assert!(matches!(
            TeamError::from(StoreError::MemberLimitReached(5)),
            TeamError::TeamLimitReached(5)
        ));
        assert!(TeamError::from(StoreError::Backend("down".to_string())).is_server_error());
    }

    #[test]
    fn test_permission_error_does_not_leak_roles() {
        let message = TeamError::InsufficientPermission.to_string();
        assert!(!message.to_uppercase().contains("ADMIN"));
        assert!(!message.to_uppercase().contains("USER"));
        assert_eq!(TeamError::InsufficientPermission.status_code(), 403);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(TeamError::PasswordMismatch.status_code(), 400);
        assert_eq!(TeamError::EmailTaken.status_code(), 409);
        assert_eq!(TeamError::NotMember.status_code(), 404);
        assert_eq!(TeamError::Internal("x".to_string()).status_code(), 500);
    }
}
