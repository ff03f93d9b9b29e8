//! Invite request validation
//!
//! [`InviteMemberRequest`] is the raw, untrusted body of an invitation. Every
//! field is optional at the type level so a missing field is reported as a
//! validation failure alongside the others instead of aborting parsing.
//! Password equality is checked by the service, not here.

use serde::{Deserialize, Serialize};
use team_org::Role;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::FieldErrors;

/// Raw invitation body.
///
/// # Examples
///
/// ```
/// use team_service::InviteMemberRequest;
///
/// let request: InviteMemberRequest = serde_json::from_value(serde_json::json!({
///     "email": "jane@example.com",
///     "role": "SUPERADMIN",
///     "password": "long-enough",
///     "passwordConfirm": "long-enough",
///     "integrations": ["page-1"],
/// }))
/// .unwrap();
///
/// let errors = request.into_invite().unwrap_err();
/// assert!(errors.contains("role"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberRequest {
    /// Member email
    #[validate(required, email)]
    pub email: Option<String>,

    /// `"USER"` or `"ADMIN"`
    #[validate(required, custom(function = "validate_invite_role"))]
    pub role: Option<String>,

    /// Initial password, at least 8 characters
    #[validate(required, length(min = 8, code = "min_length"))]
    pub password: Option<String>,

    /// Password confirmation
    #[validate(required, length(min = 8, code = "min_length"))]
    pub password_confirm: Option<String>,

    /// Integration IDs the member may publish through
    #[validate(required, length(min = 1, code = "array_not_empty"))]
    pub integrations: Option<Vec<String>>,
}

/// An invitation whose shape has been checked.
#[derive(Clone)]
pub struct TeamMemberInvite {
    /// Member email
    pub email: String,
    /// Requested role
    pub role: Role,
    /// Initial password
    pub password: String,
    /// Password confirmation
    pub password_confirm: String,
    /// Integration IDs
    pub integrations: Vec<String>,
}

impl std::fmt::Debug for TeamMemberInvite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamMemberInvite")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("integrations", &self.integrations)
            .finish_non_exhaustive()
    }
}

impl InviteMemberRequest {
    /// Validate every field and convert into a [`TeamMemberInvite`].
    ///
    /// All violations are collected; the error lists every failing field.
    pub fn into_invite(self) -> Result<TeamMemberInvite, FieldErrors> {
        self.validate().map_err(|errors| field_errors(&errors))?;

        let role = self.role.as_deref().and_then(Role::parse);
        match (
            self.email,
            role,
            self.password,
            self.password_confirm,
            self.integrations,
        ) {
            (Some(email), Some(role), Some(password), Some(password_confirm), Some(integrations)) => {
                Ok(TeamMemberInvite {
                    email,
                    role,
                    password,
                    password_confirm,
                    integrations,
                })
            }
            (email, role, password, password_confirm, integrations) => {
                let mut errors = FieldErrors::default();
                let present = [
                    ("email", email.is_some()),
                    ("role", role.is_some()),
                    ("password", password.is_some()),
                    ("passwordConfirm", password_confirm.is_some()),
                    ("integrations", integrations.is_some()),
                ];
                for (field, _) in present.iter().filter(|(_, ok)| !ok) {
                    errors.add(*field, "required");
                }
                Err(errors)
            }
        }
    }
}

fn validate_invite_role(role: &str) -> Result<(), ValidationError> {
    match Role::parse(role) {
        Some(role) if role.is_invitable() => Ok(()),
        _ => Err(ValidationError::new("role")),
    }
}

/// Flatten `validator` output into [`FieldErrors`] keyed by wire field name.
fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::default();
    for (field, errs) in errors.field_errors() {
        let name = camel_case(&field);
        for err in errs.iter() {
            out.add(name.clone(), err.code.to_string());
        }
    }
    out
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> InviteMemberRequest {
        InviteMemberRequest {
            email: Some("jane@example.com".to_string()),
            role: Some("USER".to_string()),
            password: Some("abcd1234".to_string()),
            password_confirm: Some("abcd1234".to_string()),
            integrations: Some(vec!["page-1".to_string()]),
        }
    }

    #[test]
    fn test_valid_request() {
        let invite = valid().into_invite().unwrap();
        assert_eq!(invite.role, Role::User);
        assert_eq!(invite.integrations, vec!["page-1"]);
    }

    #[test]
    fn test_super_admin_rejected() {
        let request = InviteMemberRequest {
            role: Some("SUPERADMIN".to_string()),
            ..valid()
        };
        let errors = request.into_invite().unwrap_err();
        assert_eq!(errors.codes("role"), ["role".to_string()]);
    }

    #[test]
    fn test_role_is_case_sensitive() {
        for role in ["user", "Admin", "admin", ""] {
            let request = InviteMemberRequest {
                role: Some(role.to_string()),
                ..valid()
            };
            assert!(request.into_invite().unwrap_err().contains("role"), "{role}");
        }
    }

    #[test]
    fn test_empty_integrations_rejected() {
        let request = InviteMemberRequest {
            integrations: Some(Vec::new()),
            ..valid()
        };
        let errors = request.into_invite().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["integrations"]);
        assert_eq!(errors.codes("integrations"), ["array_not_empty".to_string()]);
    }

    #[test]
    fn test_short_matching_passwords_rejected() {
        let request = InviteMemberRequest {
            password: Some("abc1234".to_string()),
            password_confirm: Some("abc1234".to_string()),
            ..valid()
        };
        let errors = request.into_invite().unwrap_err();
        assert_eq!(errors.codes("password"), ["min_length".to_string()]);
        assert_eq!(errors.codes("passwordConfirm"), ["min_length".to_string()]);
    }

    #[test]
    fn test_mismatched_passwords_pass_validation() {
        let request = InviteMemberRequest {
            password_confirm: Some("different1".to_string()),
            ..valid()
        };
        assert!(request.into_invite().is_ok());
    }

    #[test]
    fn test_every_violation_reported() {
        let request = InviteMemberRequest {
            email: Some("not-an-email".to_string()),
            role: None,
            password: Some("short".to_string()),
            password_confirm: None,
            integrations: Some(Vec::new()),
        };
        let errors = request.into_invite().unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["email", "integrations", "password", "passwordConfirm", "role"]
        );
        assert_eq!(errors.codes("email"), ["email".to_string()]);
        assert_eq!(errors.codes("role"), ["required".to_string()]);
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let request: InviteMemberRequest =
            serde_json::from_value(serde_json::json!({ "email": "jane@example.com" })).unwrap();
        let errors = request.into_invite().unwrap_err();

        assert!(!errors.contains("email"));
        assert!(errors.contains("passwordConfirm"));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("password_confirm"), "passwordConfirm");
        assert_eq!(camel_case("email"), "email");
    }
}
