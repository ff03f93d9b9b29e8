//! Membership domain models
//!
//! A membership binds one user to one organization and carries the user's
//! role there along with the integrations they may publish through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// Organization membership linking a user to an organization.
///
/// A (user, organization) pair has at most one membership; the store enforces
/// that on insert.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use team_org::{Membership, Role};
///
/// let membership = Membership::new(Uuid::now_v7(), Uuid::now_v7(), Role::Admin);
/// assert!(membership.allowed_integrations.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// Unique membership ID
    pub id: Uuid,

    /// Organization ID
    pub organization_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the organization
    pub role: Role,

    /// Integration IDs this member may act on (empty means unrestricted)
    #[serde(default)]
    pub allowed_integrations: Vec<String>,

    /// When the user joined
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a new membership with no integration restrictions.
    ///
    /// # Arguments
    ///
    /// * `organization_id` - The organization ID
    /// * `user_id` - The user ID
    /// * `role` - The user's role in the organization
    pub fn new(organization_id: Uuid, user_id: Uuid, role: Role) -> Self {
        Self {
            id: Uuid::now_v7(),
            organization_id,
            user_id,
            role,
            allowed_integrations: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Restrict this membership to the given integrations.
    ///
    /// Duplicate IDs are dropped, first occurrence wins.
    pub fn with_integrations<I, S>(mut self, integrations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in integrations {
            let id = id.into();
            if !self.allowed_integrations.contains(&id) {
                self.allowed_integrations.push(id);
            }
        }
        self
    }

    /// Check if this member may act on an integration.
    pub fn can_use_integration(&self, integration_id: &str) -> bool {
        self.allowed_integrations.is_empty()
            || self.allowed_integrations.iter().any(|id| id == integration_id)
    }
}

/// Roster entry: a membership enriched with the member's email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// User ID
    pub user_id: Uuid,

    /// User email
    pub email: String,

    /// Role within the organization
    pub role: Role,

    /// Integration IDs, omitted when unrestricted
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub allowed_integrations: Vec<String>,
}

impl TeamMember {
    /// Build a roster entry from a membership and the member's email.
    pub fn from_membership(membership: &Membership, email: impl Into<String>) -> Self {
        Self {
            user_id: membership.user_id,
            email: email.into(),
            role: membership.role,
            allowed_integrations: membership.allowed_integrations.clone(),
        }
    }

    /// Short name for roster display.
    ///
    /// Takes the local part of the email up to the first `.` and
    /// capitalizes it.
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use team_org::{Role, TeamMember};
    ///
    /// let member = TeamMember {
    ///     user_id: Uuid::now_v7(),
    ///     email: "jane.doe@example.com".to_string(),
    ///     role: Role::User,
    ///     allowed_integrations: Vec::new(),
    /// };
    /// assert_eq!(member.short_name(), "Jane");
    /// ```
    pub fn short_name(&self) -> String {
        let local = self.email.split('@').next().unwrap_or_default();
        let first = local.split('.').next().unwrap_or_default().to_lowercase();
        let mut chars = first.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether an actor with `actor_role` may remove this member.
    pub fn removable_by(&self, actor_role: Role) -> bool {
        actor_role.outranks(self.role)
    }
}
