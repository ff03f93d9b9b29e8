//! Role hierarchy
//!
//! This module defines the team roles and their ordering. Every authorization
//! decision that compares two roles goes through [`Role::rank`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A member's role within an organization.
///
/// The hierarchy is: User < Admin < SuperAdmin
///
/// # Permission Model
///
/// - **User**: Publishes through the integrations they were granted
/// - **Admin**: Manages team members ranked below them
/// - **SuperAdmin**: Created with the organization; controls org-wide access
///
/// # Examples
///
/// ```
/// use team_org::Role;
///
/// assert_eq!(Role::User.rank(), 0);
/// assert!(Role::Admin.outranks(Role::User));
/// assert!(!Role::Admin.outranks(Role::Admin));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular team member
    #[serde(rename = "USER")]
    User,

    /// Can invite and remove regular members
    #[serde(rename = "ADMIN")]
    Admin,

    /// Organization owner
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
}

impl Role {
    /// All roles, lowest rank first.
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::SuperAdmin];

    /// Ordinal rank of this role.
    ///
    /// # Returns
    ///
    /// `0` for User, `1` for Admin, `2` for SuperAdmin
    pub const fn rank(self) -> u8 {
        match self {
            Self::User => 0,
            Self::Admin => 1,
            Self::SuperAdmin => 2,
        }
    }

    /// Check if this role ranks strictly above `other`.
    ///
    /// Peers never outrank each other, so an Admin cannot act on another
    /// Admin and a SuperAdmin cannot act on another SuperAdmin.
    pub const fn outranks(self, other: Role) -> bool {
        self.rank() > other.rank()
    }

    /// Check if this role can be granted through a team invitation.
    ///
    /// # Returns
    ///
    /// `true` for User and Admin roles
    pub const fn is_invitable(self) -> bool {
        matches!(self, Self::User | Self::Admin)
    }

    /// Parse role from its wire representation.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use team_org::Role;
    ///
    /// assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
    /// assert_eq!(Role::parse("admin"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            "SUPERADMIN" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Get the wire representation of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPERADMIN",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use team_org::Role;
    ///
    /// assert_eq!(Role::SuperAdmin.display_name(), "Super Admin");
    /// ```
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
