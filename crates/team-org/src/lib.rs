//! # Team Organization Models
//!
//! This crate provides the domain models for organization and team
//! management.
//!
//! ## Overview
//!
//! The team-org crate handles:
//! - **Organizations**: Billing and ownership aggregates with a rotatable API key
//! - **Users**: Accounts shared across organizations
//! - **Memberships**: User-organization relationships with a role and allowed integrations
//! - **Roles**: The ordered hierarchy USER < ADMIN < SUPERADMIN
//! - **Integrations**: Connected channels referenced by memberships
//!
//! ## Architecture
//!
//! ```text
//! User
//!   └─ Membership (role, allowed integrations) ─→ Organization
//!                                                   ├─ API key digest
//!                                                   └─ Integrations
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use team_org::{Membership, Organization, Role};
//! use uuid::Uuid;
//!
//! let org = Organization::new("Acme Corp", "digest");
//! let user_id = Uuid::now_v7();
//! let membership = Membership::new(org.id, user_id, Role::User)
//!     .with_integrations(["linkedin-page"]);
//!
//! assert!(Role::Admin.outranks(membership.role));
//! ```

pub mod integration;
pub mod membership;
pub mod organization;
pub mod roles;
pub mod user;

// Re-export main types for convenience
pub use integration::Integration;
pub use membership::{Membership, TeamMember};
pub use organization::Organization;
pub use roles::Role;
pub use user::{normalize_email, User};
