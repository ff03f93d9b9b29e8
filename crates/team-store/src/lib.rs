//! # Team Store
//!
//! Persistence boundary for organizations, users and memberships.
//!
//! ## Overview
//!
//! - [`TeamStore`]: async trait every backend implements
//! - [`MemoryTeamStore`]: in-memory backend with an explicit [`Transaction`]
//!   unit of work (feature `memory`, on by default)
//!
//! Compound writes are atomic and uniqueness is checked inside the same unit
//! of work as the insert, so two concurrent invitations for one email cannot
//! both succeed.
//!
//! ```rust
//! use team_store::{MemoryTeamStore, NewOrganization, TeamStore};
//!
//! async fn example() {
//!     let store = MemoryTeamStore::new();
//!     let created = store
//!         .create_organization_with_owner(NewOrganization {
//!             name: "Acme".to_string(),
//!             owner_email: "owner@acme.test".to_string(),
//!             owner_password_hash: "$argon2id$...".to_string(),
//!             api_key_digest: "digest".to_string(),
//!         })
//!         .await
//!         .unwrap();
//!
//!     let roster = store
//!         .list_memberships_for_org(created.organization.id)
//!         .await
//!         .unwrap();
//!     assert_eq!(roster.len(), 1);
//! }
//! ```

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
#[cfg(feature = "memory")]
pub use memory::{MemoryTeamStore, Transaction};
pub use store::{NewOrganization, NewTeamMember, OrganizationWithOwner, TeamStore};
