//! # Team Service
//!
//! Team membership management with role-based authorization.
//!
//! ## Overview
//!
//! A membership change flows through three layers:
//!
//! ```text
//! InviteMemberRequest ──validate──▶ TeamService ──rank check──▶ TeamStore
//!   (shape: email, role,           (password match,           (atomic user +
//!    password length,               invitable role,             membership write,
//!    integrations)                  strict outranking)          uniqueness)
//! ```
//!
//! ## Authorization
//!
//! Removal is permitted only when the actor's role strictly outranks the
//! target's role (`USER < ADMIN < SUPERADMIN`). Peers cannot remove each
//! other. SUPERADMIN is never granted through an invitation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use team_service::{InviteMemberRequest, TeamService};
//! use team_store::MemoryTeamStore;
//!
//! async fn example() {
//!     let service = TeamService::new(Arc::new(MemoryTeamStore::new()));
//!     let org = service
//!         .create_organization("Acme", "owner@acme.test", "owner-password")
//!         .await
//!         .unwrap();
//!
//!     let request: InviteMemberRequest = serde_json::from_str(
//!         r#"{"email":"jane@acme.test","role":"USER","password":"password1",
//!             "passwordConfirm":"password1","integrations":["page-1"]}"#,
//!     )
//!     .unwrap();
//!     service
//!         .invite_team_member(org.organization.id, request)
//!         .await
//!         .unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod request;
pub mod service;

pub use config::{ConfigError, TeamConfig};
pub use error::{FieldErrors, TeamError, TeamResult};
pub use request::{InviteMemberRequest, TeamMemberInvite};
pub use service::{CreatedOrganization, InviteResponse, TeamService};
