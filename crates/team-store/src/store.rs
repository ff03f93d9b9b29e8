//! Store abstraction
//!
//! The [`TeamStore`] trait is the persistence boundary for organizations,
//! users and memberships. Compound operations (`create_organization_with_owner`,
//! `create_team_member`) must be atomic: an implementation either applies
//! every row or none of them. Uniqueness of emails and of (organization, user)
//! pairs is enforced here, inside the same unit of work as the insert.

use async_trait::async_trait;
use team_org::{Integration, Membership, Organization, Role, TeamMember, User};
use uuid::Uuid;

use crate::error::StoreResult;

/// Input for creating an organization together with its owner.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    /// Organization name
    pub name: String,
    /// Owner email
    pub owner_email: String,
    /// Owner password hash (already hashed)
    pub owner_password_hash: String,
    /// Digest of the initial API key
    pub api_key_digest: String,
}

/// Result of [`TeamStore::create_organization_with_owner`].
#[derive(Debug, Clone)]
pub struct OrganizationWithOwner {
    /// The new organization
    pub organization: Organization,
    /// The owner account
    pub owner: User,
    /// The owner's SUPERADMIN membership
    pub membership: Membership,
}

/// Input for creating a new user directly as a team member.
#[derive(Debug, Clone)]
pub struct NewTeamMember {
    /// Member email
    pub email: String,
    /// Password hash (already hashed)
    pub password_hash: String,
    /// Role to grant
    pub role: Role,
    /// Integration IDs the member may act on
    pub integrations: Vec<String>,
    /// Reject the insert when the organization already has this many members
    pub member_limit: Option<usize>,
}

/// Persistence boundary for team management.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Create an organization, its owner and the owner's SUPERADMIN membership atomically.
    async fn create_organization_with_owner(
        &self,
        new_org: NewOrganization,
    ) -> StoreResult<OrganizationWithOwner>;

    /// Number of organizations.
    async fn count_organizations(&self) -> StoreResult<usize>;

    /// Look up an organization by ID.
    async fn get_organization(&self, org_id: Uuid) -> StoreResult<Option<Organization>>;

    /// Look up an organization by the digest of its API key.
    async fn get_organization_by_api_key_digest(
        &self,
        digest: &str,
    ) -> StoreResult<Option<Organization>>;

    /// Look up an organization by its billing customer reference.
    async fn get_organization_by_customer_id(
        &self,
        customer_id: &str,
    ) -> StoreResult<Option<Organization>>;

    /// Attach a billing customer reference.
    async fn set_customer_id(&self, org_id: Uuid, customer_id: &str) -> StoreResult<Organization>;

    /// Replace the API key digest.
    async fn replace_api_key_digest(&self, org_id: Uuid, digest: &str)
        -> StoreResult<Organization>;

    /// Look up a user by ID.
    async fn get_user(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// Look up a user by email (normalized before comparison).
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Add an existing user to an organization.
    ///
    /// Fails with `AlreadyMember` when the pair exists and with
    /// `MemberLimitReached` when `member_limit` is set and already met.
    async fn create_membership(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
        member_limit: Option<usize>,
    ) -> StoreResult<Membership>;

    /// Create a user and their membership atomically.
    ///
    /// Fails with `EmailTaken` when the email is registered.
    async fn create_team_member(
        &self,
        org_id: Uuid,
        member: NewTeamMember,
    ) -> StoreResult<Membership>;

    /// Look up the membership for a (organization, user) pair.
    async fn get_membership(&self, org_id: Uuid, user_id: Uuid) -> StoreResult<Option<Membership>>;

    /// Roster for an organization, in insertion order.
    async fn list_memberships_for_org(&self, org_id: Uuid) -> StoreResult<Vec<TeamMember>>;

    /// Every organization a user belongs to, with the matching membership.
    async fn list_orgs_for_user(&self, user_id: Uuid)
        -> StoreResult<Vec<(Organization, Membership)>>;

    /// Remove a membership. Fails with `NotAMember` when absent.
    async fn delete_membership(&self, org_id: Uuid, user_id: Uuid) -> StoreResult<()>;

    /// Remove a membership only if `actor` strictly outranks its role.
    ///
    /// The role is read and the row removed in one unit of work, so a
    /// concurrent role change cannot slip between the check and the delete.
    /// Fails with `NotAMember` when absent and `Outranked` when the check fails.
    ///
    /// # Returns
    ///
    /// The removed membership
    async fn delete_membership_outranked_by(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        actor: Role,
    ) -> StoreResult<Membership>;

    /// Set the account disabled flag on every user whose role in `org_id` is
    /// below SUPERADMIN.
    ///
    /// # Returns
    ///
    /// Number of users updated
    async fn set_disabled_for_non_super_admins(
        &self,
        org_id: Uuid,
        disable: bool,
    ) -> StoreResult<usize>;

    /// Register a connected integration.
    async fn add_integration(&self, integration: Integration) -> StoreResult<()>;

    /// Integrations connected to an organization.
    async fn list_integrations(&self, org_id: Uuid) -> StoreResult<Vec<Integration>>;
}
