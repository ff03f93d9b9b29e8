//! Team management service
//!
//! Business rules on top of a [`TeamStore`]: invitation checks, the strict
//! role-hierarchy rule for removals, and organization API key handling.

use serde::Serialize;
use std::sync::Arc;
use team_auth::{hash_password, ApiKey};
use team_org::{Integration, Membership, Organization, Role, TeamMember};
use team_store::{NewOrganization, NewTeamMember, StoreError, TeamStore};
use uuid::Uuid;

use crate::config::{ConfigError, TeamConfig};
use crate::error::{TeamError, TeamResult};
use crate::request::{InviteMemberRequest, TeamMemberInvite};

/// Response body for a successful invitation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct InviteResponse {
    /// Always `true`
    pub success: bool,
}

/// A newly created organization.
///
/// `api_key` is the only time the plaintext key is available.
#[derive(Clone)]
pub struct CreatedOrganization {
    /// The organization
    pub organization: Organization,
    /// Owner user ID
    pub owner_id: Uuid,
    /// Plaintext API key
    pub api_key: String,
}

impl std::fmt::Debug for CreatedOrganization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedOrganization")
            .field("organization", &self.organization)
            .field("owner_id", &self.owner_id)
            .finish_non_exhaustive()
    }
}

/// Team management service.
pub struct TeamService<S> {
    store: Arc<S>,
    config: TeamConfig,
}

impl<S> Clone for TeamService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: TeamStore> TeamService<S> {
    /// Create a service with the default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            config: TeamConfig::default(),
        }
    }

    /// Create a service with a validated configuration.
    pub fn with_config(store: Arc<S>, config: TeamConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Active configuration.
    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Organizations
    // ------------------------------------------------------------------

    /// Create an organization with its owner as SUPERADMIN.
    ///
    /// The owner's password is hashed on the blocking thread pool.
    pub async fn create_organization(
        &self,
        name: &str,
        owner_email: &str,
        owner_password: &str,
    ) -> TeamResult<CreatedOrganization> {
        let api_key = ApiKey::generate(self.config.api_key_length);
        let owner_password_hash = hash_blocking(owner_password.to_string()).await?;
        let created = self
            .store
            .create_organization_with_owner(NewOrganization {
                name: name.to_string(),
                owner_email: owner_email.to_string(),
                owner_password_hash,
                api_key_digest: api_key.digest,
            })
            .await?;

        tracing::info!(
            org_id = %created.organization.id,
            owner_id = %created.owner.id,
            "Organization created"
        );

        Ok(CreatedOrganization {
            organization: created.organization,
            owner_id: created.owner.id,
            api_key: api_key.plaintext,
        })
    }

    /// Number of organizations.
    pub async fn organization_count(&self) -> TeamResult<usize> {
        Ok(self.store.count_organizations().await?)
    }

    /// Look up an organization, failing when it does not exist.
    pub async fn organization(&self, org_id: Uuid) -> TeamResult<Organization> {
        self.store
            .get_organization(org_id)
            .await?
            .ok_or(TeamError::OrganizationNotFound)
    }

    /// Resolve an organization from a presented plaintext API key.
    pub async fn organization_by_api_key(&self, api_key: &str) -> TeamResult<Option<Organization>> {
        let digest = ApiKey::digest(api_key);
        Ok(self.store.get_organization_by_api_key_digest(&digest).await?)
    }

    /// Resolve an organization from its billing customer reference.
    pub async fn organization_by_customer_id(
        &self,
        customer_id: &str,
    ) -> TeamResult<Option<Organization>> {
        Ok(self.store.get_organization_by_customer_id(customer_id).await?)
    }

    /// Attach a billing customer reference.
    pub async fn set_payment_customer(
        &self,
        org_id: Uuid,
        customer_id: &str,
    ) -> TeamResult<Organization> {
        Ok(self.store.set_customer_id(org_id, customer_id).await?)
    }

    /// Replace the organization's API key and return the new plaintext key.
    ///
    /// The previous key stops resolving immediately.
    pub async fn rotate_api_key(&self, org_id: Uuid) -> TeamResult<String> {
        let api_key = ApiKey::generate(self.config.api_key_length);
        self.store
            .replace_api_key_digest(org_id, &api_key.digest)
            .await?;

        tracing::info!(org_id = %org_id, "API key rotated");
        Ok(api_key.plaintext)
    }

    /// Every organization a user belongs to, with their membership there.
    pub async fn organizations_for_user(
        &self,
        user_id: Uuid,
    ) -> TeamResult<Vec<(Organization, Membership)>> {
        Ok(self.store.list_orgs_for_user(user_id).await?)
    }

    /// A user's membership in one organization.
    pub async fn membership(&self, org_id: Uuid, user_id: Uuid) -> TeamResult<Option<Membership>> {
        Ok(self.store.get_membership(org_id, user_id).await?)
    }

    /// Integrations connected to an organization.
    pub async fn list_integrations(&self, org_id: Uuid) -> TeamResult<Vec<Integration>> {
        Ok(self.store.list_integrations(org_id).await?)
    }

    // ------------------------------------------------------------------
    // Team membership
    // ------------------------------------------------------------------

    /// Validate a raw invitation and create the member.
    ///
    /// # Errors
    ///
    /// - `Validation` listing every malformed field
    /// - then everything [`invite`](Self::invite) can return
    pub async fn invite_team_member(
        &self,
        org_id: Uuid,
        request: InviteMemberRequest,
    ) -> TeamResult<InviteResponse> {
        let invite = request.into_invite()?;
        self.invite(org_id, invite).await
    }

    /// Create a new user as a member of `org_id`.
    ///
    /// Password equality and the role restriction are checked here before
    /// the store is touched, whether or not the invite came through
    /// [`InviteMemberRequest`].
    pub async fn invite(&self, org_id: Uuid, invite: TeamMemberInvite) -> TeamResult<InviteResponse> {
        if invite.password != invite.password_confirm {
            return Err(TeamError::PasswordMismatch);
        }
        if !invite.role.is_invitable() {
            return Err(TeamError::RoleNotInvitable);
        }

        let password_hash = hash_blocking(invite.password).await?;
        let membership = self
            .store
            .create_team_member(
                org_id,
                NewTeamMember {
                    email: invite.email,
                    password_hash,
                    role: invite.role,
                    integrations: invite.integrations,
                    member_limit: self.config.max_team_members,
                },
            )
            .await?;

        tracing::info!(
            org_id = %org_id,
            user_id = %membership.user_id,
            role = %membership.role,
            "Team member invited"
        );

        Ok(InviteResponse { success: true })
    }

    /// Add an existing user to an organization as USER or ADMIN.
    ///
    /// The configured member limit applies here as it does to invitations.
    pub async fn add_user_to_organization(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> TeamResult<Membership> {
        if !role.is_invitable() {
            return Err(TeamError::RoleNotInvitable);
        }

        let membership = self
            .store
            .create_membership(org_id, user_id, role, self.config.max_team_members)
            .await?;
        tracing::info!(org_id = %org_id, user_id = %user_id, role = %role, "User added to organization");
        Ok(membership)
    }

    /// Remove `target_user_id` from `org_id` on behalf of an actor with
    /// `acting_role`.
    ///
    /// Removal is allowed only when the actor strictly outranks the target.
    /// The store checks the target's role and removes the row in one unit
    /// of work.
    ///
    /// # Returns
    ///
    /// The roster after removal
    pub async fn delete_team_member(
        &self,
        acting_role: Role,
        org_id: Uuid,
        target_user_id: Uuid,
    ) -> TeamResult<Vec<TeamMember>> {
        let removed = match self
            .store
            .delete_membership_outranked_by(org_id, target_user_id, acting_role)
            .await
        {
            Ok(membership) => membership,
            Err(StoreError::Outranked) => {
                tracing::warn!(
                    org_id = %org_id,
                    target_user_id = %target_user_id,
                    "Team member removal denied"
                );
                return Err(TeamError::InsufficientPermission);
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            org_id = %org_id,
            user_id = %target_user_id,
            role = %removed.role,
            "Team member removed"
        );

        self.get_team(org_id).await
    }

    /// Remove a member on behalf of another member of the same organization.
    ///
    /// The actor's role is read from their own membership. An actor outside
    /// the organization gets `InsufficientPermission`; `NotMember` is kept for
    /// a missing target.
    pub async fn delete_team_member_as(
        &self,
        actor_user_id: Uuid,
        org_id: Uuid,
        target_user_id: Uuid,
    ) -> TeamResult<Vec<TeamMember>> {
        let Some(actor) = self.store.get_membership(org_id, actor_user_id).await? else {
            tracing::warn!(
                org_id = %org_id,
                actor_user_id = %actor_user_id,
                "Removal requested by non-member"
            );
            return Err(TeamError::InsufficientPermission);
        };

        self.delete_team_member(actor.role, org_id, target_user_id)
            .await
    }

    /// Roster for display, in insertion order.
    pub async fn get_team(&self, org_id: Uuid) -> TeamResult<Vec<TeamMember>> {
        let team = self.store.list_memberships_for_org(org_id).await?;
        tracing::debug!(org_id = %org_id, members = team.len(), "Loaded team");
        Ok(team)
    }

    /// Disable (or re-enable) the accounts of every member below SUPERADMIN.
    ///
    /// The flag is account-wide: a user disabled through one organization is
    /// disabled everywhere.
    ///
    /// # Returns
    ///
    /// Number of users updated
    pub async fn disable_or_enable_non_super_admin_users(
        &self,
        org_id: Uuid,
        disable: bool,
    ) -> TeamResult<usize> {
        let updated = self
            .store
            .set_disabled_for_non_super_admins(org_id, disable)
            .await?;

        tracing::info!(org_id = %org_id, disable, updated, "Non-super-admin access toggled");
        Ok(updated)
    }
}

async fn hash_blocking(password: String) -> TeamResult<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| TeamError::Internal(format!("password hashing task failed: {e}")))??;
    Ok(hash)
}
