//! In-memory store implementation
//!
//! All tables sit behind a single `RwLock`. Writes that touch more than one
//! row go through a [`Transaction`], which holds the write guard for its whole
//! lifetime and only applies staged rows on [`Transaction::commit`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use team_org::{normalize_email, Integration, Membership, Organization, Role, TeamMember, User};
use tokio::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::{NewOrganization, NewTeamMember, OrganizationWithOwner, TeamStore};

#[derive(Debug, Default)]
struct Tables {
    /// Insertion order
    organizations: Vec<Organization>,
    users: HashMap<Uuid, User>,
    /// Normalized email -> user ID
    email_index: HashMap<String, Uuid>,
    /// Insertion order, which is also roster order
    memberships: Vec<Membership>,
    integrations: Vec<Integration>,
}

impl Tables {
    fn organization(&self, org_id: Uuid) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == org_id)
    }

    fn organization_mut(&mut self, org_id: Uuid) -> StoreResult<&mut Organization> {
        self.organizations
            .iter_mut()
            .find(|o| o.id == org_id)
            .ok_or(StoreError::OrganizationNotFound)
    }

    fn require_organization(&self, org_id: Uuid) -> StoreResult<()> {
        self.organization(org_id)
            .map(|_| ())
            .ok_or(StoreError::OrganizationNotFound)
    }

    fn member_count(&self, org_id: Uuid) -> usize {
        self.memberships
            .iter()
            .filter(|m| m.organization_id == org_id)
            .count()
    }
}

/// A unit of work over the in-memory tables.
///
/// Dropping a transaction without calling [`commit`](Self::commit) discards
/// every staged row.
pub struct Transaction<'a> {
    tables: RwLockWriteGuard<'a, Tables>,
    organizations: Vec<Organization>,
    users: Vec<User>,
    memberships: Vec<Membership>,
}

impl Transaction<'_> {
    /// Stage an organization.
    pub fn insert_organization(&mut self, organization: Organization) {
        self.organizations.push(organization);
    }

    /// Stage a user. Fails with `EmailTaken` if the email is registered or
    /// already staged.
    pub fn insert_user(&mut self, user: User) -> StoreResult<()> {
        let taken = self.tables.email_index.contains_key(&user.email)
            || self.users.iter().any(|u| u.email == user.email);
        if taken {
            return Err(StoreError::EmailTaken);
        }

        self.users.push(user);
        Ok(())
    }

    /// Stage a membership.
    ///
    /// The organization and user must exist (committed or staged) and the
    /// pair must not already be a member. When `member_limit` is set, the
    /// organization's current size must be below it.
    pub fn insert_membership(
        &mut self,
        membership: Membership,
        member_limit: Option<usize>,
    ) -> StoreResult<()> {
        let org_id = membership.organization_id;
        let user_id = membership.user_id;

        let org_known = self.tables.organization(org_id).is_some()
            || self.organizations.iter().any(|o| o.id == org_id);
        if !org_known {
            return Err(StoreError::OrganizationNotFound);
        }

        let user_known =
            self.tables.users.contains_key(&user_id) || self.users.iter().any(|u| u.id == user_id);
        if !user_known {
            return Err(StoreError::UserNotFound);
        }

        let exists = self
            .tables
            .memberships
            .iter()
            .chain(self.memberships.iter())
            .any(|m| m.organization_id == org_id && m.user_id == user_id);
        if exists {
            return Err(StoreError::AlreadyMember);
        }

        if let Some(limit) = member_limit {
            let staged = self
                .memberships
                .iter()
                .filter(|m| m.organization_id == org_id)
                .count();
            if self.tables.member_count(org_id) + staged >= limit {
                return Err(StoreError::MemberLimitReached(limit));
            }
        }

        self.memberships.push(membership);
        Ok(())
    }

    /// Apply every staged row and release the write lock.
    pub fn commit(self) {
        let Transaction {
            mut tables,
            organizations,
            users,
            memberships,
        } = self;

        tables.organizations.extend(organizations);
        for user in users {
            tables.email_index.insert(user.email.clone(), user.id);
            tables.users.insert(user.id, user);
        }
        tables.memberships.extend(memberships);
    }
}

/// In-memory [`TeamStore`].
///
/// Suitable for single-process deployments and tests. Clones share the
/// same tables.
#[derive(Clone, Default)]
pub struct MemoryTeamStore {
    tables: Arc<RwLock<Tables>>,
}

impl std::fmt::Debug for MemoryTeamStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTeamStore").finish_non_exhaustive()
    }
}

impl MemoryTeamStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction. Waits for every other reader and writer to finish.
    pub async fn transaction(&self) -> Transaction<'_> {
        Transaction {
            tables: self.tables.write().await,
            organizations: Vec::new(),
            users: Vec::new(),
            memberships: Vec::new(),
        }
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn create_organization_with_owner(
        &self,
        new_org: NewOrganization,
    ) -> StoreResult<OrganizationWithOwner> {
        let organization = Organization::new(new_org.name, new_org.api_key_digest);
        let owner = User::new(&new_org.owner_email, new_org.owner_password_hash);
        let membership = Membership::new(organization.id, owner.id, Role::SuperAdmin);

        let mut tx = self.transaction().await;
        tx.insert_organization(organization.clone());
        tx.insert_user(owner.clone())?;
        tx.insert_membership(membership.clone(), None)?;
        tx.commit();

        tracing::debug!(org_id = %organization.id, owner_id = %owner.id, "Stored organization with owner");

        Ok(OrganizationWithOwner {
            organization,
            owner,
            membership,
        })
    }

    async fn count_organizations(&self) -> StoreResult<usize> {
        Ok(self.tables.read().await.organizations.len())
    }

    async fn get_organization(&self, org_id: Uuid) -> StoreResult<Option<Organization>> {
        Ok(self.tables.read().await.organization(org_id).cloned())
    }

    async fn get_organization_by_api_key_digest(
        &self,
        digest: &str,
    ) -> StoreResult<Option<Organization>> {
        let tables = self.tables.read().await;
        Ok(tables
            .organizations
            .iter()
            .find(|o| o.api_key_digest == digest)
            .cloned())
    }

    async fn get_organization_by_customer_id(
        &self,
        customer_id: &str,
    ) -> StoreResult<Option<Organization>> {
        let tables = self.tables.read().await;
        Ok(tables
            .organizations
            .iter()
            .find(|o| o.payment_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }

    async fn set_customer_id(&self, org_id: Uuid, customer_id: &str) -> StoreResult<Organization> {
        let mut tables = self.tables.write().await;
        let organization = tables.organization_mut(org_id)?;
        organization.set_payment_customer(customer_id);
        Ok(organization.clone())
    }

    async fn replace_api_key_digest(
        &self,
        org_id: Uuid,
        digest: &str,
    ) -> StoreResult<Organization> {
        let mut tables = self.tables.write().await;
        let organization = tables.organization_mut(org_id)?;
        organization.rotate_api_key(digest);
        Ok(organization.clone())
    }

    async fn get_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .email_index
            .get(&normalize_email(email))
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create_membership(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        role: Role,
        member_limit: Option<usize>,
    ) -> StoreResult<Membership> {
        let membership = Membership::new(org_id, user_id, role);

        let mut tx = self.transaction().await;
        tx.insert_membership(membership.clone(), member_limit)?;
        tx.commit();

        Ok(membership)
    }

    async fn create_team_member(
        &self,
        org_id: Uuid,
        member: NewTeamMember,
    ) -> StoreResult<Membership> {
        let user = User::new(&member.email, member.password_hash);
        let membership =
            Membership::new(org_id, user.id, member.role).with_integrations(member.integrations);

        let mut tx = self.transaction().await;
        tx.insert_user(user)?;
        tx.insert_membership(membership.clone(), member.member_limit)?;
        tx.commit();

        Ok(membership)
    }

    async fn get_membership(&self, org_id: Uuid, user_id: Uuid) -> StoreResult<Option<Membership>> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .find(|m| m.organization_id == org_id && m.user_id == user_id)
            .cloned())
    }

    async fn list_memberships_for_org(&self, org_id: Uuid) -> StoreResult<Vec<TeamMember>> {
        let tables = self.tables.read().await;
        tables.require_organization(org_id)?;

        Ok(tables
            .memberships
            .iter()
            .filter(|m| m.organization_id == org_id)
            .filter_map(|m| {
                tables
                    .users
                    .get(&m.user_id)
                    .map(|user| TeamMember::from_membership(m, user.email.clone()))
            })
            .collect())
    }

    async fn list_orgs_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<(Organization, Membership)>> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                tables
                    .organization(m.organization_id)
                    .map(|org| (org.clone(), m.clone()))
            })
            .collect())
    }

    async fn delete_membership(&self, org_id: Uuid, user_id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let position = tables
            .memberships
            .iter()
            .position(|m| m.organization_id == org_id && m.user_id == user_id)
            .ok_or(StoreError::NotAMember)?;

        tables.memberships.remove(position);
        Ok(())
    }

    async fn delete_membership_outranked_by(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        actor: Role,
    ) -> StoreResult<Membership> {
        let mut tables = self.tables.write().await;
        let position = tables
            .memberships
            .iter()
            .position(|m| m.organization_id == org_id && m.user_id == user_id)
            .ok_or(StoreError::NotAMember)?;

        if !actor.outranks(tables.memberships[position].role) {
            return Err(StoreError::Outranked);
        }

        Ok(tables.memberships.remove(position))
    }

    async fn set_disabled_for_non_super_admins(
        &self,
        org_id: Uuid,
        disable: bool,
    ) -> StoreResult<usize> {
        let mut tables = self.tables.write().await;
        tables.require_organization(org_id)?;

        let user_ids: Vec<Uuid> = tables
            .memberships
            .iter()
            .filter(|m| m.organization_id == org_id && m.role < Role::SuperAdmin)
            .map(|m| m.user_id)
            .collect();

        let mut updated = 0;
        for user_id in user_ids {
            if let Some(user) = tables.users.get_mut(&user_id) {
                user.disabled = disable;
                updated += 1;
            }
        }

        Ok(updated)
    }

    async fn add_integration(&self, integration: Integration) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_organization(integration.organization_id)?;

        let existing = tables
            .integrations
            .iter()
            .position(|i| i.id == integration.id && i.organization_id == integration.organization_id);
        match existing {
            Some(index) => tables.integrations[index] = integration,
            None => tables.integrations.push(integration),
        }

        Ok(())
    }

    async fn list_integrations(&self, org_id: Uuid) -> StoreResult<Vec<Integration>> {
        let tables = self.tables.read().await;
        Ok(tables
            .integrations
            .iter()
            .filter(|i| i.organization_id == org_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
