//! Organization domain models
//!
//! Organizations are the billing and ownership aggregate. They own their
//! memberships and an API key used by automation clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization groups users and integrations under one billing account.
///
/// Only the digest of the API key is kept; the plaintext key is handed out
/// once, when it is generated or rotated.
///
/// # Examples
///
/// ```
/// use team_org::Organization;
///
/// let org = Organization::new("Acme Corp", "digest");
/// assert_eq!(org.name, "Acme Corp");
/// assert!(org.payment_customer_id.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for the organization
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Digest of the current API key
    #[serde(skip_serializing, default)]
    pub api_key_digest: String,

    /// Billing provider customer reference
    pub payment_customer_id: Option<String>,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization.
    ///
    /// # Arguments
    ///
    /// * `name` - The organization name
    /// * `api_key_digest` - Digest of the initial API key
    pub fn new(name: impl Into<String>, api_key_digest: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            api_key_digest: api_key_digest.into(),
            payment_customer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the API key digest and bump `updated_at`.
    pub fn rotate_api_key(&mut self, digest: impl Into<String>) {
        self.api_key_digest = digest.into();
        self.updated_at = Utc::now();
    }

    /// Attach the billing customer reference.
    pub fn set_payment_customer(&mut self, customer_id: impl Into<String>) {
        self.payment_customer_id = Some(customer_id.into());
        self.updated_at = Utc::now();
    }
}
