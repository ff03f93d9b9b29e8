//! Connected integrations
//!
//! An integration is an external channel (a social account, a page) that
//! members publish through. Memberships reference integrations by id only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A connected external account referenced by memberships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Integration {
    /// Integration ID
    pub id: String,

    /// Owning organization
    pub organization_id: Uuid,

    /// Account name on the platform
    pub name: String,

    /// Optional display name shown instead of `name`
    pub display: Option<String>,

    /// Platform identifier (e.g. "linkedin", "x")
    pub identifier: String,
}

impl Integration {
    /// Creates an integration without a display name.
    pub fn new(
        id: impl Into<String>,
        organization_id: Uuid,
        name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            organization_id,
            name: name.into(),
            display: None,
            identifier: identifier.into(),
        }
    }

    /// Set the display name.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Label for pickers: the display name when present, else the name.
    pub fn label(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.name)
    }
}
