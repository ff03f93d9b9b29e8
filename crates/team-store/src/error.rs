//! Store error types

use thiserror::Error;

/// Errors raised by [`TeamStore`](crate::TeamStore) implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A user with this email already exists
    #[error("Email is already registered")]
    EmailTaken,

    /// The user already belongs to the organization
    #[error("User is already a member of this organization")]
    AlreadyMember,

    /// No membership for this (organization, user) pair
    #[error("User is not part of this organization")]
    NotAMember,

    /// The acting role does not strictly outrank the target's role
    #[error("Acting role does not outrank the target")]
    Outranked,

    /// Organization does not exist
    #[error("Organization not found")]
    OrganizationNotFound,

    /// User does not exist
    #[error("User not found")]
    UserNotFound,

    /// The organization already has the maximum number of members
    #[error("Organization has reached its limit of {0} members")]
    MemberLimitReached(usize),

    /// Backend failure (connection loss, timeout, constraint the backend could not map)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
