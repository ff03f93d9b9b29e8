//! # Team Credentials
//!
//! Credential primitives used by the team service:
//! - **Passwords**: Argon2id hashing and verification; plaintext never leaves the call
//! - **API keys**: Random organization keys persisted only as a SHA-256 digest
//!
//! ```rust
//! use team_auth::{hash_password, verify_password, ApiKey};
//!
//! let hash = hash_password("s3cret-pass").unwrap();
//! assert!(verify_password("s3cret-pass", &hash).unwrap());
//!
//! let key = ApiKey::generate(40);
//! assert_eq!(ApiKey::digest(&key.plaintext), key.digest);
//! ```

pub mod api_key;
pub mod error;
pub mod password;

pub use api_key::ApiKey;
pub use error::{CredentialError, CredentialResult};
pub use password::{hash_password, verify_password};
