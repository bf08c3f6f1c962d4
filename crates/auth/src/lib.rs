//! `upskeel-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod guard;
pub mod identity;
pub mod roles;

pub use claims::{RoleClaim, TokenClaims, TokenError, decode_token_payload, validate_claims};
pub use guard::{Decision, RedirectTarget, authorize};
pub use identity::Identity;
pub use roles::Role;
