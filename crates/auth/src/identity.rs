use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claims::{TokenClaims, TokenError, validate_claims};
use crate::roles::Role;

/// Identity derived from a bearer token: what the UI displays and what the
/// guard checks.
///
/// # Invariants
/// - `roles` is never empty; claims with zero roles never become an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub full_name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl Identity {
    /// Derive an identity from decoded claims, validating them first.
    pub fn from_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<Self, TokenError> {
        validate_claims(claims, now)?;

        Ok(Self {
            full_name: claims.full_name.clone(),
            email: claims.email.clone(),
            roles: claims.roles.to_roles(),
        })
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}
