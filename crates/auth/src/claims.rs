use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::Role;

/// Decoded bearer-token payload (transport-agnostic).
///
/// The client never verifies signatures. The payload is a display and
/// gating hint only; every protected call is re-checked server-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Display name of the account.
    #[serde(default, alias = "fullName", alias = "name")]
    pub full_name: String,

    /// Account email.
    #[serde(default)]
    pub email: String,

    /// Granted role names.
    #[serde(default, alias = "role")]
    pub roles: RoleClaim,

    /// Expiry as Unix seconds, when the issuer includes one.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// The role claim arrives as a single string or an array, depending on how
/// many roles the account holds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl Default for RoleClaim {
    fn default() -> Self {
        RoleClaim::Many(Vec::new())
    }
}

impl RoleClaim {
    /// Normalize into a role list, dropping blank entries.
    pub fn to_roles(&self) -> Vec<Role> {
        let names: Vec<&str> = match self {
            RoleClaim::One(name) => vec![name.as_str()],
            RoleClaim::Many(names) => names.iter().map(String::as_str).collect(),
        };

        names
            .into_iter()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Role::new(name.to_string()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.to_roles().is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not a decodable bearer token")]
    Malformed,

    #[error("token payload is not a valid claims object")]
    Payload,

    #[error("token carries no roles")]
    NoRoles,

    #[error("token has expired")]
    Expired,
}

/// Decode the payload segment of a bearer token without verifying it.
///
/// This is the client-side half of a JWT: base64url-decode the middle
/// segment and read the claims. Signature checking stays on the server.
pub fn decode_token_payload(token: &str) -> Result<TokenClaims, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::Malformed)?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.as_bytes())
        .map_err(|_| TokenError::Malformed)?;

    serde_json::from_slice(&bytes).map_err(|_| TokenError::Payload)
}

/// Deterministically validate decoded claims.
///
/// A payload with zero roles never becomes a session, and an expired `exp`
/// is treated the same as an undecodable token.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.roles.is_empty() {
        return Err(TokenError::NoRoles);
    }

    if let Some(exp) = claims.exp {
        if now.timestamp() >= exp {
            return Err(TokenError::Expired);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    fn mint(payload: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("failed to encode token")
    }

    #[test]
    fn decodes_array_role_claim() {
        let token = mint(json!({
            "fullName": "Alice Smith",
            "email": "alice@example.com",
            "roles": ["Instructor", "Student"],
            "exp": (Utc::now() + Duration::minutes(10)).timestamp(),
        }));

        let claims = decode_token_payload(&token).unwrap();
        assert_eq!(claims.full_name, "Alice Smith");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(
            claims.roles.to_roles(),
            vec![Role::INSTRUCTOR, Role::STUDENT]
        );
        assert!(validate_claims(&claims, Utc::now()).is_ok());
    }

    #[test]
    fn decodes_single_string_role_claim() {
        let token = mint(json!({
            "name": "Bob",
            "email": "bob@example.com",
            "role": "Student",
        }));

        let claims = decode_token_payload(&token).unwrap();
        assert_eq!(claims.full_name, "Bob");
        assert_eq!(claims.roles.to_roles(), vec![Role::STUDENT]);
    }

    #[test]
    fn zero_roles_is_not_a_session() {
        let token = mint(json!({
            "fullName": "Carol",
            "email": "carol@example.com",
            "roles": [],
        }));

        let claims = decode_token_payload(&token).unwrap();
        assert_eq!(
            validate_claims(&claims, Utc::now()),
            Err(TokenError::NoRoles)
        );
    }

    #[test]
    fn blank_role_names_are_dropped() {
        let token = mint(json!({ "roles": ["  ", ""] }));

        let claims = decode_token_payload(&token).unwrap();
        assert_eq!(
            validate_claims(&claims, Utc::now()),
            Err(TokenError::NoRoles)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let exp = (Utc::now() - Duration::minutes(1)).timestamp();
        let token = mint(json!({ "roles": ["Admin"], "exp": exp }));

        let claims = decode_token_payload(&token).unwrap();
        assert_eq!(
            validate_claims(&claims, Utc::now()),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            decode_token_payload("definitely-not-a-token"),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            decode_token_payload("a.!!!not-base64!!!.c"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn non_json_payload_is_rejected() {
        let token = format!("x.{}.y", URL_SAFE_NO_PAD.encode(b"not json"));
        assert_eq!(decode_token_payload(&token), Err(TokenError::Payload));
    }

    #[test]
    fn missing_identity_fields_default_to_empty() {
        let token = mint(json!({ "roles": ["Student"] }));

        let claims = decode_token_payload(&token).unwrap();
        assert!(claims.full_name.is_empty());
        assert!(claims.email.is_empty());
        assert!(validate_claims(&claims, Utc::now()).is_ok());
    }
}
