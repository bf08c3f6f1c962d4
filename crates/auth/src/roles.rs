use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for route gating.
///
/// Roles are intentionally opaque strings at this layer; the names the
/// platform issues today are exposed as constants, but unknown names still
/// round-trip so a newer API does not break older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("Admin"));
    pub const INSTRUCTOR: Role = Role(Cow::Borrowed("Instructor"));
    pub const STUDENT: Role = Role(Cow::Borrowed("Student"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
