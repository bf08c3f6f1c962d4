use std::collections::HashSet;

use crate::roles::Role;

/// Where to send a visitor that may not view the requested target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Not authenticated at all.
    Login,
    /// Authenticated, but holding none of the required roles.
    Unauthorized,
}

/// Outcome of an access check for one navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(RedirectTarget),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Decide whether the current session may view a navigation target.
///
/// Matching is any-of: holding one of `required` is enough. An empty
/// `required` list means "any authenticated visitor".
///
/// - No IO
/// - No panics
/// - No caching (re-evaluated on every navigation attempt, so a role change
///   or logout is reflected on the very next navigation)
pub fn authorize(required: &[Role], current: &[Role]) -> Decision {
    if current.is_empty() {
        return Decision::Redirect(RedirectTarget::Login);
    }

    if required.is_empty() {
        return Decision::Allow;
    }

    let held: HashSet<&str> = current.iter().map(|r| r.as_str()).collect();

    if required.iter().any(|r| held.contains(r.as_str())) {
        Decision::Allow
    } else {
        Decision::Redirect(RedirectTarget::Unauthorized)
    }
}
