//! Wire types for the Upskeel API.
//!
//! Field names follow the API's camelCase convention via serde renaming;
//! the one PascalCase payload ([`NewCourse`]) is called out where it occurs.

use serde::{Deserialize, Serialize};

use upskeel_auth::RoleClaim;
use upskeel_core::{CourseId, DomainError, DomainResult, EnrollmentId, RequestId, UserId};

/// A course as returned by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    /// Some endpoints also echo a legacy `name` field.
    #[serde(default)]
    pub name: Option<String>,
    pub description: String,
    pub instructor_name: String,
    #[serde(default)]
    pub instructor_email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payload for creating a course. This endpoint expects PascalCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub is_draft: bool,
}

impl NewCourse {
    /// Validate a course draft before it goes over the wire.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        is_draft: bool,
    ) -> DomainResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("course title cannot be empty"));
        }

        Ok(Self {
            title,
            description: description.into().trim().to_string(),
            is_draft,
        })
    }
}

/// Payload for updating an existing course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    pub title: String,
    pub description: String,
}

/// Payload for handing a course to a different instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignCourse {
    pub course_id: CourseId,
    pub instructor_id: UserId,
}

/// A student's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub full_name: String,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    /// Completion percentage, 0..=100.
    pub progress: f64,
    pub created_at: String,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub instructor_email: Option<String>,
}

/// An account row on the admin user screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub full_name: String,
    pub email: String,
    /// Mirrors the token's role claim: a single string or an array.
    pub roles: RoleClaim,
    pub is_approved: bool,
}

/// The current account's profile (`GET /auth/me`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub roles: Vec<String>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// Stored UI preferences attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub notifications: bool,
    #[serde(default)]
    pub dark_mode: bool,
}

/// A pending request to become an instructor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorRequest {
    pub id: RequestId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub status: String,
    #[serde(default)]
    pub requested_at: Option<String>,
}

/// Payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: String,
}

impl Registration {
    /// Validate signup input before it goes over the wire.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> DomainResult<Self> {
        let full_name = full_name.into().trim().to_string();
        if full_name.is_empty() {
            return Err(DomainError::validation("full name cannot be empty"));
        }

        let email = email.into().trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let password = password.into();
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        Ok(Self {
            email,
            full_name,
            password,
            role: role.into(),
        })
    }
}

/// Moderation verb for pending accounts and instructor requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// Path segment the API expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}
