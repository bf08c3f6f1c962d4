//! Course catalog and authoring endpoints (`/courses...`).

use reqwest::Method;

use upskeel_core::CourseId;

use crate::dto::{Course, CourseUpdate, NewCourse, ReassignCourse};
use crate::error::ApiError;
use crate::ApiClient;

impl ApiClient {
    /// List the published catalog. Public; no token required.
    pub async fn courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_json("/courses").await
    }

    /// Fetch one course. Public; no token required.
    pub async fn course(&self, id: CourseId) -> Result<Course, ApiError> {
        self.get_json(&format!("/courses/{id}")).await
    }

    /// Create a course (Instructor). Returns the stored course.
    pub async fn create_course(&self, course: &NewCourse) -> Result<Course, ApiError> {
        let response = self
            .request(Method::POST, "/courses")
            .json(course)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Update title/description of an existing course (Instructor/Admin).
    pub async fn update_course(&self, id: CourseId, update: &CourseUpdate) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, &format!("/courses/update/{id}"))
            .json(update)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Delete a course (Admin).
    pub async fn delete_course(&self, id: CourseId) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/courses/{id}"))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Move a draft into the published catalog (Admin).
    pub async fn publish_course(&self, id: CourseId) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, &format!("/courses/publish/{id}"))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Hand a course to a different instructor (Admin).
    pub async fn reassign_course(&self, reassignment: &ReassignCourse) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, "/courses/reassign")
            .json(reassignment)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// All instructors' drafts (Admin).
    pub async fn draft_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_json("/courses/draft").await
    }

    /// The calling instructor's own drafts.
    pub async fn my_draft_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get_json("/courses/my-drafts").await
    }
}
