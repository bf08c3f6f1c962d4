//! Enrollment endpoints (`/enrollments...`).

use reqwest::Method;

use upskeel_core::CourseId;

use crate::dto::Enrollment;
use crate::error::ApiError;
use crate::ApiClient;

impl ApiClient {
    /// The calling student's enrollments.
    pub async fn my_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        self.get_json("/enrollments/myenrollments").await
    }

    /// Enroll the calling student in a course.
    pub async fn enroll(&self, course_id: CourseId) -> Result<Enrollment, ApiError> {
        let response = self
            .request(Method::POST, &format!("/enrollments/enroll/{course_id}"))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}
