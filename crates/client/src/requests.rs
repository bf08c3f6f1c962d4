//! Instructor-approval workflow endpoints (`/instructorrequests...`, Admin).

use reqwest::Method;

use upskeel_core::RequestId;

use crate::dto::{InstructorRequest, ReviewAction};
use crate::error::ApiError;
use crate::ApiClient;

impl ApiClient {
    /// List pending instructor requests.
    pub async fn instructor_requests(&self) -> Result<Vec<InstructorRequest>, ApiError> {
        self.get_json("/instructorrequests").await
    }

    /// Approve or reject one request.
    pub async fn review_instructor_request(
        &self,
        id: RequestId,
        action: ReviewAction,
    ) -> Result<(), ApiError> {
        let response = self
            .request(
                Method::PATCH,
                &format!("/instructorrequests/{id}/{}", action.as_str()),
            )
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
