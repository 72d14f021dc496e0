use ielts_core::{
    endpoints, limits, ClaimSubmissionRequest, GradeSubmissionRequest, SubmissionQueue,
    SubmitWritingRequest, WritingSubmission,
};
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::client::ApiClient;
use crate::error::ApiError;

/// Submissions grouped the way the review page shows them.
#[derive(Debug, Clone)]
pub struct SubmissionQueues {
    pub all: Vec<WritingSubmission>,
    pub in_progress: Vec<WritingSubmission>,
    pub checked: Vec<WritingSubmission>,
}

pub fn validate_score(score: f64) -> Result<f64, ApiError> {
    if score.is_finite() && (limits::MIN_BAND_SCORE..=limits::MAX_BAND_SCORE).contains(&score) {
        Ok(score)
    } else {
        Err(ApiError::Validation(format!(
            "Score must be between {} and {}",
            limits::MIN_BAND_SCORE,
            limits::MAX_BAND_SCORE
        )))
    }
}

impl ApiClient {
    pub async fn submit_writing(&self, request: &SubmitWritingRequest) -> Result<(), ApiError> {
        self.post(endpoints::CHECKING_SUBMIT)
            .json(request)
            .execute()
            .await
    }

    pub async fn submissions(
        &self,
        queue: SubmissionQueue,
        cancel: &CancelToken,
    ) -> Result<Vec<WritingSubmission>, ApiError> {
        self.get(&queue.path()).cancel_on(cancel).fetch().await
    }

    /// Loads the three queues concurrently; fails if any of them fails.
    pub async fn submission_queues(&self, cancel: &CancelToken) -> Result<SubmissionQueues, ApiError> {
        let (all, in_progress, checked) = tokio::try_join!(
            self.submissions(SubmissionQueue::All, cancel),
            self.submissions(SubmissionQueue::InProgress, cancel),
            self.submissions(SubmissionQueue::Checked, cancel),
        )?;
        Ok(SubmissionQueues {
            all,
            in_progress,
            checked,
        })
    }

    pub async fn claim_submission(&self, submission_id: Uuid) -> Result<(), ApiError> {
        self.post(endpoints::CHECKING_CLAIM)
            .json(&ClaimSubmissionRequest { submission_id })
            .execute()
            .await
    }

    pub async fn grade_submission(
        &self,
        submission_id: Uuid,
        score: f64,
        feedback: &str,
    ) -> Result<(), ApiError> {
        let score = validate_score(score)?;
        if feedback.trim().is_empty() {
            return Err(ApiError::Validation("Feedback is required".to_string()));
        }
        self.post(endpoints::CHECKING_GRADE)
            .json(&GradeSubmissionRequest {
                submission_id,
                score,
                feedback: feedback.to_string(),
            })
            .execute()
            .await
    }
}
