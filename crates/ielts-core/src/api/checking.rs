use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Teacher-side views of the writing review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionQueue {
    /// Unclaimed submissions from all students.
    All,
    /// Claimed by the current teacher, not yet graded.
    InProgress,
    /// Graded by the current teacher.
    Checked,
}

impl SubmissionQueue {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InProgress => "in-progress",
            Self::Checked => "checked",
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        format!("/teacher-checking/{}/", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum WritingTask {
    #[serde(rename = "task_1")]
    TaskOne,
    #[serde(rename = "task_2")]
    TaskTwo,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SubmitWritingRequest {
    pub user_test_id: Uuid,
    pub task: WritingTask,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ClaimSubmissionRequest {
    pub submission_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GradeSubmissionRequest {
    pub submission_id: Uuid,
    pub score: f64,
    pub feedback: String,
}
