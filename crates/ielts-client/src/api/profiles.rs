use ielts_core::{endpoints, StudentDashboard, TeacherDashboard};

use crate::cancel::CancelToken;
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn student_dashboard(&self, cancel: &CancelToken) -> Result<StudentDashboard, ApiError> {
        self.get(endpoints::STUDENT_DASHBOARD)
            .cancel_on(cancel)
            .fetch()
            .await
    }

    pub async fn teacher_dashboard(&self, cancel: &CancelToken) -> Result<TeacherDashboard, ApiError> {
        self.get(endpoints::TEACHER_DASHBOARD)
            .cancel_on(cancel)
            .fetch()
            .await
    }
}
