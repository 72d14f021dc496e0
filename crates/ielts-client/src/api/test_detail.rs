use ielts_core::{endpoints, TestDetail};
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn test_detail(&self, test_id: Uuid, cancel: &CancelToken) -> Result<TestDetail, ApiError> {
        self.get(&endpoints::test_detail(test_id))
            .cancel_on(cancel)
            .fetch()
            .await
    }
}
