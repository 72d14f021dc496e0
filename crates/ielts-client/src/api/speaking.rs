use ielts_core::{endpoints, SpeakingRequest, SpeakingRequestCreate};

use crate::cancel::CancelToken;
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn request_speaking(
        &self,
        request: &SpeakingRequestCreate,
    ) -> Result<SpeakingRequest, ApiError> {
        self.post(endpoints::SPEAKING_REQUEST)
            .json(request)
            .fetch()
            .await
    }

    pub async fn my_speaking_requests(
        &self,
        cancel: &CancelToken,
    ) -> Result<Vec<SpeakingRequest>, ApiError> {
        self.get(endpoints::SPEAKING_MINE)
            .cancel_on(cancel)
            .fetch()
            .await
    }
}
