use ielts_core::{
    endpoints, AuthTokens, LoginVerifyRequest, OtpRequest, RegisterStartRequest,
    RegisterStartResponse, RegisterVerifyRequest, Role,
};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::router::Route;

impl ApiClient {
    /// Asks the backend to send a one-time login code to `phone_number`.
    pub async fn send_otp(&self, phone_number: &str) -> Result<(), ApiError> {
        self.post(endpoints::OTP_INGEST)
            .json(&OtpRequest {
                phone_number: phone_number.to_string(),
            })
            .execute()
            .await
    }

    pub async fn verify_login(&self, phone_number: &str, otp: &str) -> Result<AuthTokens, ApiError> {
        self.post(endpoints::LOGIN_VERIFY)
            .json(&LoginVerifyRequest {
                phone_number: phone_number.to_string(),
                otp: otp.to_string(),
            })
            .fetch()
            .await
    }

    pub async fn start_registration(
        &self,
        fullname: &str,
        phone_number: &str,
        role: Role,
    ) -> Result<Uuid, ApiError> {
        let response: RegisterStartResponse = self
            .post(endpoints::REGISTER_START)
            .json(&RegisterStartRequest {
                fullname: fullname.to_string(),
                phone_number: phone_number.to_string(),
                role,
            })
            .fetch()
            .await?;
        Ok(response.user_id)
    }

    pub async fn verify_registration(&self, user_id: Uuid, code: &str) -> Result<AuthTokens, ApiError> {
        self.post(endpoints::REGISTER_VERIFY)
            .json(&RegisterVerifyRequest {
                user_id,
                code: code.to_string(),
            })
            .fetch()
            .await
    }

    /// Signs in with freshly issued tokens and navigates to the role's
    /// landing route.
    pub fn complete_login(&self, tokens: &AuthTokens) -> Route {
        let gate = self.gate();
        gate.login(&tokens.access, &tokens.refresh, tokens.role);
        let landing = Route::landing(tokens.role);
        gate.router().push(landing.clone());
        landing
    }
}
