use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Role;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct OtpRequest {
    pub phone_number: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LoginVerifyRequest {
    pub phone_number: String,
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RegisterStartRequest {
    pub fullname: String,
    pub phone_number: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RegisterStartResponse {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RegisterVerifyRequest {
    pub user_id: Uuid,
    pub code: String,
}

/// Token pair issued by login and registration verification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TokenRefreshResponse {
    pub access: String,
}
