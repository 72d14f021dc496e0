use ielts_core::{endpoints, limits, Payment, TopupRequest};

use crate::client::ApiClient;
use crate::error::ApiError;

pub fn validate_topup_amount(amount: u64) -> Result<u64, ApiError> {
    if (limits::MIN_TOPUP_AMOUNT..=limits::MAX_TOPUP_AMOUNT).contains(&amount) {
        Ok(amount)
    } else {
        Err(ApiError::Validation(format!(
            "Amount must be between {} and {} UZS",
            limits::MIN_TOPUP_AMOUNT,
            limits::MAX_TOPUP_AMOUNT
        )))
    }
}

impl ApiClient {
    /// Creates a top-up payment. When the gateway needs the user to pay
    /// elsewhere, the returned payment carries a `redirect_url`.
    pub async fn top_up(&self, amount: u64) -> Result<Payment, ApiError> {
        let amount = validate_topup_amount(amount)?;
        self.post(endpoints::PAYMENTS_TOPUP)
            .json(&TopupRequest { amount })
            .fetch()
            .await
    }
}
