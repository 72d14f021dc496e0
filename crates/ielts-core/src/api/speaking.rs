use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SpeakingRequestCreate {
    pub phone_number: String,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub checklist: serde_json::Map<String, serde_json::Value>,
}
