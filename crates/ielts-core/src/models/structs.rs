use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{PaymentStatus, Role, UserTestStatus};
use super::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    #[serde(default)]
    pub telegram_username: Option<String>,
    pub phone_number: String,
    pub role: Role,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user: User,
    pub balance: Money,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_offline: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TeacherProfile {
    pub id: Uuid,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog entry; `purchased` is computed per requesting student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TestListItem {
    pub id: Uuid,
    pub title: String,
    pub price: Money,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub purchased: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TestSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserTest {
    pub id: Uuid,
    pub test: TestSummary,
    pub status: UserTestStatus,
    pub price_paid: Money,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TestResult {
    pub id: Uuid,
    pub user_test: UserTest,
    #[serde(default)]
    pub listening_score: Option<f64>,
    #[serde(default)]
    pub reading_score: Option<f64>,
    #[serde(default)]
    pub writing_score: Option<f64>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub errors_analysis: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Payment {
    pub id: Uuid,
    pub student: Uuid,
    pub provider: String,
    pub status: PaymentStatus,
    pub is_paid: bool,
    pub amount: Money,
    pub currency: String,
    #[serde(default)]
    pub provider_invoice_id: Option<String>,
    #[serde(default)]
    pub provider_txn_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListeningSection {
    pub id: Uuid,
    pub name: String,
    pub mp3_file: String,
    #[serde(default)]
    pub question_set_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Listening {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<ListeningSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadingPassage {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub question_set_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Reading {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub passages: Vec<ReadingPassage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskOne {
    pub id: Uuid,
    pub topic: String,
    #[serde(default)]
    pub image_title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskTwo {
    pub id: Uuid,
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Writing {
    pub id: Uuid,
    pub task_one: TaskOne,
    pub task_two: TaskTwo,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TestDetail {
    pub id: Uuid,
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub listening: Option<Listening>,
    #[serde(default)]
    pub reading: Option<Reading>,
    #[serde(default)]
    pub writing: Option<Writing>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TestDetail {
    /// Section names present in this test, in exam order.
    #[must_use]
    pub fn sections(&self) -> Vec<&'static str> {
        let mut sections = Vec::new();
        if self.listening.is_some() {
            sections.push("listening");
        }
        if self.reading.is_some() {
            sections.push("reading");
        }
        if self.writing.is_some() {
            sections.push("writing");
        }
        sections
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SpeakingRequest {
    pub id: Uuid,
    pub status: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fee_amount: Option<Money>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WritingSubmission {
    pub id: Uuid,
    pub user_test_id: Uuid,
    pub student_fullname: String,
    pub test_title: String,
    pub task: String,
    pub status: String,
    #[serde(default)]
    pub score: Option<f64>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub checked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StudentDashboard {
    pub profile: StudentProfile,
    #[serde(default)]
    pub sections: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TeacherDashboard {
    pub profile: TeacherProfile,
    #[serde(default)]
    pub sections: serde_json::Map<String, serde_json::Value>,
}
