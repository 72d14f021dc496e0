use ielts_core::{
    AuthTokens, GradeSubmissionRequest, LoginVerifyRequest, Payment, RegisterStartRequest,
    SpeakingRequest, SpeakingRequestCreate, StudentDashboard, SubmitWritingRequest,
    TeacherDashboard, TestDetail, TestListItem, TestResult, TopupRequest, UserTest,
    WritingSubmission,
};
use schemars::schema_for;

pub(crate) fn handle_types_command() -> anyhow::Result<()> {
    let mut schemas = serde_json::Map::new();
    macro_rules! add {
        ($($ty:ty),+ $(,)?) => {
            $(
                schemas.insert(
                    stringify!($ty).to_string(),
                    serde_json::to_value(schema_for!($ty))?,
                );
            )+
        };
    }
    add!(
        LoginVerifyRequest,
        RegisterStartRequest,
        AuthTokens,
        StudentDashboard,
        TeacherDashboard,
        TestListItem,
        UserTest,
        TestResult,
        TestDetail,
        SubmitWritingRequest,
        WritingSubmission,
        GradeSubmissionRequest,
        SpeakingRequestCreate,
        SpeakingRequest,
        TopupRequest,
        Payment,
    );
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
