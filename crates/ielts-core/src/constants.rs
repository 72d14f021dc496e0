/// Keys of the durable client-side session record.
pub mod storage_keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER_ROLE: &str = "user_role";

    /// All keys, in the order they are written and cleared.
    pub const ALL: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_ROLE];
}

/// Backend endpoint paths, relative to the API base URL.
pub mod endpoints {
    pub const OTP_INGEST: &str = "/accounts/otp/ingest/";
    pub const LOGIN_VERIFY: &str = "/accounts/login/verify/";
    pub const REGISTER_START: &str = "/accounts/register/start/";
    pub const REGISTER_VERIFY: &str = "/accounts/register/verify/";
    pub const TOKEN_REFRESH: &str = "/accounts/token/refresh/";

    pub const STUDENT_DASHBOARD: &str = "/profiles/student/dashboard/";
    pub const TEACHER_DASHBOARD: &str = "/profiles/teacher/dashboard/";

    pub const ALL_TESTS: &str = "/user-tests/all-tests/";
    pub const MY_TESTS: &str = "/user-tests/my-tests/";
    pub const RESULTS: &str = "/user-tests/results/";

    pub const CHECKING_SUBMIT: &str = "/teacher-checking/submit/";
    pub const CHECKING_CLAIM: &str = "/teacher-checking/claim/";
    pub const CHECKING_GRADE: &str = "/teacher-checking/grade/";

    pub const SPEAKING_REQUEST: &str = "/speaking/request/";
    pub const SPEAKING_MINE: &str = "/speaking/request/me/";

    pub const PAYMENTS_TOPUP: &str = "/payments/topup/";

    pub fn purchase_test(test_id: uuid::Uuid) -> String {
        format!("/user-tests/purchase/{test_id}/")
    }

    pub fn test_detail(test_id: uuid::Uuid) -> String {
        format!("/tests/{test_id}/")
    }
}

pub mod limits {
    /// Top-up bounds in UZS, inclusive.
    pub const MIN_TOPUP_AMOUNT: u64 = 1_000;
    pub const MAX_TOPUP_AMOUNT: u64 = 5_000_000;

    /// IELTS band score bounds, inclusive.
    pub const MIN_BAND_SCORE: f64 = 0.0;
    pub const MAX_BAND_SCORE: f64 = 9.0;
}
