mod actions;
pub(crate) mod args;

pub(crate) use actions::{
    handle_dashboard, handle_my_tests, handle_results, handle_submit_writing, handle_test,
    handle_tests,
};
