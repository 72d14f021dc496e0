//! Typed wrappers over the backend endpoints, grouped by backend app.
//!
//! Reads that back a view take a [`crate::CancelToken`] so the view can
//! abandon them when it goes away; mutations run to completion.

mod accounts;
mod checking;
mod payments;
mod profiles;
mod speaking;
mod test_detail;

pub use checking::{validate_score, SubmissionQueues};
pub use payments::validate_topup_amount;
