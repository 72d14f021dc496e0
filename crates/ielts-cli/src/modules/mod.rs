pub(crate) mod auth;
pub(crate) mod checking;
pub(crate) mod learning;
pub(crate) mod payments;
pub(crate) mod shared;
pub(crate) mod speaking;
pub(crate) mod system;
