pub mod accounts;
pub mod checking;
pub mod payments;
pub mod speaking;

pub use accounts::*;
pub use checking::*;
pub use payments::*;
pub use speaking::*;
