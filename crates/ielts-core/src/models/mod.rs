mod enums;
mod money;
mod structs;

pub use enums::*;
pub use money::Money;
pub use structs::*;
