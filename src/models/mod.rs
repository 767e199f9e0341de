//! Wire types shared by the HTTP layer and the domain modules.

pub mod enums;
pub mod face;
pub mod report;
pub mod saju;

pub use enums::*;
pub use face::*;
pub use report::*;
pub use saju::*;
