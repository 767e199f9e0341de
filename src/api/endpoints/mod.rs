//! API endpoint handlers.
//!
//! Each module corresponds to one route group. Handlers only adapt
//! HTTP to the domain modules (`saju`, `face`, `report`).

pub mod face;
pub mod health;
pub mod report;
pub mod saju;
