//! Small helpers shared across the crate: hex rendering and driver timeouts.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
