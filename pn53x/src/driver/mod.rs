// pn53x-rs/pn53x/src/driver/mod.rs

//! The driver boundary: the traits a reader backend implements, an in-memory
//! mock and, with the `libnfc` feature, the libnfc binding.

pub mod mock;
pub mod traits;

#[cfg(feature = "libnfc")]
pub mod libnfc;

pub use mock::{MockDevice, MockDriver, MockReply};
pub use traits::{AbortSignal, Driver, DriverHandle, DriverResult};
