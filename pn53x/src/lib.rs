// pn53x-rs/pn53x/src/lib.rs

//! pn53x
//!
//! Host-side access to PN53x NFC readers: CRC and UID helpers, typed target
//! descriptors with their driver wire record, and a session layer for
//! opening readers, selecting targets and exchanging frames.
#![warn(missing_docs)]

pub mod constants;
pub mod device;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod target;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the enums in `types` are available to consumers.
pub use crate::error::*;
pub use crate::types::*;

pub use device::{list_devices, open, version};
pub use prelude::*;
