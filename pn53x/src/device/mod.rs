// pn53x-rs/pn53x/src/device/mod.rs

//! Session layer: driver context, opened readers and frame exchange.

pub mod abort;
pub mod context;
pub mod handle;
pub mod transceive;

pub use abort::AbortHandle;
pub use context::{Context, DriverFactory, global, list_devices, open, version};
pub use handle::Device;
pub use transceive::BitFrame;
