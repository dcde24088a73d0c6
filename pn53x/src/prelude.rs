// pn53x-rs/pn53x/src/prelude.rs

//! Commonly used types, re-exported for glob import.

pub use crate::device::{AbortHandle, BitFrame, Context, Device};
pub use crate::target::{
    BarcodeTarget, DepTarget, FelicaTarget, Iso14443aTarget, Iso14443b2ctTarget,
    Iso14443b2srTarget, Iso14443bTarget, Iso14443biClassTarget, Iso14443biTarget, JewelTarget,
    Target,
};
pub use crate::{
    BaudRate, DepMode, Error, ErrorCode, Mode, Modulation, ModulationKind, Property, Result,
};

// Frame helpers used alongside transceive calls
pub use crate::protocol::{append_iso14443a_crc, append_iso14443b_crc, iso14443a_crc};
pub use crate::utils::{Timeout, hex};
