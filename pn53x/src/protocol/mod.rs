// pn53x-rs/pn53x/src/protocol/mod.rs

//! Byte-level helpers: CRCs, parity, UID handling and the driver target record.

pub mod crc;
pub mod parity;
pub mod parser;
pub mod uid;
pub mod wire;

pub use crc::{
    append_iso14443a_crc, append_iso14443b_crc, check_iso14443a_crc, iso14443a_crc,
    iso14443b_crc,
};
pub use parity::{odd_parity, odd_parity_bits};
pub use uid::{cascade_uid, locate_historical_bytes};
pub use wire::{WIRE_TARGET_LEN, WireTarget};
