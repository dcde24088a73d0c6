// pn53x-rs/pn53x/src/protocol/wire.rs

//! Byte image of the driver's packed `nfc_target` record.
//!
//! The record is the target-info union followed by the modulation
//! (`nmt`, `nbr`, both C `int`). The union is as large as its biggest member,
//! the ISO14443A info. Nothing in the record is padded.

use std::fmt;
use std::mem::size_of;

use crate::types::{BaudRate, Modulation, ModulationKind};
use crate::{Error, Result};

const SIZE_T: usize = size_of::<usize>();

/// Size of the target-info union.
pub const TARGET_INFO_LEN: usize = 2 + 1 + SIZE_T + 10 + SIZE_T + 254;

/// Size of a complete wire record.
pub const WIRE_TARGET_LEN: usize = TARGET_INFO_LEN + 4 + 4;

const KIND_OFFSET: usize = TARGET_INFO_LEN;
const BAUD_OFFSET: usize = TARGET_INFO_LEN + 4;

/// Fixed-size wire record, layout compatible with `nfc_target`.
#[repr(C)]
#[derive(Clone, PartialEq, Eq)]
pub struct WireTarget {
    bytes: [u8; WIRE_TARGET_LEN],
}

impl WireTarget {
    /// All-zero record.
    pub fn zeroed() -> Self {
        Self {
            bytes: [0u8; WIRE_TARGET_LEN],
        }
    }

    /// Record with the modulation already filled in.
    pub fn for_modulation(modulation: Modulation) -> Self {
        let mut w = Self::zeroed();
        w.set_modulation(modulation);
        w
    }

    /// Rebuild a record from its raw image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != WIRE_TARGET_LEN {
            return Err(Error::InvalidArgument(format!(
                "wire record must be {} bytes, got {}",
                WIRE_TARGET_LEN,
                bytes.len()
            )));
        }
        let mut w = Self::zeroed();
        w.bytes.copy_from_slice(bytes);
        Ok(w)
    }

    /// The whole record.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw `nmt` value.
    pub fn kind_raw(&self) -> i32 {
        self.int_at(KIND_OFFSET)
    }

    /// Raw `nbr` value.
    pub fn baud_raw(&self) -> i32 {
        self.int_at(BAUD_OFFSET)
    }

    /// Overwrite the raw `nmt` value.
    pub fn set_kind_raw(&mut self, raw: i32) {
        self.bytes[KIND_OFFSET..KIND_OFFSET + 4].copy_from_slice(&raw.to_ne_bytes());
    }

    /// Overwrite the raw `nbr` value.
    pub fn set_baud_raw(&mut self, raw: i32) {
        self.bytes[BAUD_OFFSET..BAUD_OFFSET + 4].copy_from_slice(&raw.to_ne_bytes());
    }

    /// Store both discriminants of `modulation`.
    pub fn set_modulation(&mut self, modulation: Modulation) {
        self.set_kind_raw(modulation.kind.as_raw());
        self.set_baud_raw(modulation.baud_rate.as_raw());
    }

    /// Decoded modulation, `None` if either discriminant is out of range.
    pub fn modulation(&self) -> Option<Modulation> {
        let kind = ModulationKind::from_raw(self.kind_raw())?;
        let baud_rate = BaudRate::from_raw(self.baud_raw())?;
        Some(Modulation { kind, baud_rate })
    }

    /// The target-info union.
    pub fn info(&self) -> &[u8] {
        &self.bytes[..TARGET_INFO_LEN]
    }

    /// Mutable view of the target-info union.
    pub fn info_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..TARGET_INFO_LEN]
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr()
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    fn int_at(&self, offset: usize) -> i32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.bytes[offset..offset + 4]);
        i32::from_ne_bytes(raw)
    }
}

impl Default for WireTarget {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for WireTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireTarget")
            .field("nmt", &self.kind_raw())
            .field("nbr", &self.baud_raw())
            .field("info", &crate::utils::hex(self.info()))
            .finish()
    }
}
