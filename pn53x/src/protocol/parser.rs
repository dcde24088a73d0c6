// pn53x-rs/pn53x/src/protocol/parser.rs

//! Sequential readers and writers over a packed wire slot.
//!
//! Fields are laid out back to back with no padding, multi-byte integers in
//! native byte order. Callers size their layouts against the slot length;
//! running past the end is a layout bug and panics like any slice index.

use std::mem::size_of;

use crate::{Error, Result};

/// Reject a variable length field longer than its fixed slot.
pub fn ensure_fits(field: &str, len: usize, capacity: usize) -> Result<()> {
    if len > capacity {
        return Err(Error::InvalidArgument(format!(
            "{} is {} bytes, at most {} allowed",
            field, len, capacity
        )));
    }
    Ok(())
}

/// Copy the valid prefix of a fixed-capacity field, clamping the declared
/// length to the slot size.
pub fn clamped(slot: &[u8], declared: usize) -> Vec<u8> {
    slot[..declared.min(slot.len())].to_vec()
}

/// Cursor reading fields from a packed slot.
#[derive(Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the slot.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Next `len` raw bytes.
    pub fn bytes(&mut self, len: usize) -> &'a [u8] {
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        out
    }

    /// A single byte field.
    pub fn u8(&mut self) -> u8 {
        self.bytes(1)[0]
    }

    /// A fixed-size byte array field.
    pub fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N));
        out
    }

    /// A `size_t` field.
    pub fn usize(&mut self) -> usize {
        usize::from_ne_bytes(self.array::<{ size_of::<usize>() }>())
    }

    /// An `int` (or C enum) field.
    pub fn i32(&mut self) -> i32 {
        i32::from_ne_bytes(self.array::<4>())
    }
}

/// Cursor writing fields into a packed slot.
#[derive(Debug)]
pub struct WireWriter<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> WireWriter<'a> {
    /// Writer positioned at the start of `data`.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the slot.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Raw bytes at the cursor.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.data[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// A single byte field.
    pub fn put_u8(&mut self, v: u8) {
        self.put_bytes(&[v]);
    }

    /// Write `bytes` into a slot of `capacity` bytes, zero filling the rest.
    pub fn put_padded(&mut self, bytes: &[u8], capacity: usize) {
        debug_assert!(bytes.len() <= capacity);
        let end = self.pos + capacity;
        self.data[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.data[self.pos + bytes.len()..end].fill(0);
        self.pos = end;
    }

    /// A `size_t` field.
    pub fn put_usize(&mut self, v: usize) {
        self.put_bytes(&v.to_ne_bytes());
    }

    /// An `int` (or C enum) field.
    pub fn put_i32(&mut self, v: i32) {
        self.put_bytes(&v.to_ne_bytes());
    }
}
