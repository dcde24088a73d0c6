// pn53x-rs/pn53x/src/protocol/crc.rs

//! ISO14443 CRC_A and CRC_B.

use crate::constants::{CRC_A_PRESET, CRC_B_PRESET};

fn crc16(preset: u16, data: &[u8]) -> [u8; 2] {
    let crc = data.iter().fold(preset, |crc, &byte| {
        let mut bt = byte ^ (crc & 0x00ff) as u8;
        bt ^= bt << 4;
        let bt = u16::from(bt);
        (crc >> 8) ^ (bt << 8) ^ (bt << 3) ^ (bt >> 4)
    });
    crc.to_le_bytes()
}

/// CRC_A over `data`, least significant byte first.
pub fn iso14443a_crc(data: &[u8]) -> [u8; 2] {
    crc16(CRC_A_PRESET, data)
}

/// CRC_B over `data`, least significant byte first.
///
/// Same recurrence as CRC_A with a 0xFFFF preset; the result is not
/// complemented.
pub fn iso14443b_crc(data: &[u8]) -> [u8; 2] {
    crc16(CRC_B_PRESET, data)
}

/// Copy of `data` with its CRC_A appended.
pub fn append_iso14443a_crc(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 2);
    out.extend_from_slice(data);
    out.extend_from_slice(&iso14443a_crc(data));
    out
}

/// Copy of `data` with its CRC_B appended.
pub fn append_iso14443b_crc(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 2);
    out.extend_from_slice(data);
    out.extend_from_slice(&iso14443b_crc(data));
    out
}

/// True if the last two bytes of `frame` are the CRC_A of the rest.
pub fn check_iso14443a_crc(frame: &[u8]) -> bool {
    match frame.len().checked_sub(2) {
        Some(split) => iso14443a_crc(&frame[..split]) == frame[split..],
        None => false,
    }
}
