//! Hex rendering for log lines and target descriptions.

use std::fmt::Write;

/// Compact lowercase hex, e.g. `&[0xde, 0xad]` -> `"dead"`.
pub fn hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Column layout used in target descriptions: every byte followed by two
/// spaces, e.g. `&[0x00, 0x04]` -> `"00  04  "`.
pub fn hex_columns(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 4);
    for b in bytes {
        let _ = write!(&mut s, "{:02x}  ", b);
    }
    s
}
