// pn53x-rs/pn53x/src/protocol/parity.rs

//! Odd parity as used on the ISO14443A air interface.

/// Odd parity bit for `byte`: 1 when the byte has an even number of set bits.
pub fn odd_parity(byte: u8) -> u8 {
    ((byte.count_ones() + 1) & 1) as u8
}

/// One odd parity bit per byte, in the layout bit-oriented transceive expects.
pub fn odd_parity_bits(data: &[u8]) -> Vec<u8> {
    data.iter().map(|&b| odd_parity(b)).collect()
}
