// pn53x-rs/pn53x/src/constants.rs
//! Common protocol constants used across the crate

/// CRC_A preset value (ISO/IEC 14443-3, Annex B)
pub const CRC_A_PRESET: u16 = 0x6363;

/// CRC_B preset value
pub const CRC_B_PRESET: u16 = 0xffff;

/// Cascade tag inserted before partial UIDs during anti-collision
pub const CASCADE_TAG: u8 = 0x88;

/// Connection string buffer size, terminating NUL included
pub const BUFSIZE_CONNSTRING: usize = 1024;

/// Longest accepted connection string
pub const MAX_CONNSTRING_LEN: usize = BUFSIZE_CONNSTRING - 1;

/// Longest UID (triple size)
pub const MAX_UID_LEN: usize = 10;
/// Longest ATS kept in an ISO14443A record
pub const MAX_ATS_LEN: usize = 254;
/// Longest ATTRIB answer kept for pre-ISO14443B
pub const MAX_ATR_LEN: usize = 33;
/// Longest NFC-DEP general bytes
pub const MAX_GB_LEN: usize = 48;
/// Longest NFC Barcode payload
pub const MAX_BARCODE_LEN: usize = 32;

/// Growth step for device and target listings
pub const LIST_CHUNK: usize = 16;
