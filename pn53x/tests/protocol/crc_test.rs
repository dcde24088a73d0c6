use crate::common;

use pn53x::protocol::{
    append_iso14443a_crc, append_iso14443b_crc, check_iso14443a_crc, iso14443a_crc,
    iso14443b_crc, odd_parity_bits,
};
use proptest::prelude::*;

#[test]
fn known_crc_a_frames() {
    assert_eq!(iso14443a_crc(&common::fixtures::hlta()), [0x57, 0xcd]);
    assert_eq!(iso14443a_crc(&common::fixtures::read_block0()), [0x02, 0xa8]);
    assert_eq!(iso14443a_crc(&[0xe0, 0x80]), [0x31, 0x73]);
    assert_eq!(
        append_iso14443a_crc(&[0xe0, 0x50]),
        vec![0xe0, 0x50, 0xbc, 0xa5]
    );
}

#[test]
fn known_crc_b_frames() {
    assert_eq!(iso14443b_crc(&[]), [0xff, 0xff]);
    assert_eq!(iso14443b_crc(&[0x00]), [0x87, 0x0f]);
    // REQB, AFI 0, one slot
    assert_eq!(
        append_iso14443b_crc(&[0x05, 0x00, 0x08]),
        vec![0x05, 0x00, 0x08, 0xc6, 0x8c]
    );
}

#[test]
fn select_all_parity() {
    assert_eq!(odd_parity_bits(&[0x93, 0x20]), vec![0x01, 0x00]);
}

#[test]
fn check_rejects_short_and_corrupt_frames() {
    assert!(!check_iso14443a_crc(&[]));
    assert!(!check_iso14443a_crc(&[0x57]));
    assert!(check_iso14443a_crc(&[0x50, 0x00, 0x57, 0xcd]));
    assert!(!check_iso14443a_crc(&[0x50, 0x01, 0x57, 0xcd]));
}

proptest! {
    #[test]
    fn crc_a_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(iso14443a_crc(&data), iso14443a_crc(&data.clone()));
    }

    #[test]
    fn appended_crc_checks(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let framed = append_iso14443a_crc(&data);
        prop_assert!(check_iso14443a_crc(&framed));
        // Running the register over its own output leaves it empty.
        prop_assert_eq!(iso14443a_crc(&framed), [0x00, 0x00]);
        prop_assert_eq!(iso14443b_crc(&append_iso14443b_crc(&data)), [0x00, 0x00]);
    }

    #[test]
    fn single_bit_flip_is_detected(
        data in proptest::collection::vec(any::<u8>(), 1..64),
        pick in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut corrupt = data.clone();
        let i = pick.index(corrupt.len());
        corrupt[i] ^= 1 << bit;
        prop_assert_ne!(iso14443a_crc(&data), iso14443a_crc(&corrupt));
        prop_assert_ne!(iso14443b_crc(&data), iso14443b_crc(&corrupt));
    }
}
