// fixtures.rs: commonly used frames and target records

use pn53x::prelude::*;

/// HLTA without CRC.
pub fn hlta() -> Vec<u8> {
    ::hex::decode("5000").unwrap()
}

/// READ block 0 without CRC.
pub fn read_block0() -> Vec<u8> {
    ::hex::decode("3000").unwrap()
}

/// One 16 byte MIFARE Ultralight page group.
pub fn ultralight_pages() -> Vec<u8> {
    ::hex::decode("04a2b3c4d5e6f78899480000e1100600").unwrap()
}

/// REQA: 7 bits, parity is ignored by the card.
pub fn reqa() -> (Vec<u8>, Vec<u8>, usize) {
    (vec![0x26], vec![0x00], 7)
}

pub fn ultralight() -> Target {
    Target::Iso14443a(Iso14443aTarget {
        atqa: [0x00, 0x44],
        sak: 0x00,
        uid: ::hex::decode("04a2b3c4d5e6f7").unwrap(),
        ats: Vec::new(),
        baud_rate: BaudRate::Br106,
    })
}

/// Type A target with a full 10 byte UID and a 254 byte ATS.
pub fn largest_iso14443a() -> Target {
    Target::Iso14443a(Iso14443aTarget {
        atqa: [0x03, 0x44],
        sak: 0x20,
        uid: (1..=10).collect(),
        ats: (0..254).map(|i| i as u8).collect(),
        baud_rate: BaudRate::Br847,
    })
}

pub fn felica_lite() -> Target {
    Target::Felica(FelicaTarget {
        len: 18,
        res_code: 0x01,
        id: [0x01, 0x2e, 0x4c, 0x7a, 0x12, 0x34, 0x56, 0x78],
        pad: [0x00, 0xf1, 0x00, 0x00, 0x00, 0x01, 0x43, 0x00],
        sys_code: [0x88, 0xb4],
        baud_rate: BaudRate::Br212,
    })
}
