//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common mock driver setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::device::{Context, Device};
use crate::driver::{MockDevice, MockDriver};
use crate::target::{
    BarcodeTarget, DepTarget, FelicaTarget, Iso14443aTarget, Iso14443b2ctTarget,
    Iso14443b2srTarget, Iso14443bTarget, Iso14443biClassTarget, Iso14443biTarget, JewelTarget,
    Target,
};
use crate::types::{BaudRate, DepMode};

/// Open a single mock reader and return the device together with the
/// mock's shared state for scripting and inspection.
#[doc(hidden)]
pub fn open_mock_device() -> (Device, MockDevice) {
    let mock = MockDevice::new("mock reader", "mock:0");
    (Device::from_handle(mock.open()), mock)
}

/// Build a context over the given mock readers.
#[doc(hidden)]
pub fn mock_context(devices: &[MockDevice]) -> Context {
    let mut driver = MockDriver::new();
    for dev in devices {
        driver.add_device(dev.clone());
    }
    Context::with_driver(driver)
}

/// A DESFire-like ISO14443-4 target with a 7 byte UID and historical bytes.
#[doc(hidden)]
pub fn desfire() -> Iso14443aTarget {
    Iso14443aTarget {
        atqa: [0x03, 0x44],
        sak: 0x20,
        uid: vec![0x04, 0x5a, 0x2b, 0x6c, 0x11, 0x22, 0x80],
        ats: vec![0x75, 0x77, 0x81, 0x02, 0x80],
        baud_rate: BaudRate::Br106,
    }
}

/// One representative target of every modulation family.
#[doc(hidden)]
pub fn sample_targets() -> Vec<Target> {
    vec![
        Target::Iso14443a(desfire()),
        Target::Jewel(JewelTarget {
            sens_res: [0x0c, 0x00],
            id: [0x11, 0x22, 0x33, 0x44],
            baud_rate: BaudRate::Br106,
        }),
        Target::Iso14443b(Iso14443bTarget {
            pupi: [0x01, 0x02, 0x03, 0x04],
            application_data: [0x00, 0x00, 0x00, 0x00],
            protocol_info: [0x81, 0x81, 0x21],
            card_identifier: 0,
            baud_rate: BaudRate::Br106,
        }),
        Target::Iso14443bi(Iso14443biTarget {
            div: [0x0a, 0x0b, 0x0c, 0x0d],
            ver_log: 0x01,
            config: 0x02,
            atr: vec![0x3b, 0x8f, 0x80],
            baud_rate: BaudRate::Br106,
        }),
        Target::Iso14443b2sr(Iso14443b2srTarget {
            uid: [0xd0, 0x02, 0x1a, 0x00, 0x11, 0x22, 0x33, 0x44],
            baud_rate: BaudRate::Br106,
        }),
        Target::Iso14443b2ct(Iso14443b2ctTarget {
            uid: [0x55, 0x66, 0x77, 0x88],
            prod_code: 0x12,
            fab_code: 0x34,
            baud_rate: BaudRate::Br106,
        }),
        Target::Felica(FelicaTarget {
            len: 18,
            res_code: 0x01,
            id: [0x01, 0x2e, 0x4c, 0x7a, 0x12, 0x34, 0x56, 0x78],
            pad: [0x03, 0x01, 0x4b, 0x02, 0x4f, 0x49, 0x93, 0xff],
            sys_code: [0x88, 0xb4],
            baud_rate: BaudRate::Br212,
        }),
        Target::Dep(DepTarget {
            nfcid3: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            did: 0,
            bs: 0,
            br: 0,
            to: 0x0e,
            pp: 0x32,
            general_bytes: vec![0x46, 0x66, 0x6d, 0x01, 0x01, 0x10],
            dep_mode: DepMode::Passive,
            baud_rate: BaudRate::Br424,
        }),
        Target::Barcode(BarcodeTarget {
            data: vec![0xb0, 0x01, 0x02, 0x03],
            baud_rate: BaudRate::Br106,
        }),
        Target::Iso14443biClass(Iso14443biClassTarget {
            uid: [0x7a, 0x12, 0xf4, 0x00, 0xf7, 0xff, 0x12, 0xe0],
            baud_rate: BaudRate::Br106,
        }),
    ]
}
