use crate::common;

use pn53x::prelude::*;
use pn53x::protocol::wire::TARGET_INFO_LEN;
use pn53x::protocol::{WIRE_TARGET_LEN, WireTarget};
use proptest::prelude::*;

#[test]
fn record_size_matches_packed_layout() {
    let s = std::mem::size_of::<usize>();
    assert_eq!(TARGET_INFO_LEN, 267 + 2 * s);
    assert_eq!(WIRE_TARGET_LEN, TARGET_INFO_LEN + 8);
    assert_eq!(std::mem::size_of::<WireTarget>(), WIRE_TARGET_LEN);
}

#[test]
fn every_family_survives_the_wire() {
    for target in common::helpers::sample_targets() {
        let wire = target.encode().unwrap();
        assert_eq!(wire.modulation(), Some(target.modulation()));
        assert_eq!(Target::decode(&wire), target, "{}", target.kind());
    }
}

#[test]
fn largest_fields_survive_the_wire() {
    let a = common::fixtures::largest_iso14443a();
    assert_eq!(Target::decode(&a.encode().unwrap()), a);

    let dep = Target::Dep(DepTarget {
        nfcid3: [0xaa; 10],
        general_bytes: vec![0x5a; 48],
        dep_mode: DepMode::Active,
        baud_rate: BaudRate::Br424,
        ..Default::default()
    });
    assert_eq!(Target::decode(&dep.encode().unwrap()), dep);

    let bi = Target::Iso14443bi(Iso14443biTarget {
        atr: vec![0x3b; 33],
        baud_rate: BaudRate::Br106,
        ..Default::default()
    });
    assert_eq!(Target::decode(&bi.encode().unwrap()), bi);

    let barcode = Target::Barcode(BarcodeTarget {
        data: (0..32).collect(),
        baud_rate: BaudRate::Br106,
    });
    assert_eq!(Target::decode(&barcode.encode().unwrap()), barcode);
}

#[test]
fn oversized_fields_are_rejected() {
    let uid = Target::Iso14443a(Iso14443aTarget {
        uid: vec![0; 11],
        ..Default::default()
    });
    assert!(matches!(uid.encode(), Err(Error::InvalidArgument(_))));

    let gb = Target::Dep(DepTarget {
        general_bytes: vec![0; 49],
        ..Default::default()
    });
    assert!(matches!(gb.encode(), Err(Error::InvalidArgument(_))));
}

#[test]
fn type_a_layout_offsets() {
    let wire = common::fixtures::ultralight().encode().unwrap();
    let s = std::mem::size_of::<usize>();
    let info = wire.info();
    assert_eq!(&info[..3], &[0x00, 0x44, 0x00]);
    assert_eq!(usize::from_ne_bytes(info[3..3 + s].try_into().unwrap()), 7);
    assert_eq!(
        &info[3 + s..3 + s + 7],
        &[0x04, 0xa2, 0xb3, 0xc4, 0xd5, 0xe6, 0xf7]
    );
    assert_eq!(wire.kind_raw(), 1);
    assert_eq!(wire.baud_raw(), 1);
}

#[test]
fn raw_image_round_trip() {
    let wire = common::fixtures::felica_lite().encode().unwrap();
    let copy = WireTarget::from_bytes(wire.as_bytes()).unwrap();
    assert_eq!(copy, wire);
    assert!(WireTarget::from_bytes(&wire.as_bytes()[1..]).is_err());
}

#[test]
#[should_panic(expected = "cannot determine target type")]
fn unknown_kind_panics() {
    let mut wire = WireTarget::zeroed();
    wire.set_kind_raw(42);
    wire.set_baud_raw(1);
    let _ = Target::decode(&wire);
}

fn arb_iso14443a() -> impl Strategy<Value = Target> {
    (
        any::<[u8; 2]>(),
        any::<u8>(),
        proptest::collection::vec(any::<u8>(), 0..=10),
        proptest::collection::vec(any::<u8>(), 0..=254),
        1i32..=4,
    )
        .prop_map(|(atqa, sak, uid, ats, br)| {
            Target::Iso14443a(Iso14443aTarget {
                atqa,
                sak,
                uid,
                ats,
                baud_rate: BaudRate::from_raw(br).unwrap(),
            })
        })
}

proptest! {
    #[test]
    fn decode_inverts_encode(target in arb_iso14443a()) {
        let wire = target.encode().unwrap();
        prop_assert_eq!(Target::decode(&wire), target);
    }
}
