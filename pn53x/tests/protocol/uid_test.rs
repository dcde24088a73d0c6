use pn53x::constants::CASCADE_TAG;
use pn53x::protocol::{cascade_uid, locate_historical_bytes};

#[test]
fn cascade_tags_by_uid_size() {
    let single = [0xde, 0xad, 0xbe, 0xef];
    assert_eq!(cascade_uid(&single), single.to_vec());

    let double = [0x04, 0x5a, 0x2b, 0x6c, 0x11, 0x22, 0x80];
    let cascaded = cascade_uid(&double);
    assert_eq!(cascaded.len(), 8);
    assert_eq!(cascaded[0], CASCADE_TAG);
    assert_eq!(&cascaded[1..], &double);

    let triple: Vec<u8> = (1..=10).collect();
    assert_eq!(
        cascade_uid(&triple),
        vec![0x88, 1, 2, 3, 0x88, 4, 5, 6, 7, 8, 9, 10]
    );
}

#[test]
fn odd_uid_lengths_pass_through() {
    assert!(cascade_uid(&[]).is_empty());
    assert_eq!(cascade_uid(&[1, 2, 3, 4, 5]), vec![1, 2, 3, 4, 5]);
}

#[test]
fn historical_bytes_follow_interface_bytes() {
    // bit 0x10 of byte 0 and bit 0x20 of byte 1 set, byte 2 has no 0x40
    let ats = [0x78, 0x77, 0x81, 0x02, 0x80, 0x31, 0xc0];
    assert_eq!(
        locate_historical_bytes(&ats),
        Some(&[0x02, 0x80, 0x31, 0xc0][..])
    );

    // only bit 0x40 of byte 2
    let ats = [0x20, 0x81, 0x4a, 0x43];
    assert_eq!(locate_historical_bytes(&ats), Some(&[0x4a, 0x43][..]));
}

#[test]
fn single_format_byte_flag() {
    let ats = [0x10, 0x00, 0x00, 0xaa];
    assert_eq!(locate_historical_bytes(&ats), Some(&[0x00, 0xaa][..]));
}

#[test]
fn no_historical_bytes() {
    assert_eq!(locate_historical_bytes(&[]), None);
    assert_eq!(locate_historical_bytes(&[0x10, 0x00]), None);
    assert_eq!(locate_historical_bytes(&[0x10, 0x20, 0x40]), None);
    assert_eq!(locate_historical_bytes(&[0x00]), None);
}
