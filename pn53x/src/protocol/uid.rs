// pn53x-rs/pn53x/src/protocol/uid.rs

//! ISO14443 UID and ATS helpers.

use crate::constants::CASCADE_TAG;

/// Locate the historical bytes inside an ISO14443-4 ATS.
///
/// `ats` starts at the format byte T0 (the length byte TL is not included).
/// One byte is skipped for each of bit 0x10 of `ats[0]`, bit 0x20 of `ats[1]`
/// and bit 0x40 of `ats[2]` that is set; the latter two are only inspected
/// when the ATS is long enough. Returns `None` when nothing is left.
pub fn locate_historical_bytes(ats: &[u8]) -> Option<&[u8]> {
    let t0 = *ats.first()?;
    let mut offset = 1;
    if t0 & 0x10 != 0 {
        offset += 1;
    }
    if ats.len() > 1 && ats[1] & 0x20 != 0 {
        offset += 1;
    }
    if ats.len() > 2 && ats[2] & 0x40 != 0 {
        offset += 1;
    }
    ats.get(offset..).filter(|rest| !rest.is_empty())
}

/// Insert cascade tags into a double (7 byte) or triple (10 byte) size UID.
///
/// Single size UIDs and any other length are returned unchanged.
pub fn cascade_uid(uid: &[u8]) -> Vec<u8> {
    match uid.len() {
        7 => {
            let mut out = Vec::with_capacity(8);
            out.push(CASCADE_TAG);
            out.extend_from_slice(uid);
            out
        }
        10 => {
            let mut out = Vec::with_capacity(12);
            out.push(CASCADE_TAG);
            out.extend_from_slice(&uid[..3]);
            out.push(CASCADE_TAG);
            out.extend_from_slice(&uid[3..]);
            out
        }
        _ => uid.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historical_bytes_with_interface_bytes() {
        // TA announced by T0, TB by the TA byte itself
        let ats = [0x75, 0x77, 0x81, 0x02, 0x80];
        assert_eq!(locate_historical_bytes(&ats), Some(&[0x02, 0x80][..]));
    }

    #[test]
    fn interface_flags_read_from_successive_bytes() {
        let ats = [0x10, 0x00, 0x00, 0xaa];
        assert_eq!(locate_historical_bytes(&ats), Some(&[0x00, 0xaa][..]));
        let ats = [0x00, 0x20, 0x00, 0x01];
        assert_eq!(locate_historical_bytes(&ats), Some(&[0x00, 0x01][..]));
        let ats = [0x00, 0x00, 0x40, 0x01];
        assert_eq!(locate_historical_bytes(&ats), Some(&[0x40, 0x01][..]));
        // upper T0 bits alone skip nothing
        let ats = [0x70, 0x00, 0x00, 0x01];
        assert_eq!(locate_historical_bytes(&ats), Some(&[0x00, 0x00, 0x01][..]));
    }

    #[test]
    fn historical_bytes_without_interface_bytes() {
        let ats = [0x00, 0x01, 0x02];
        assert_eq!(locate_historical_bytes(&ats), Some(&[0x01, 0x02][..]));
    }

    #[test]
    fn historical_bytes_absent() {
        assert_eq!(locate_historical_bytes(&[]), None);
        assert_eq!(locate_historical_bytes(&[0x00]), None);
        assert_eq!(locate_historical_bytes(&[0x10, 0x00]), None);
        assert_eq!(locate_historical_bytes(&[0x10, 0x20, 0x40]), None);
    }

    #[test]
    fn cascade_double_size() {
        let uid = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(cascade_uid(&uid), vec![0x88, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn cascade_triple_size() {
        let uid = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        assert_eq!(
            cascade_uid(&uid),
            vec![0x88, 1, 2, 3, 0x88, 4, 5, 6, 7, 8, 9, 10]
        );
    }

    #[test]
    fn cascade_passthrough() {
        assert_eq!(cascade_uid(&[1, 2, 3, 4]), vec![1, 2, 3, 4]);
        assert_eq!(cascade_uid(&[]), Vec::<u8>::new());
        assert_eq!(cascade_uid(&[9; 5]), vec![9; 5]);
    }
}
