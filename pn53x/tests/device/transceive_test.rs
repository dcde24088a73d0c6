use crate::common;

use pn53x::driver::MockReply;
use pn53x::prelude::*;

#[test]
fn read_ultralight_pages() -> anyhow::Result<()> {
    common::helpers::init_logging();
    let (mut dev, mock) = common::helpers::open_mock_device();
    let pages = common::fixtures::ultralight_pages();
    mock.push_bytes(pages.clone());

    let rx = dev.transceive_bytes(&common::fixtures::read_block0(), 16, Timeout::Millis(100))?;
    assert_eq!(rx, pages);
    assert_eq!(mock.sent(), vec![vec![0x30, 0x00]]);
    Ok(())
}

#[test]
fn overflow_keeps_the_prefix() {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.push_bytes(common::fixtures::ultralight_pages());

    let err = dev
        .transceive_bytes(&[0x30, 0x04], 4, Timeout::Default)
        .unwrap_err();
    assert_eq!(
        err,
        Error::Overflow {
            partial: vec![0x04, 0xa2, 0xb3, 0xc4]
        }
    );
}

#[test]
fn short_response_is_trimmed() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.push_bytes(vec![0x0a]);
    assert_eq!(dev.transceive_bytes(&[0xa2, 0x04, 1, 2, 3, 4], 64, Timeout::Default)?, vec![0x0a]);
    Ok(())
}

#[test]
fn preconditions_are_checked_before_the_driver() {
    let (mut dev, mock) = common::helpers::open_mock_device();
    let before = mock.calls().len();

    let invalid = |r: Result<_>| matches!(r, Err(Error::InvalidArgument(_)));
    assert!(invalid(dev.transceive_bytes(&[], 16, Timeout::Default).map(|_| ())));
    assert!(invalid(dev.transceive_bytes(&[0x30], 0, Timeout::Default).map(|_| ())));
    assert!(invalid(dev.transceive_bits(&[0x26], &[0x00], 0, 16).map(|_| ())));
    assert!(invalid(dev.transceive_bits(&[0x26], &[0x00], 9, 16).map(|_| ())));
    assert!(invalid(dev.transceive_bits(&[0x26, 0x00], &[0x00], 9, 16).map(|_| ())));
    assert!(invalid(dev.transceive_bits(&[0x26], &[0x00], 7, 0).map(|_| ())));
    assert!(invalid(dev.target_send_bytes(&[], Timeout::Default).map(|_| ())));
    assert!(invalid(dev.target_receive_bytes(0, Timeout::Default).map(|_| ())));

    assert_eq!(mock.calls().len(), before);
}

#[test]
fn anticollision_with_bit_frames() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.push_reply(MockReply::Bits {
        data: vec![0x44, 0x00],
        parity: vec![0x01, 0x01],
        bits: 16,
    });

    let (tx, parity, bits) = common::fixtures::reqa();
    let atqa = dev.transceive_bits(&tx, &parity, bits, 32)?;
    assert_eq!(atqa.bits, 16);
    assert_eq!(atqa.data, vec![0x44, 0x00]);
    assert_eq!(atqa.parity, vec![0x01, 0x01]);

    // SELECT ALL for cascade level 1, parity computed locally
    let select_all = [0x93, 0x20];
    mock.push_bytes(vec![0x88, 0x04, 0xa2, 0xb3, 0x9d]);
    let uid = dev.transceive_bits(&select_all, &pn53x::protocol::odd_parity_bits(&select_all), 16, 40)?;
    assert_eq!(uid.bits, 40);
    assert_eq!(uid.data.len(), 5);
    assert_eq!(mock.state().sent_parity[1], vec![0x01, 0x00]);
    Ok(())
}

#[test]
fn timed_exchange_reports_cycles() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.state().cycles = Some(4096);
    mock.push_bytes(vec![0x00]);
    let (rx, cycles) = dev.transceive_bytes_timed(&append_iso14443a_crc(&[0x50, 0x00]), 8, 0)?;
    assert_eq!(rx, vec![0x00]);
    assert_eq!(cycles, 4096);
    Ok(())
}

#[test]
fn emulate_and_answer() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    // RATS arrives as the first frame
    mock.push_bytes(append_iso14443a_crc(&[0xe0, 0x50]));
    mock.push_bytes(vec![0x02, 0x00, 0xa4, 0x04, 0x00]);

    let emulated = common::fixtures::ultralight();
    let (target, first) = dev.target_init(&emulated, 264, Timeout::Millis(500))?;
    assert_eq!(target, emulated);
    assert_eq!(first, vec![0xe0, 0x50, 0xbc, 0xa5]);

    assert_eq!(dev.target_send_bytes(&[0x05, 0x78, 0x80, 0x70, 0x02], Timeout::Default)?, 5);
    let apdu = dev.target_receive_bytes(264, Timeout::Default)?;
    assert_eq!(apdu[0], 0x02);
    Ok(())
}

#[test]
fn rf_errors_surface() {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.push_error(ErrorCode::RfTransmission);
    assert_eq!(
        dev.transceive_bytes(&[0x30, 0x00], 16, Timeout::Default),
        Err(Error::RfTransmission)
    );
    // nothing queued: the mock times out
    assert_eq!(
        dev.transceive_bytes(&[0x30, 0x00], 16, Timeout::Default),
        Err(Error::Timeout)
    );
}
