use crate::common;

use std::thread;
use std::time::Duration;

use pn53x::prelude::*;

#[test]
fn abort_unblocks_target_init() {
    common::helpers::init_logging();
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.set_block_when_empty(true);
    let abort = dev.abort_handle();

    let aborter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        abort.abort()
    });

    let res = dev.target_init(&common::fixtures::ultralight(), 64, Timeout::Infinite);
    assert_eq!(res, Err(Error::Aborted));
    assert_eq!(aborter.join().unwrap(), Ok(()));
    assert_eq!(dev.last_error(), Ok(ErrorCode::Aborted));
}

#[test]
fn abort_unblocks_receive() {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.set_block_when_empty(true);
    let abort = dev.abort_handle();

    let aborter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        abort.abort()
    });
    assert_eq!(
        dev.target_receive_bytes(64, Timeout::Infinite),
        Err(Error::Aborted)
    );
    aborter.join().unwrap().unwrap();

    // the device stays usable afterwards
    mock.push_bytes(vec![0x01]);
    assert_eq!(dev.target_receive_bytes(64, Timeout::Infinite), Ok(vec![0x01]));
}

#[test]
fn blocked_call_times_out_without_abort() {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.set_block_when_empty(true);
    assert_eq!(
        dev.transceive_bytes(&[0x30, 0x00], 16, Timeout::Millis(30)),
        Err(Error::Timeout)
    );
}

#[test]
fn abort_after_close_fails() {
    let (mut dev, _mock) = common::helpers::open_mock_device();
    dev.close();
    assert_eq!(dev.abort_command(), Err(Error::DeviceClosed));
}
