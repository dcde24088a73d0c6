use crate::common;

use pn53x::constants::MAX_CONNSTRING_LEN;
use pn53x::driver::{MockDevice, MockDriver};
use pn53x::prelude::*;
use serial_test::serial;

#[test]
fn lazy_context_opens_readers() -> anyhow::Result<()> {
    let reader = MockDevice::new("mock reader", "mock:usb:001");
    let ctx = common::helpers::lazy_context(vec![reader.clone()]);
    assert!(!ctx.is_initialized());

    assert_eq!(ctx.list_devices()?, vec!["mock:usb:001".to_string()]);
    assert!(ctx.is_initialized());

    let dev = ctx.open("")?;
    assert_eq!(dev.connection(), "mock:usb:001");
    drop(dev);
    assert!(reader.is_closed());
    Ok(())
}

#[test]
fn render_goes_through_the_driver() -> anyhow::Result<()> {
    let (ctx, _) = common::helpers::context_with_readers(0);
    let felica = common::fixtures::felica_lite();
    let text = ctx.render_target(&felica, false)?;
    assert!(text.starts_with("FeliCa (212 kbps) target:"));
    assert!(ctx.version()?.starts_with("mock-"));
    Ok(())
}

#[test]
fn render_fails_when_driver_cannot_format() {
    let ctx = Context::with_driver(MockDriver::new().fail_format(ErrorCode::Chip));
    let felica = common::fixtures::felica_lite();
    assert_eq!(ctx.render_target(&felica, true), Err(Error::Chip));
}

#[test]
fn deinit_is_terminal() {
    let (ctx, _) = common::helpers::context_with_readers(1);
    ctx.deinit();
    assert!(matches!(ctx.open(""), Err(Error::Software(_))));
    assert!(matches!(ctx.list_devices(), Err(Error::Software(_))));
    ctx.deinit();
}

#[test]
fn connection_strings_are_validated() {
    let (ctx, _) = common::helpers::context_with_readers(1);
    let too_long = "m".repeat(MAX_CONNSTRING_LEN + 1);
    assert!(matches!(ctx.open(&too_long), Err(Error::InvalidArgument(_))));
    assert!(matches!(ctx.open("mock:\u{0}0"), Err(Error::InvalidArgument(_))));
}

#[test]
fn devices_from_one_context_are_independent() -> anyhow::Result<()> {
    let (ctx, readers) = common::helpers::context_with_readers(2);
    let mut a = ctx.open("mock:0")?;
    let mut b = ctx.open("mock:1")?;
    readers[1].push_bytes(vec![0x90, 0x00]);

    assert_eq!(a.transceive_bytes(&[0x00], 4, Timeout::Default), Err(Error::Timeout));
    assert_eq!(b.transceive_bytes(&[0x00], 4, Timeout::Default)?, vec![0x90, 0x00]);
    Ok(())
}

#[cfg(not(feature = "libnfc"))]
#[test]
#[serial]
fn global_context_without_backend() {
    assert!(matches!(pn53x::list_devices(), Err(Error::NotImplemented)));
    assert!(matches!(pn53x::open(""), Err(Error::NotImplemented)));
    assert!(!pn53x::device::global().is_initialized());
}
