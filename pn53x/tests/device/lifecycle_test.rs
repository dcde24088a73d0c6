use crate::common;

use pn53x::prelude::*;

#[test]
fn open_describe_close() -> anyhow::Result<()> {
    common::helpers::init_logging();
    let (ctx, readers) = common::helpers::context_with_readers(2);

    let mut dev = ctx.open("mock:1")?;
    assert_eq!(dev.name(), "mock reader 1");
    assert_eq!(dev.connection(), "mock:1");
    assert!(dev.information()?.contains("mock:1"));
    assert_eq!(dev.last_error()?, ErrorCode::Success);

    dev.close();
    assert!(readers[1].is_closed());
    assert!(!readers[0].is_closed());
    assert_eq!(dev.initiator_init(), Err(Error::DeviceClosed));
    Ok(())
}

#[test]
fn unknown_reader_is_reported() {
    let (ctx, _) = common::helpers::context_with_readers(1);
    assert!(matches!(ctx.open("mock:7"), Err(Error::NoSuchDevice)));
}

#[test]
fn capabilities_come_from_the_driver() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    {
        let mut st = mock.state();
        st.modulations = vec![ModulationKind::Iso14443a, ModulationKind::Felica];
        st.baud_rates = vec![BaudRate::Br212, BaudRate::Br424];
    }
    assert_eq!(
        dev.supported_modulations(Mode::Initiator)?,
        vec![ModulationKind::Iso14443a, ModulationKind::Felica]
    );
    assert_eq!(
        dev.supported_baud_rates(ModulationKind::Felica)?,
        vec![BaudRate::Br212, BaudRate::Br424]
    );
    Ok(())
}

#[test]
fn driver_failures_keep_their_code() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.fail_next("idle", ErrorCode::Io);
    let err = dev.idle().unwrap_err();
    assert_eq!(err, Error::Io);
    assert_eq!(err.code(), Some(ErrorCode::Io));
    assert_eq!(dev.last_error()?, ErrorCode::Io);

    // the failure was one-shot
    dev.idle()?;
    Ok(())
}

#[test]
fn configure_as_initiator() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    dev.initiator_init()?;
    dev.set_property_bool(Property::ActivateField, false)?;
    dev.set_property_bool(Property::InfiniteSelect, false)?;
    dev.set_property_int(Property::TimeoutCom, 52)?;
    assert_eq!(mock.property(Property::ActivateField), Some(0));
    assert_eq!(mock.property(Property::TimeoutCom), Some(52));
    assert_eq!(
        mock.calls(),
        vec![
            "open",
            "initiator_init",
            "set_property_bool",
            "set_property_bool",
            "set_property_int"
        ]
    );
    Ok(())
}
