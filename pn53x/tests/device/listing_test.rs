use crate::common;

use crate::common::helpers::A106;
use pn53x::prelude::*;

#[test]
fn list_type_a_targets_end_to_end() -> anyhow::Result<()> {
    common::helpers::init_logging();
    let (mut dev, mock) = common::helpers::open_mock_device();
    let card = common::fixtures::ultralight();
    mock.add_target(&card)?;
    mock.add_target(&common::fixtures::felica_lite())?;

    dev.initiator_init()?;
    let found = dev.initiator_list_passive_targets(A106)?;
    assert_eq!(found, vec![card.clone()]);

    let a = found[0].as_iso14443a().unwrap();
    assert_eq!(a.cascaded_uid()[0], 0x88);
    assert!(!a.is_iso14443_4());

    let text = format!("{}", found[0]);
    assert!(text.starts_with("ISO/IEC 14443A (106 kbps) target:"));
    assert!(text.contains("04  a2  b3  c4  d5  e6  f7"));
    Ok(())
}

#[test]
fn more_targets_than_one_chunk() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    for i in 0..20u8 {
        mock.add_target(&Target::Iso14443a(Iso14443aTarget {
            atqa: [0x00, 0x04],
            sak: 0x08,
            uid: vec![i, 0x11, 0x22, 0x33],
            ats: vec![],
            baud_rate: BaudRate::Br106,
        }))?;
    }
    let found = dev.initiator_list_passive_targets(A106)?;
    assert_eq!(found.len(), 20);
    for (i, t) in found.iter().enumerate() {
        assert_eq!(t.as_iso14443a().unwrap().uid[0], i as u8);
    }
    // 16 slots filled, retried with 32
    let listings = mock
        .calls()
        .iter()
        .filter(|c| *c == "initiator_list_passive_targets")
        .count();
    assert_eq!(listings, 2);
    Ok(())
}

#[test]
fn empty_field_lists_nothing() -> anyhow::Result<()> {
    let (mut dev, _mock) = common::helpers::open_mock_device();
    assert!(dev.initiator_list_passive_targets(A106)?.is_empty());
    Ok(())
}

#[test]
fn poll_finds_first_matching_family() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    mock.add_target(&common::fixtures::felica_lite())?;
    let felica212 = Modulation::new(ModulationKind::Felica, BaudRate::Br212);

    let found = dev.initiator_poll_target(&[A106, felica212], 20, 2)?;
    let felica = found.as_ref().and_then(Target::as_felica).unwrap();
    assert_eq!(felica.sys_code, [0x88, 0xb4]);

    assert_eq!(dev.initiator_poll_target(&[A106], 1, 1)?, None);
    Ok(())
}

#[test]
fn dep_activation_matches_mode_and_rate() -> anyhow::Result<()> {
    let (mut dev, mock) = common::helpers::open_mock_device();
    let peer = common::helpers::sample_targets()
        .into_iter()
        .find(|t| t.kind() == ModulationKind::Dep)
        .unwrap();
    mock.add_target(&peer)?;

    let local = DepTarget {
        nfcid3: [0x11; 10],
        general_bytes: vec![0x46, 0x66, 0x6d],
        ..Default::default()
    };
    let found = dev.initiator_select_dep_target(
        DepMode::Passive,
        BaudRate::Br424,
        Some(&local),
        Timeout::Millis(1000),
    )?;
    assert_eq!(found, Some(peer));
    assert_eq!(&mock.sent()[0][..10], &[0x11; 10]);

    let none = dev.initiator_select_dep_target(
        DepMode::Active,
        BaudRate::Br424,
        None,
        Timeout::Default,
    )?;
    assert_eq!(none, None);
    Ok(())
}

#[test]
fn first_reader_lists_type_a_cards() -> anyhow::Result<()> {
    let (ctx, readers) = common::helpers::context_with_readers(1);
    readers[0].add_target(&common::fixtures::ultralight())?;
    readers[0].add_target(&Target::Iso14443a(pn53x::test_support::desfire()))?;

    let mut dev = ctx.open("")?;
    dev.initiator_init()?;
    let found = dev.initiator_list_passive_targets(A106)?;
    assert_eq!(found.len(), 2);
    for t in &found {
        assert_eq!(t.modulation(), A106);
        let a = t.as_iso14443a().unwrap();
        assert!((4..=10).contains(&a.uid.len()));
    }
    assert_eq!(
        found[1].as_iso14443a().and_then(|a| a.historical_bytes()),
        Some(&[0x02, 0x80][..])
    );
    Ok(())
}
