// pn53x-rs/pn53x/src/target/dep.rs

//! NFC-DEP peer descriptor.

use crate::constants::MAX_GB_LEN;
use crate::protocol::parser::{WireReader, WireWriter, clamped, ensure_fits};
use crate::target::TargetInfo;
use crate::types::{BaudRate, DepMode, ModulationKind};
use crate::Result;

/// NFC-DEP (ISO/IEC 18092) peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepTarget {
    /// NFCID3 random identifier
    pub nfcid3: [u8; 10],
    /// Device ID
    pub did: u8,
    /// Supported send bit rates
    pub bs: u8,
    /// Supported receive bit rates
    pub br: u8,
    /// Timeout value
    pub to: u8,
    /// Protocol parameters
    pub pp: u8,
    /// General bytes of ATR_REQ / ATR_RES
    pub general_bytes: Vec<u8>,
    /// Active or passive communication
    pub dep_mode: DepMode,
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for DepTarget {
    const KIND: ModulationKind = ModulationKind::Dep;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        let nfcid3 = r.array();
        let did = r.u8();
        let bs = r.u8();
        let br = r.u8();
        let to = r.u8();
        let pp = r.u8();
        let gb = r.bytes(MAX_GB_LEN);
        let gb_len = r.usize();
        let raw_mode = r.i32();
        let dep_mode = DepMode::from_raw(raw_mode)
            .unwrap_or_else(|| panic!("wire record carries unknown DEP mode {}", raw_mode));
        Self {
            nfcid3,
            did,
            bs,
            br,
            to,
            pp,
            general_bytes: clamped(gb, gb_len),
            dep_mode,
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        ensure_fits("DEP general bytes", self.general_bytes.len(), MAX_GB_LEN)?;
        w.put_bytes(&self.nfcid3);
        w.put_u8(self.did);
        w.put_u8(self.bs);
        w.put_u8(self.br);
        w.put_u8(self.to);
        w.put_u8(self.pp);
        w.put_padded(&self.general_bytes, MAX_GB_LEN);
        w.put_usize(self.general_bytes.len());
        w.put_i32(self.dep_mode.as_raw());
        Ok(())
    }
}
