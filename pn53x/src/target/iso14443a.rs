// pn53x-rs/pn53x/src/target/iso14443a.rs

//! ISO14443A descriptor and its ATS and UID helpers.

use crate::constants::{MAX_ATS_LEN, MAX_UID_LEN};
use crate::protocol::parser::{WireReader, WireWriter, clamped, ensure_fits};
use crate::protocol::{cascade_uid, locate_historical_bytes};
use crate::target::TargetInfo;
use crate::types::{BaudRate, ModulationKind};
use crate::Result;

/// ISO/IEC 14443 type A target (MIFARE, NTAG, DESFire, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso14443aTarget {
    /// ATQA (SENS_RES)
    pub atqa: [u8; 2],
    /// SAK (SEL_RES)
    pub sak: u8,
    /// NFCID1, 4, 7 or 10 bytes
    pub uid: Vec<u8>,
    /// Answer to select, without the length byte
    pub ats: Vec<u8>,
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl Iso14443aTarget {
    /// Historical bytes carried in the ATS, if any.
    pub fn historical_bytes(&self) -> Option<&[u8]> {
        locate_historical_bytes(&self.ats)
    }

    /// UID with cascade tags, as sent during anti-collision.
    pub fn cascaded_uid(&self) -> Vec<u8> {
        cascade_uid(&self.uid)
    }

    /// SAK bit 6: the target speaks ISO/IEC 14443-4.
    pub fn is_iso14443_4(&self) -> bool {
        self.sak & 0x20 != 0
    }
}

impl TargetInfo for Iso14443aTarget {
    const KIND: ModulationKind = ModulationKind::Iso14443a;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        let atqa = r.array();
        let sak = r.u8();
        let uid_len = r.usize();
        let uid = clamped(r.bytes(MAX_UID_LEN), uid_len);
        let ats_len = r.usize();
        let ats = clamped(r.bytes(MAX_ATS_LEN), ats_len);
        Self {
            atqa,
            sak,
            uid,
            ats,
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        ensure_fits("ISO14443A uid", self.uid.len(), MAX_UID_LEN)?;
        ensure_fits("ISO14443A ats", self.ats.len(), MAX_ATS_LEN)?;
        w.put_bytes(&self.atqa);
        w.put_u8(self.sak);
        w.put_usize(self.uid.len());
        w.put_padded(&self.uid, MAX_UID_LEN);
        w.put_usize(self.ats.len());
        w.put_padded(&self.ats, MAX_ATS_LEN);
        Ok(())
    }
}
