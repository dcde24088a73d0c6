// pn53x-rs/pn53x/src/target/iso14443b.rs

//! ISO/IEC 14443 type B and its proprietary offshoots.

use crate::constants::MAX_ATR_LEN;
use crate::protocol::parser::{WireReader, WireWriter, clamped, ensure_fits};
use crate::target::TargetInfo;
use crate::types::{BaudRate, ModulationKind};
use crate::Result;

/// ISO/IEC 14443-3B target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso14443bTarget {
    /// Pseudo-unique PICC identifier
    pub pupi: [u8; 4],
    /// Application data from ATQB
    pub application_data: [u8; 4],
    /// Protocol info from ATQB
    pub protocol_info: [u8; 3],
    /// CID assigned with ATTRIB
    pub card_identifier: u8,
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for Iso14443bTarget {
    const KIND: ModulationKind = ModulationKind::Iso14443b;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        Self {
            pupi: r.array(),
            application_data: r.array(),
            protocol_info: r.array(),
            card_identifier: r.u8(),
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.put_bytes(&self.pupi);
        w.put_bytes(&self.application_data);
        w.put_bytes(&self.protocol_info);
        w.put_u8(self.card_identifier);
        Ok(())
    }
}

/// ISO/IEC 14443 B' (Innovatron) target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso14443biTarget {
    /// DIV, 4 LSB of the UID
    pub div: [u8; 4],
    /// REPGEN software version
    pub ver_log: u8,
    /// Configuration byte
    pub config: u8,
    /// ATTRIB answer
    pub atr: Vec<u8>,
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for Iso14443biTarget {
    const KIND: ModulationKind = ModulationKind::Iso14443bi;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        let div = r.array();
        let ver_log = r.u8();
        let config = r.u8();
        let atr_len = r.usize();
        let atr = clamped(r.bytes(MAX_ATR_LEN), atr_len);
        Self {
            div,
            ver_log,
            config,
            atr,
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        ensure_fits("ISO14443B' atr", self.atr.len(), MAX_ATR_LEN)?;
        w.put_bytes(&self.div);
        w.put_u8(self.ver_log);
        w.put_u8(self.config);
        w.put_usize(self.atr.len());
        w.put_padded(&self.atr, MAX_ATR_LEN);
        Ok(())
    }
}

/// ST SRx (ISO/IEC 14443-2B) target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso14443b2srTarget {
    /// SRx UID
    pub uid: [u8; 8],
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for Iso14443b2srTarget {
    const KIND: ModulationKind = ModulationKind::Iso14443b2sr;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        Self {
            uid: r.array(),
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.put_bytes(&self.uid);
        Ok(())
    }
}

/// ASK CTx (ISO/IEC 14443-2B) target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso14443b2ctTarget {
    /// UID
    pub uid: [u8; 4],
    /// Product code
    pub prod_code: u8,
    /// Fab code
    pub fab_code: u8,
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for Iso14443b2ctTarget {
    const KIND: ModulationKind = ModulationKind::Iso14443b2ct;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        Self {
            uid: r.array(),
            prod_code: r.u8(),
            fab_code: r.u8(),
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.put_bytes(&self.uid);
        w.put_u8(self.prod_code);
        w.put_u8(self.fab_code);
        Ok(())
    }
}

/// HID iClass (Picopass) target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iso14443biClassTarget {
    /// iClass serial number
    pub uid: [u8; 8],
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for Iso14443biClassTarget {
    const KIND: ModulationKind = ModulationKind::Iso14443biClass;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        Self {
            uid: r.array(),
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.put_bytes(&self.uid);
        Ok(())
    }
}
