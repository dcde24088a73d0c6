// pn53x-rs/pn53x/src/target/jewel.rs

//! Innovision Jewel descriptor.

use crate::protocol::parser::{WireReader, WireWriter};
use crate::target::TargetInfo;
use crate::types::{BaudRate, ModulationKind};
use crate::Result;

/// Innovision Jewel / Topaz target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JewelTarget {
    /// SENS_RES
    pub sens_res: [u8; 2],
    /// 4 LSB of the Jewel ID
    pub id: [u8; 4],
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for JewelTarget {
    const KIND: ModulationKind = ModulationKind::Jewel;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        Self {
            sens_res: r.array(),
            id: r.array(),
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.put_bytes(&self.sens_res);
        w.put_bytes(&self.id);
        Ok(())
    }
}
