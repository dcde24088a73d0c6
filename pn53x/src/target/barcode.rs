// pn53x-rs/pn53x/src/target/barcode.rs

//! Thinfilm NFC Barcode descriptor.

use crate::constants::MAX_BARCODE_LEN;
use crate::protocol::parser::{WireReader, WireWriter, clamped, ensure_fits};
use crate::target::TargetInfo;
use crate::types::{BaudRate, ModulationKind};
use crate::Result;

/// Thinfilm NFC Barcode. The tag only ever transmits its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarcodeTarget {
    /// Payload, at most 32 bytes
    pub data: Vec<u8>,
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for BarcodeTarget {
    const KIND: ModulationKind = ModulationKind::Barcode;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        let len = r.usize();
        let data = clamped(r.bytes(MAX_BARCODE_LEN), len);
        Self { data, baud_rate }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        ensure_fits("barcode data", self.data.len(), MAX_BARCODE_LEN)?;
        w.put_usize(self.data.len());
        w.put_padded(&self.data, MAX_BARCODE_LEN);
        Ok(())
    }
}
