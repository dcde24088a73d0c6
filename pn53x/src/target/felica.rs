// pn53x-rs/pn53x/src/target/felica.rs

//! FeliCa descriptor.

use crate::protocol::parser::{WireReader, WireWriter};
use crate::target::TargetInfo;
use crate::types::{BaudRate, ModulationKind};
use crate::Result;

/// FeliCa target, as returned by a polling request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FelicaTarget {
    /// Length of the polling response
    pub len: usize,
    /// Response code
    pub res_code: u8,
    /// IDm (NFCID2)
    pub id: [u8; 8],
    /// PMm
    pub pad: [u8; 8],
    /// System code
    pub sys_code: [u8; 2],
    /// Bit rate the target answered at
    pub baud_rate: BaudRate,
}

impl TargetInfo for FelicaTarget {
    const KIND: ModulationKind = ModulationKind::Felica;

    fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self {
        Self {
            len: r.usize(),
            res_code: r.u8(),
            id: r.array(),
            pad: r.array(),
            sys_code: r.array(),
            baud_rate,
        }
    }

    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.put_usize(self.len);
        w.put_u8(self.res_code);
        w.put_bytes(&self.id);
        w.put_bytes(&self.pad);
        w.put_bytes(&self.sys_code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::wire::TARGET_INFO_LEN;
    use std::mem::size_of;

    #[test]
    fn layout() {
        let t = FelicaTarget {
            len: 18,
            res_code: 0x01,
            id: [0x01, 0x2e, 0x3d, 0x4c, 0x5b, 0x6a, 0x79, 0x88],
            pad: [0x00, 0xf1, 0x00, 0x00, 0x00, 0x01, 0x43, 0x00],
            sys_code: [0x88, 0xb4],
            baud_rate: BaudRate::Br212,
        };
        let mut slot = [0u8; TARGET_INFO_LEN];
        t.write_info(&mut WireWriter::new(&mut slot)).unwrap();
        let s = size_of::<usize>();
        assert_eq!(&slot[..s], &18usize.to_ne_bytes());
        assert_eq!(slot[s], 0x01);
        assert_eq!(&slot[s + 1..s + 9], &t.id);
        assert_eq!(&slot[s + 9..s + 17], &t.pad);
        assert_eq!(&slot[s + 17..s + 19], &t.sys_code);

        let back = FelicaTarget::read_info(&mut WireReader::new(&slot), BaudRate::Br212);
        assert_eq!(back, t);
    }
}
