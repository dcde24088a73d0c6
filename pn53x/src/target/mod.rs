// pn53x-rs/pn53x/src/target/mod.rs

//! Typed target descriptors and their wire encoding.
//!
//! A [`Target`] is exactly one modulation family's descriptor. Decoding reads
//! the discriminant from a [`WireTarget`] and copies every field out of the
//! record; encoding builds a fresh zeroed record.

mod barcode;
mod dep;
mod describe;
mod felica;
mod iso14443a;
mod iso14443b;
mod jewel;

pub use barcode::BarcodeTarget;
pub use dep::DepTarget;
pub use describe::{describe, family_name};
pub use felica::FelicaTarget;
pub use iso14443a::Iso14443aTarget;
pub use iso14443b::{
    Iso14443b2ctTarget, Iso14443b2srTarget, Iso14443bTarget, Iso14443biClassTarget,
    Iso14443biTarget,
};
pub use jewel::JewelTarget;

use std::fmt;

use crate::driver::Driver;
use crate::protocol::parser::{WireReader, WireWriter};
use crate::protocol::wire::WireTarget;
use crate::types::{BaudRate, Modulation, ModulationKind};
use crate::Result;

/// Per-family descriptor: fixed modulation kind plus its slot in the
/// target-info union.
pub trait TargetInfo: Sized {
    /// Modulation kind this descriptor belongs to.
    const KIND: ModulationKind;

    /// Bit rate the target answered at.
    fn baud_rate(&self) -> BaudRate;

    /// Modulation the target was selected with.
    fn modulation(&self) -> Modulation {
        Modulation::new(Self::KIND, self.baud_rate())
    }

    /// Read the union slot. Variable length fields are clamped to capacity.
    fn read_info(r: &mut WireReader<'_>, baud_rate: BaudRate) -> Self;

    /// Write the union slot; fails if a variable field exceeds capacity.
    fn write_info(&self, w: &mut WireWriter<'_>) -> Result<()>;
}

/// A target descriptor of any supported family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// ISO14443A card
    Iso14443a(Iso14443aTarget),
    /// Jewel tag
    Jewel(JewelTarget),
    /// ISO14443B card
    Iso14443b(Iso14443bTarget),
    /// pre-ISO14443B card
    Iso14443bi(Iso14443biTarget),
    /// ST SRx card
    Iso14443b2sr(Iso14443b2srTarget),
    /// ASK CTx card
    Iso14443b2ct(Iso14443b2ctTarget),
    /// FeliCa card
    Felica(FelicaTarget),
    /// NFC-DEP peer
    Dep(DepTarget),
    /// NFC Barcode tag
    Barcode(BarcodeTarget),
    /// iClass card
    Iso14443biClass(Iso14443biClassTarget),
}

macro_rules! with_info {
    ($target:expr, $info:ident => $body:expr) => {
        match $target {
            Target::Iso14443a($info) => $body,
            Target::Jewel($info) => $body,
            Target::Iso14443b($info) => $body,
            Target::Iso14443bi($info) => $body,
            Target::Iso14443b2sr($info) => $body,
            Target::Iso14443b2ct($info) => $body,
            Target::Felica($info) => $body,
            Target::Dep($info) => $body,
            Target::Barcode($info) => $body,
            Target::Iso14443biClass($info) => $body,
        }
    };
}

fn read<T: TargetInfo>(wire: &WireTarget, baud_rate: BaudRate) -> T {
    T::read_info(&mut WireReader::new(wire.info()), baud_rate)
}

impl Target {
    /// Decode a wire record.
    ///
    /// # Panics
    ///
    /// If the record's modulation kind, baud rate or DEP mode is outside the
    /// known range. Such a record can only come from a driver built against
    /// a different layout.
    pub fn decode(wire: &WireTarget) -> Target {
        let kind = ModulationKind::from_raw(wire.kind_raw())
            .unwrap_or_else(|| panic!("cannot determine target type (nmt = {})", wire.kind_raw()));
        let baud = BaudRate::from_raw(wire.baud_raw())
            .unwrap_or_else(|| panic!("wire record carries unknown baud rate {}", wire.baud_raw()));
        match kind {
            ModulationKind::Iso14443a => Target::Iso14443a(read(wire, baud)),
            ModulationKind::Jewel => Target::Jewel(read(wire, baud)),
            ModulationKind::Iso14443b => Target::Iso14443b(read(wire, baud)),
            ModulationKind::Iso14443bi => Target::Iso14443bi(read(wire, baud)),
            ModulationKind::Iso14443b2sr => Target::Iso14443b2sr(read(wire, baud)),
            ModulationKind::Iso14443b2ct => Target::Iso14443b2ct(read(wire, baud)),
            ModulationKind::Felica => Target::Felica(read(wire, baud)),
            ModulationKind::Dep => Target::Dep(read(wire, baud)),
            ModulationKind::Barcode => Target::Barcode(read(wire, baud)),
            ModulationKind::Iso14443biClass => Target::Iso14443biClass(read(wire, baud)),
        }
    }

    /// Encode into a fresh wire record.
    pub fn encode(&self) -> Result<WireTarget> {
        let mut wire = WireTarget::for_modulation(self.modulation());
        let mut w = WireWriter::new(wire.info_mut());
        with_info!(self, info => info.write_info(&mut w))?;
        Ok(wire)
    }

    /// Modulation of the wrapped descriptor.
    pub fn modulation(&self) -> Modulation {
        with_info!(self, info => info.modulation())
    }

    /// Modulation family.
    pub fn kind(&self) -> ModulationKind {
        self.modulation().kind
    }

    /// Bit rate the target answered at.
    pub fn baud_rate(&self) -> BaudRate {
        with_info!(self, info => info.baud_rate())
    }

    /// Render through the driver's own formatter.
    pub fn render(&self, driver: &dyn Driver, verbose: bool) -> Result<String> {
        let wire = self.encode()?;
        let text = driver.format_target(&wire, verbose).inspect_err(|code| {
            log::warn!("driver could not format {} target: {}", self.kind(), code);
        })?;
        Ok(text)
    }

    /// The ISO14443A descriptor, if this is one.
    pub fn as_iso14443a(&self) -> Option<&Iso14443aTarget> {
        match self {
            Target::Iso14443a(t) => Some(t),
            _ => None,
        }
    }

    /// The FeliCa descriptor, if this is one.
    pub fn as_felica(&self) -> Option<&FelicaTarget> {
        match self {
            Target::Felica(t) => Some(t),
            _ => None,
        }
    }

    /// The NFC-DEP descriptor, if this is one.
    pub fn as_dep(&self) -> Option<&DepTarget> {
        match self {
            Target::Dep(t) => Some(t),
            _ => None,
        }
    }
}

/// Render `target` with `driver`'s formatter.
pub fn render_target(driver: &dyn Driver, target: &Target, verbose: bool) -> Result<String> {
    target.render(driver, verbose)
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe(self, true))
    }
}

macro_rules! impl_from_info {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Target {
                fn from(info: $ty) -> Self {
                    Target::$variant(info)
                }
            }
        )*
    };
}

impl_from_info! {
    Iso14443a => Iso14443aTarget,
    Jewel => JewelTarget,
    Iso14443b => Iso14443bTarget,
    Iso14443bi => Iso14443biTarget,
    Iso14443b2sr => Iso14443b2srTarget,
    Iso14443b2ct => Iso14443b2ctTarget,
    Felica => FelicaTarget,
    Dep => DepTarget,
    Barcode => BarcodeTarget,
    Iso14443biClass => Iso14443biClassTarget,
}
