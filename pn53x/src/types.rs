// pn53x-rs/pn53x/src/types.rs

//! Modulation, baud rate and property enums shared by targets and drivers.

use derive_more::Display;

/// NFC modulation family. Discriminants match the driver's `nfc_modulation_type`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModulationKind {
    /// ISO/IEC 14443 type A.
    #[display(fmt = "ISO14443a")]
    Iso14443a = 1,
    /// Innovision Jewel / Topaz.
    #[display(fmt = "Jewel")]
    Jewel = 2,
    /// ISO/IEC 14443 type B.
    #[display(fmt = "ISO14443b")]
    Iso14443b = 3,
    /// Pre-ISO14443B cards (ASK CTx).
    #[display(fmt = "ISO14443bi")]
    Iso14443bi = 4,
    /// ST SRx memory cards.
    #[display(fmt = "ISO14443b2sr")]
    Iso14443b2sr = 5,
    /// ASK CTx memory cards.
    #[display(fmt = "ISO14443b2ct")]
    Iso14443b2ct = 6,
    /// Sony FeliCa.
    #[display(fmt = "Felica")]
    Felica = 7,
    /// NFC-DEP peer.
    #[display(fmt = "DEP")]
    Dep = 8,
    /// Thinfilm NFC Barcode.
    #[display(fmt = "Barcode")]
    Barcode = 9,
    /// HID iClass (Picopass).
    #[display(fmt = "ISO14443biClass")]
    Iso14443biClass = 10,
}

impl ModulationKind {
    /// Every kind, in discriminant order.
    pub const ALL: [ModulationKind; 10] = [
        Self::Iso14443a,
        Self::Jewel,
        Self::Iso14443b,
        Self::Iso14443bi,
        Self::Iso14443b2sr,
        Self::Iso14443b2ct,
        Self::Felica,
        Self::Dep,
        Self::Barcode,
        Self::Iso14443biClass,
    ];

    /// Kind for a driver discriminant.
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_raw() == raw)
    }

    /// Driver discriminant.
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// Air interface bit rate.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaudRate {
    /// Not yet known.
    #[default]
    #[display(fmt = "Undefined")]
    Undefined = 0,
    /// 106 kbit/s.
    #[display(fmt = "106")]
    Br106 = 1,
    /// 212 kbit/s.
    #[display(fmt = "212")]
    Br212 = 2,
    /// 424 kbit/s.
    #[display(fmt = "424")]
    Br424 = 3,
    /// 847 kbit/s.
    #[display(fmt = "847")]
    Br847 = 4,
}

impl BaudRate {
    /// Rate for a driver discriminant.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Undefined),
            1 => Some(Self::Br106),
            2 => Some(Self::Br212),
            3 => Some(Self::Br424),
            4 => Some(Self::Br847),
            _ => None,
        }
    }

    /// Driver discriminant.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Nominal rate in kbit/s, `None` while undefined.
    pub fn kbps(self) -> Option<u32> {
        match self {
            Self::Undefined => None,
            Self::Br106 => Some(106),
            Self::Br212 => Some(212),
            Self::Br424 => Some(424),
            Self::Br847 => Some(847),
        }
    }
}

/// Modulation kind paired with a baud rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modulation {
    /// Modulation family.
    pub kind: ModulationKind,
    /// Bit rate within the family.
    pub baud_rate: BaudRate,
}

impl Modulation {
    /// Pair `kind` with `baud_rate`.
    pub const fn new(kind: ModulationKind, baud_rate: BaudRate) -> Self {
        Self { kind, baud_rate }
    }
}

impl std::fmt::Display for Modulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} kbps)", self.kind, self.baud_rate)
    }
}

/// NFC-DEP activation mode.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepMode {
    /// Not yet known.
    #[default]
    #[display(fmt = "undefined")]
    Undefined = 0,
    /// Passive communication.
    #[display(fmt = "passive")]
    Passive = 1,
    /// Active communication.
    #[display(fmt = "active")]
    Active = 2,
}

impl DepMode {
    /// Mode for a driver discriminant.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Undefined),
            1 => Some(Self::Passive),
            2 => Some(Self::Active),
            _ => None,
        }
    }

    /// Driver discriminant.
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// Role the reader plays on the air interface.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Emulated tag.
    #[display(fmt = "target")]
    Target = 0,
    /// Reader.
    #[display(fmt = "initiator")]
    Initiator = 1,
}

impl Mode {
    /// Driver discriminant.
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// Driver properties, numbered as `nfc_property`.
///
/// The first three take integer values (milliseconds), the rest are flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    /// Timeout for commands sent to the chip.
    TimeoutCommand = 0,
    /// Timeout waiting for an ATR_RES.
    TimeoutAtr = 1,
    /// Timeout for frames exchanged with a tag.
    TimeoutCom = 2,
    /// Append and check CRC in the chip.
    HandleCrc = 3,
    /// Generate and check parity in the chip.
    HandleParity = 4,
    /// RF field on or off.
    ActivateField = 5,
    /// MIFARE Classic cipher engine.
    ActivateCrypto1 = 6,
    /// Retry selection until a tag answers.
    InfiniteSelect = 7,
    /// Keep frames with bad CRC or parity.
    AcceptInvalidFrames = 8,
    /// Accept several frames in one receive.
    AcceptMultipleFrames = 9,
    /// Activate ISO14443-4 automatically on selection.
    AutoIso14443_4 = 10,
    /// Let the chip wrap frames in its own exchange command.
    EasyFraming = 11,
    /// Force ISO14443A framing.
    ForceIso14443a = 12,
    /// Force ISO14443B framing.
    ForceIso14443b = 13,
    /// Force 106 kbit/s.
    ForceSpeed106 = 14,
}

impl Property {
    /// Driver discriminant.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Whether the property takes an integer rather than a flag.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::TimeoutCommand | Self::TimeoutAtr | Self::TimeoutCom
        )
    }
}
