//! Gen2 air-interface parameters, as understood by the reader driver.

pub mod select;
pub use select::{build_select, Select, SelectAction, SelectError, SelectTarget};

/// A tag memory bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryBank {
    /// Kill and access passwords.
    Reserved,
    /// StoredCRC, StoredPC and the EPC itself.
    Epc,
    /// Tag and vendor identification.
    Tid,
    User,
}

impl MemoryBank {
    /// The 2-bit MemBank code.
    pub fn value(&self) -> u8 {
        match self {
            MemoryBank::Reserved => 0b00,
            MemoryBank::Epc => 0b01,
            MemoryBank::Tid => 0b10,
            MemoryBank::User => 0b11,
        }
    }
}

impl TryFrom<u8> for MemoryBank {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b00 => Ok(Self::Reserved),
            0b01 => Ok(Self::Epc),
            0b10 => Ok(Self::Tid),
            0b11 => Ok(Self::User),
            _ => Err(()),
        }
    }
}

impl core::fmt::Display for MemoryBank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemoryBank::Reserved => write!(f, "Reserved"),
            MemoryBank::Epc => write!(f, "EPC"),
            MemoryBank::Tid => write!(f, "TID"),
            MemoryBank::User => write!(f, "User"),
        }
    }
}

/// The inventory session whose flag the reader uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Session {
    S0,
    S1,
    S2,
    S3,
}

impl Session {
    pub fn value(&self) -> u8 {
        match self {
            Session::S0 => 0,
            Session::S1 => 1,
            Session::S2 => 2,
            Session::S3 => 3,
        }
    }
}

/// Which inventoried flag state the reader queries for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryTarget {
    A,
    B,
    /// Query A, then B.
    AB,
    /// Query B, then A.
    BA,
}

impl InventoryTarget {
    pub fn value(&self) -> u8 {
        match self {
            InventoryTarget::A => 0,
            InventoryTarget::B => 1,
            InventoryTarget::AB => 2,
            InventoryTarget::BA => 3,
        }
    }
}

/// Backscatter link frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkFrequency {
    Link40Khz,
    Link250Khz,
    Link320Khz,
    Link640Khz,
}

impl LinkFrequency {
    /// The frequency in kHz.
    pub fn value(&self) -> u16 {
        match self {
            LinkFrequency::Link40Khz => 40,
            LinkFrequency::Link250Khz => 250,
            LinkFrequency::Link320Khz => 320,
            LinkFrequency::Link640Khz => 640,
        }
    }
}

/// Tag-to-reader data encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagEncoding {
    Fm0,
    M2,
    M4,
    M8,
}

impl TagEncoding {
    /// The `M` field of the Query command.
    pub fn value(&self) -> u8 {
        match self {
            TagEncoding::Fm0 => 0,
            TagEncoding::M2 => 1,
            TagEncoding::M4 => 2,
            TagEncoding::M8 => 3,
        }
    }
}

/// Reader-to-tag reference interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tari {
    Tari25Us,
    Tari12_5Us,
    Tari6_25Us,
}

impl Tari {
    /// The driver's index for this Tari.
    pub fn value(&self) -> u8 {
        match self {
            Tari::Tari25Us => 0,
            Tari::Tari12_5Us => 1,
            Tari::Tari6_25Us => 2,
        }
    }

    /// The interval in nanoseconds.
    pub fn nanos(&self) -> u32 {
        match self {
            Tari::Tari25Us => 25_000,
            Tari::Tari12_5Us => 12_500,
            Tari::Tari6_25Us => 6_250,
        }
    }
}

/// The slot-count algorithm used during inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Q {
    /// Let the reader adapt Q to the population.
    Dynamic,
    /// Always use `2^q` slots. `q` must be at most [`Q::MAX`]; prefer
    /// [`Q::new_static`]. Out-of-range values are rejected by
    /// [`ReaderConfig::validate`](crate::ReaderConfig::validate).
    Static(u8),
}

impl Q {
    pub const MAX: u8 = 15;

    pub fn new_static(q: u8) -> Option<Self> {
        if q <= Self::MAX {
            Some(Self::Static(q))
        } else {
            None
        }
    }
}

/// The Q value the reader starts each inventory round with.
///
/// `None` leaves the choice to the reader. Values above [`Q::MAX`] are
/// rejected by [`ReaderConfig::validate`](crate::ReaderConfig::validate).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitQ {
    pub initial: Option<u8>,
}

/// A regulatory region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Na,
    Eu3,
    In,
    Jp,
    Prc,
    Kr2,
    Au,
    Nz,
    Open,
}

impl Region {
    /// The region code reported and accepted by the reader.
    pub fn value(&self) -> u8 {
        match self {
            Region::Na => 0x01,
            Region::Eu3 => 0x08,
            Region::In => 0x04,
            Region::Jp => 0x05,
            Region::Prc => 0x06,
            Region::Kr2 => 0x09,
            Region::Au => 0x0B,
            Region::Nz => 0x0C,
            Region::Open => 0xFF,
        }
    }
}

impl core::fmt::Display for Region {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Region::Na => "NA",
            Region::Eu3 => "EU3",
            Region::In => "IN",
            Region::Jp => "JP",
            Region::Prc => "PRC",
            Region::Kr2 => "KR2",
            Region::Au => "AU",
            Region::Nz => "NZ",
            Region::Open => "OPEN",
        };

        write!(f, "{name}")
    }
}
