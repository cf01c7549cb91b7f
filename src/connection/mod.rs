use std::{num::NonZeroU8, time::Duration};

mod uri;
pub use uri::{ReaderUri, UriError};

use crate::{
    gen2::{InitQ, InventoryTarget, LinkFrequency, Region, Session, TagEncoding, Tari, Q},
    log_vec, Loggable, ReadPlan,
};

/// A physical antenna port on the reader. Ports are numbered from 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AntennaPort(NonZeroU8);

impl AntennaPort {
    /// Create a new `AntennaPort`.
    ///
    /// This function returns `None` if `value == 0`.
    pub fn new(value: u8) -> Option<Self> {
        NonZeroU8::new(value).map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0.get()
    }
}

impl core::fmt::Display for AntennaPort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Antenna {}", self.0)
    }
}

/// A single tag observation returned by the reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagRead {
    pub epc: Vec<u8>,
    /// The EPC as the driver reports it, used for identity comparisons.
    pub epc_string: String,
    pub antenna: AntennaPort,
    /// Memory contents returned by the read plan's operation, if any.
    pub data: Vec<u8>,
}

impl TagRead {
    pub fn new(epc: Vec<u8>, antenna: AntennaPort, data: Vec<u8>) -> Self {
        Self {
            epc_string: hex::encode_upper(&epc),
            epc,
            antenna,
            data,
        }
    }
}

impl Loggable for TagRead {
    fn as_log(&self) -> Vec<crate::fmt::LogItem> {
        let mut log = log_vec![
            (0, "Tag read"),
            (1, "EPC", &self.epc_string),
            (1, "Antenna", self.antenna.value()),
        ];

        if !self.data.is_empty() {
            log.push((1, "Data", hex::encode_upper(&self.data)).into());
        }

        log
    }
}

/// A reader parameter together with the value to set it to.
#[derive(Clone, Debug, PartialEq)]
pub enum Setting {
    /// Read power in centi-dBm.
    ReadPower(i32),
    /// Write power in centi-dBm.
    WritePower(i32),
    Region(Region),
    LinkFrequency(LinkFrequency),
    TagEncoding(TagEncoding),
    Session(Session),
    Target(InventoryTarget),
    Tari(Tari),
    /// Whether the reader issues Select commands ahead of each inventory round.
    SendSelect(bool),
    Q(Q),
    InitQ(InitQ),
    CommandTimeout(Duration),
    ReadPlan(ReadPlan),
}

impl Setting {
    /// The driver's name for this parameter.
    pub fn path(&self) -> &'static str {
        match self {
            Setting::ReadPower(_) => "/reader/radio/readPower",
            Setting::WritePower(_) => "/reader/radio/writePower",
            Setting::Region(_) => "/reader/region/id",
            Setting::LinkFrequency(_) => "/reader/gen2/BLF",
            Setting::TagEncoding(_) => "/reader/gen2/tagEncoding",
            Setting::Session(_) => "/reader/gen2/session",
            Setting::Target(_) => "/reader/gen2/target",
            Setting::Tari(_) => "/reader/gen2/tari",
            Setting::SendSelect(_) => "/reader/gen2/sendSelect",
            Setting::Q(_) => "/reader/gen2/q",
            Setting::InitQ(_) => "/reader/gen2/initQ",
            Setting::CommandTimeout(_) => "/reader/commandTimeout",
            Setting::ReadPlan(_) => "/reader/read/plan",
        }
    }
}

/// The reader driver this crate runs on top of.
///
/// Every call is a blocking round trip to the reader.
pub trait ReaderConnection {
    type Error: core::fmt::Debug;

    /// Apply `setting`. A [`Setting::ReadPlan`] replaces the active plan.
    fn set(&mut self, setting: &Setting) -> Result<(), Self::Error>;

    /// Run the active read plan for up to `duration` and return what was seen.
    fn read(&mut self, duration: Duration) -> Result<Vec<TagRead>, Self::Error>;
}

/// A [`ReaderConnection`] that can be opened from a [`ReaderUri`].
pub trait Connect: ReaderConnection + Sized {
    fn connect(uri: &ReaderUri) -> Result<Self, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antenna_zero_rejected() {
        assert_eq!(AntennaPort::new(0), None);
        assert_eq!(AntennaPort::new(2).map(|a| a.value()), Some(2));
    }

    #[test]
    fn tag_read_epc_string() {
        let read = TagRead::new(
            vec![0xE2, 0x00, 0x68, 0x0a],
            AntennaPort::new(1).unwrap(),
            Vec::new(),
        );

        assert_eq!(read.epc_string, "E200680A");
    }

    #[test]
    fn setting_paths() {
        assert_eq!(Setting::ReadPower(2000).path(), "/reader/radio/readPower");
        assert_eq!(Setting::SendSelect(true).path(), "/reader/gen2/sendSelect");
        assert_eq!(
            Setting::CommandTimeout(Duration::from_millis(100)).path(),
            "/reader/commandTimeout"
        );
    }
}
