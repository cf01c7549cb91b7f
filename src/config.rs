use std::time::Duration;

use crate::{
    connection::{AntennaPort, ReaderUri, Setting},
    gen2::{InitQ, InventoryTarget, LinkFrequency, Region, Session, TagEncoding, Tari, Q},
    log_vec, Loggable,
};

/// A [`ReaderConfig`] that cannot be applied to a reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Every read burst would last zero time.
    NoAntennas,
    /// A static Q above [`Q::MAX`].
    QOutOfRange(u8),
    /// An initial Q above [`Q::MAX`].
    InitQOutOfRange(u8),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NoAntennas => write!(f, "no antennas configured"),
            ConfigError::QOutOfRange(q) => write!(f, "static Q {q} is above {}", Q::MAX),
            ConfigError::InitQOutOfRange(q) => write!(f, "initial Q {q} is above {}", Q::MAX),
        }
    }
}

/// How to reach a reader and how to set up its radio.
///
/// The defaults suit a single-antenna serial reader and small tag
/// populations.
#[derive(Clone, Debug, PartialEq)]
pub struct ReaderConfig {
    pub uri: ReaderUri,
    /// Transmit power while reading, in dBm.
    pub read_power_dbm: i32,
    /// Transmit power while writing, in dBm. `None` keeps the reader's value.
    pub write_power_dbm: Option<i32>,
    pub antennas: Vec<AntennaPort>,
    /// `None` keeps the region the reader is already set to.
    pub region: Option<Region>,
    /// S0 for small populations, S1 for larger ones.
    pub session: Session,
    pub link_frequency: LinkFrequency,
    pub tag_encoding: TagEncoding,
    pub target: InventoryTarget,
    pub tari: Tari,
    pub send_select: bool,
    pub q: Q,
    pub init_q: InitQ,
    pub command_timeout: Option<Duration>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            uri: ReaderUri::Serial {
                path: "COM19".into(),
            },
            read_power_dbm: 20,
            write_power_dbm: None,
            antennas: AntennaPort::new(1).into_iter().collect(),
            region: Some(Region::Na),
            session: Session::S0,
            link_frequency: LinkFrequency::Link250Khz,
            tag_encoding: TagEncoding::M4,
            target: InventoryTarget::A,
            tari: Tari::Tari25Us,
            send_select: true,
            q: Q::Dynamic,
            init_q: InitQ::default(),
            command_timeout: None,
        }
    }
}

impl ReaderConfig {
    /// Time spent reading per antenna in each read burst.
    pub const READ_TIME_PER_ANTENNA: Duration = Duration::from_millis(75);

    pub fn new(uri: ReaderUri) -> Self {
        Self {
            uri,
            ..Default::default()
        }
    }

    /// The duration of a single read burst. Zero if `antennas` is empty.
    pub fn read_time(&self) -> Duration {
        Self::READ_TIME_PER_ANTENNA * self.antennas.len() as u32
    }

    /// Check the values the type system does not constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.antennas.is_empty() {
            return Err(ConfigError::NoAntennas);
        }

        if let Q::Static(q) = self.q {
            if q > Q::MAX {
                return Err(ConfigError::QOutOfRange(q));
            }
        }

        match self.init_q.initial {
            Some(q) if q > Q::MAX => Err(ConfigError::InitQOutOfRange(q)),
            _ => Ok(()),
        }
    }

    /// The settings to apply to a freshly connected reader, in order.
    ///
    /// Powers are sent in centi-dBm, saturating at the limits of `i32`.
    pub fn settings(&self) -> Result<Vec<Setting>, ConfigError> {
        self.validate()?;

        let mut settings = vec![Setting::ReadPower(self.read_power_dbm.saturating_mul(100))];

        if let Some(write_power) = self.write_power_dbm {
            settings.push(Setting::WritePower(write_power.saturating_mul(100)));
        }

        if let Some(region) = self.region {
            settings.push(Setting::Region(region));
        }

        settings.extend([
            Setting::LinkFrequency(self.link_frequency),
            Setting::TagEncoding(self.tag_encoding),
            Setting::Session(self.session),
            Setting::Target(self.target),
            Setting::Tari(self.tari),
            Setting::SendSelect(self.send_select),
            Setting::Q(self.q),
            Setting::InitQ(self.init_q),
        ]);

        if let Some(timeout) = self.command_timeout {
            settings.push(Setting::CommandTimeout(timeout));
        }

        Ok(settings)
    }
}

impl Loggable for ReaderConfig {
    fn as_log(&self) -> Vec<crate::fmt::LogItem> {
        let antennas: Vec<_> = self.antennas.iter().map(|a| a.value()).collect();
        let region = self
            .region
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unchanged".into());

        log_vec![
            (0, "Reader configuration"),
            (1, "URI", &self.uri),
            (1, "Read power", format!("{} dBm", self.read_power_dbm)),
            (1, "Antennas", format!("{:?}", antennas)),
            (1, "Region", region),
            (1, "Session", format!("{:?}", self.session)),
            (1, "BLF", format!("{} kHz", self.link_frequency.value())),
            (1, "Encoding", format!("{:?}", self.tag_encoding)),
            (1, "Target", format!("{:?}", self.target)),
            (1, "Tari", format!("{} ns", self.tari.nanos())),
            (1, "Send select", self.send_select),
            (1, "Q", format!("{:?}", self.q)),
            (1, "Read time", format!("{} ms", self.read_time().as_millis())),
        ]
    }
}
