//! gen2-rs: Gen2 Select filters and filtered register reads for RFID readers.
//!
//! This library builds Gen2 Select filters (in the [`gen2`] module) and read plans
//! (in [`read_plan`]), and drives them through a reader driver that implements
//! [`connection::ReaderConnection`].

pub mod codec;

mod config;
pub use config::{ConfigError, ReaderConfig};

pub mod connection;

mod error;
pub use error::ReaderError;

pub mod gen2;

pub mod read_plan;
pub use read_plan::ReadPlan;

mod tag;
pub use tag::TagIdentity;

#[macro_use]
mod fmt;
#[cfg(test)]
mod tests;

pub use fmt::{LogItem, LogOutput, Loggable, Logger};

use std::time::Duration;

use connection::{Connect, ReaderConnection, Setting};
use gen2::{MemoryBank, SelectError};
use read_plan::TagOp;

pub struct Reader<CON> {
    inner: CON,
    read_time: Duration,
}

impl<CON> Reader<CON> {
    pub const DEFAULT_ATTEMPTS: usize = 3;

    pub fn release(self) -> CON {
        self.inner
    }
}

impl<CON> From<CON> for Reader<CON>
where
    CON: ReaderConnection,
{
    fn from(value: CON) -> Self {
        Self::new(value)
    }
}

impl<CON> Reader<CON>
where
    CON: Connect,
{
    /// Connect to the reader at `config.uri` and apply `config`.
    pub fn establish(config: &ReaderConfig) -> Result<Self, ReaderError<CON::Error>> {
        log::debug!("Connecting to reader at {}", config.uri);

        let inner = CON::connect(&config.uri).map_err(ReaderError::Connect)?;
        let mut reader = Self::new(inner);
        reader.configure(config)?;
        Ok(reader)
    }
}

impl<CON> Reader<CON>
where
    CON: ReaderConnection,
{
    pub fn inner_mut(&mut self) -> &mut CON {
        &mut self.inner
    }

    /// Wrap an already connected reader, using the default read time.
    pub fn new(inner: CON) -> Self {
        Self {
            inner,
            read_time: ReaderConfig::READ_TIME_PER_ANTENNA,
        }
    }

    pub fn with_read_time(mut self, read_time: Duration) -> Self {
        self.read_time = read_time;
        self
    }

    /// The duration of every read burst.
    pub fn read_time(&self) -> Duration {
        self.read_time
    }

    /// Apply every setting of `config`, in order.
    ///
    /// Nothing is sent to the reader if `config` is invalid.
    pub fn configure(&mut self, config: &ReaderConfig) -> Result<(), ReaderError<CON::Error>> {
        let settings = config.settings().map_err(ReaderError::InvalidConfig)?;

        for setting in settings {
            log::trace!("Setting {}", setting.path());

            self.inner
                .set(&setting)
                .map_err(|error| ReaderError::Parameter {
                    path: setting.path(),
                    error,
                })?;
        }

        self.read_time = config.read_time();
        Ok(())
    }

    /// Read `word_count` registers starting at `word_address` in `bank` of
    /// the tag identified by `tag`, trying at most `attempts` read bursts.
    ///
    /// Installs a read plan that singles out `tag` on the antenna it was
    /// last seen on, replacing whatever plan was active. The first
    /// observation of `tag` that carries data ends the search. Tags that
    /// share `tag`'s EPC cannot be told apart.
    pub fn read_register_block(
        &mut self,
        tag: &TagIdentity,
        bank: MemoryBank,
        word_address: u32,
        word_count: u8,
        attempts: usize,
    ) -> Result<Vec<u16>, ReaderError<CON::Error>> {
        if word_count == 0 {
            return Err(ReaderError::InvalidArgument(SelectError::EmptyRead));
        }

        let operation = TagOp::ReadData {
            bank,
            word_address,
            word_count,
        };

        let plan = ReadPlan::singulate(tag, operation).map_err(ReaderError::InvalidArgument)?;

        if log::log_enabled!(log::Level::Trace) {
            Logger::log(&LogOutput::Log(log::Level::Trace), &plan);
        }

        self.inner.set(&Setting::ReadPlan(plan))?;

        let epc = tag.epc_string().to_string();

        for attempt in 1..=attempts {
            let reads = self.inner.read(self.read_time)?;

            log::trace!(
                "Attempt {attempt}/{attempts}: {} tag reads while looking for {epc}",
                reads.len()
            );

            let found = reads
                .iter()
                .find(|read| tag.matches(read) && !read.data.is_empty());

            if let Some(read) = found {
                log::debug!("Read {} bytes from {epc} on attempt {attempt}", read.data.len());
                return codec::bytes_to_registers(&read.data).map_err(ReaderError::MalformedData);
            }
        }

        log::warn!("Tag {epc} not found after {attempts} attempts");

        Err(ReaderError::TagNotFound { epc, attempts })
    }

    /// [`Reader::read_register_block`] with [`Reader::DEFAULT_ATTEMPTS`] attempts.
    pub fn read_register_block_default(
        &mut self,
        tag: &TagIdentity,
        bank: MemoryBank,
        word_address: u32,
        word_count: u8,
    ) -> Result<Vec<u16>, ReaderError<CON::Error>> {
        self.read_register_block(tag, bank, word_address, word_count, Self::DEFAULT_ATTEMPTS)
    }

    /// Read the single register at `word_address`.
    pub fn read_register(
        &mut self,
        tag: &TagIdentity,
        bank: MemoryBank,
        word_address: u32,
        attempts: usize,
    ) -> Result<u16, ReaderError<CON::Error>> {
        let values = self.read_register_block(tag, bank, word_address, 1, attempts)?;

        match values.first() {
            Some(value) => Ok(*value),
            None => unreachable!("Non-empty register data decoded to zero registers"),
        }
    }

    /// [`Reader::read_register`] with [`Reader::DEFAULT_ATTEMPTS`] attempts.
    pub fn read_register_default(
        &mut self,
        tag: &TagIdentity,
        bank: MemoryBank,
        word_address: u32,
    ) -> Result<u16, ReaderError<CON::Error>> {
        self.read_register(tag, bank, word_address, Self::DEFAULT_ATTEMPTS)
    }
}
