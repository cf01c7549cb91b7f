use crate::{codec::OddLength, config::ConfigError, gen2::SelectError};

#[derive(Clone, Debug, PartialEq)]
pub enum ReaderError<CON> {
    /// The request could not be expressed as a valid read plan.
    InvalidArgument(SelectError),
    /// The configuration cannot be applied to a reader.
    InvalidConfig(ConfigError),
    /// Opening the connection failed.
    Connect(CON),
    /// The reader rejected a configuration parameter.
    Parameter {
        path: &'static str,
        error: CON,
    },
    /// Installing a read plan or reading tags failed.
    Communication(CON),
    /// The tag was not seen with data in any of the attempts.
    TagNotFound {
        epc: String,
        attempts: usize,
    },
    /// The tag returned a payload that is not a whole number of registers.
    MalformedData(OddLength),
}

impl<CON> From<CON> for ReaderError<CON> {
    fn from(value: CON) -> Self {
        Self::Communication(value)
    }
}

impl<CON> ReaderError<CON> {
    pub fn map<CON2, F>(self, f: F) -> ReaderError<CON2>
    where
        F: FnOnce(CON) -> CON2,
    {
        match self {
            ReaderError::InvalidArgument(e) => ReaderError::InvalidArgument(e),
            ReaderError::InvalidConfig(e) => ReaderError::InvalidConfig(e),
            ReaderError::Connect(e) => ReaderError::Connect(f(e)),
            ReaderError::Parameter { path, error } => ReaderError::Parameter {
                path,
                error: f(error),
            },
            ReaderError::Communication(e) => ReaderError::Communication(f(e)),
            ReaderError::TagNotFound { epc, attempts } => {
                ReaderError::TagNotFound { epc, attempts }
            }
            ReaderError::MalformedData(e) => ReaderError::MalformedData(e),
        }
    }
}

impl<CON: core::fmt::Debug> core::fmt::Display for ReaderError<CON> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReaderError::InvalidArgument(e) => write!(f, "{e}"),
            ReaderError::InvalidConfig(e) => write!(f, "invalid reader configuration: {e}"),
            ReaderError::Connect(e) => write!(f, "could not connect to reader: {e:?}"),
            ReaderError::Parameter { path, error } => {
                write!(f, "could not set {path}: {error:?}")
            }
            ReaderError::Communication(e) => write!(f, "reader communication error: {e:?}"),
            ReaderError::TagNotFound { epc, attempts } => {
                write!(f, "Tag {epc} not found after {attempts} attempts")
            }
            ReaderError::MalformedData(e) => write!(f, "{e}"),
        }
    }
}
