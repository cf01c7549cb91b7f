use crate::connection::{AntennaPort, TagRead};

/// A tag to single out of the population, identified by its EPC and the
/// antenna it was last seen on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagIdentity {
    epc: Vec<u8>,
    epc_string: String,
    antenna: AntennaPort,
}

impl TagIdentity {
    /// Create a new `TagIdentity`, naming the EPC by its upper-case hex form.
    pub fn new(epc: Vec<u8>, antenna: AntennaPort) -> Self {
        Self {
            epc_string: hex::encode_upper(&epc),
            epc,
            antenna,
        }
    }

    pub fn epc(&self) -> &[u8] {
        &self.epc
    }

    pub fn antenna(&self) -> AntennaPort {
        self.antenna
    }

    /// The EPC as compared against [`TagRead::epc_string`].
    pub fn epc_string(&self) -> &str {
        &self.epc_string
    }

    /// Whether `read` is an observation of this tag.
    pub fn matches(&self, read: &TagRead) -> bool {
        read.epc_string == self.epc_string
    }
}

/// Keeps the EPC string exactly as the driver reported it.
impl From<&TagRead> for TagIdentity {
    fn from(value: &TagRead) -> Self {
        Self {
            epc: value.epc.clone(),
            epc_string: value.epc_string.clone(),
            antenna: value.antenna,
        }
    }
}
