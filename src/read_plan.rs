use crate::{
    connection::AntennaPort,
    gen2::{build_select, MemoryBank, Select, SelectError},
    log_vec, Loggable, TagIdentity,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagProtocol {
    Gen2,
}

/// The memory operation performed on every tag that survives the filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagOp {
    ReadData {
        bank: MemoryBank,
        word_address: u32,
        word_count: u8,
    },
}

/// What the reader does when it is asked to read.
///
/// Filters apply in order. Each one narrows the population the previous
/// ones selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadPlan {
    pub antennas: Vec<AntennaPort>,
    pub protocol: TagProtocol,
    pub filters: Vec<Select>,
    pub operation: Option<TagOp>,
    /// The read window the driver allots to this plan.
    pub window_ms: u32,
}

impl ReadPlan {
    /// TID bits 0..16 shared by the tags this plan resets.
    pub const RESET_MASK: [u8; 2] = [0xE2, 0x82];
    /// First bit of the EPC proper, after StoredCRC and StoredPC.
    pub const EPC_POINTER: u32 = 0x20;
    pub const WINDOW_MS: u32 = 1000;

    /// A plan that resets the population on `tag`'s antenna, then selects
    /// only the tags whose EPC equals `tag`'s and runs `operation` on them.
    ///
    /// Other tags sharing the same EPC are selected as well.
    pub fn singulate(tag: &TagIdentity, operation: TagOp) -> Result<Self, SelectError> {
        let reset = build_select(
            4,
            4,
            MemoryBank::Tid,
            0x00,
            16,
            Self::RESET_MASK.to_vec(),
        )?;

        let epc_bits = u16::try_from(tag.epc().len() * 8)
            .map_err(|_| SelectError::MaskTooLong(tag.epc().len()))?;

        let epc = build_select(
            4,
            0,
            MemoryBank::Epc,
            Self::EPC_POINTER,
            epc_bits,
            tag.epc().to_vec(),
        )?;

        Ok(Self {
            antennas: vec![tag.antenna()],
            protocol: TagProtocol::Gen2,
            filters: vec![reset, epc],
            operation: Some(operation),
            window_ms: Self::WINDOW_MS,
        })
    }
}

impl Loggable for ReadPlan {
    fn as_log(&self) -> Vec<crate::fmt::LogItem> {
        let antennas: Vec<_> = self.antennas.iter().map(|a| a.value()).collect();

        let mut log = log_vec![
            (0, "Read plan"),
            (1, "Antennas", format!("{:?}", antennas)),
            (1, "Protocol", format!("{:?}", self.protocol)),
            (1, "Window", format!("{} ms", self.window_ms)),
            (1, "Filters", self.filters.len()),
        ];

        if let Some(TagOp::ReadData {
            bank,
            word_address,
            word_count,
        }) = self.operation
        {
            log.push((1, "Read bank", bank).into());
            log.push((1, "Word address", format!("0x{word_address:X}")).into());
            log.push((1, "Word count", word_count).into());
        }

        log
    }
}
