use crate::{log_vec, Loggable};

use super::MemoryBank;

/// The flag a Select command modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectTarget {
    InventoriedS0,
    InventoriedS1,
    InventoriedS2,
    InventoriedS3,
    /// The SL flag.
    Select,
}

impl SelectTarget {
    /// Indexed by the small integer code accepted by [`build_select`].
    pub const TABLE: [SelectTarget; 5] = [
        SelectTarget::InventoriedS0,
        SelectTarget::InventoriedS1,
        SelectTarget::InventoriedS2,
        SelectTarget::InventoriedS3,
        SelectTarget::Select,
    ];

    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::TABLE.get(idx))
            .copied()
    }

    /// The 3-bit Target field of the Select command.
    pub fn value(&self) -> u8 {
        match self {
            SelectTarget::InventoriedS0 => 0b000,
            SelectTarget::InventoriedS1 => 0b001,
            SelectTarget::InventoriedS2 => 0b010,
            SelectTarget::InventoriedS3 => 0b011,
            SelectTarget::Select => 0b100,
        }
    }
}

/// What a Select command does to matching and non-matching tags.
///
/// Variant names read `<matching>N<non-matching>`. `On` asserts the flag
/// (SL, or inventoried -> A) and `Off` deasserts it (¬SL, or inventoried -> B).
/// `Neg` toggles it, `Nop` leaves it alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectAction {
    OnNOff,
    OnNNop,
    NopNOff,
    NegNNop,
    OffNOn,
    OffNNop,
    NopNOn,
    NopNNeg,
}

impl SelectAction {
    /// Indexed by the small integer code accepted by [`build_select`].
    pub const TABLE: [SelectAction; 8] = [
        SelectAction::OnNOff,
        SelectAction::OnNNop,
        SelectAction::NopNOff,
        SelectAction::NegNNop,
        SelectAction::OffNOn,
        SelectAction::OffNNop,
        SelectAction::NopNOn,
        SelectAction::NopNNeg,
    ];

    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::TABLE.get(idx))
            .copied()
    }

    /// The 3-bit Action field of the Select command.
    pub fn value(&self) -> u8 {
        match self {
            SelectAction::OnNOff => 0b000,
            SelectAction::OnNNop => 0b001,
            SelectAction::NopNOff => 0b010,
            SelectAction::NegNNop => 0b011,
            SelectAction::OffNOn => 0b100,
            SelectAction::OffNNop => 0b101,
            SelectAction::NopNOn => 0b110,
            SelectAction::NopNNeg => 0b111,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectError {
    InvalidTarget(i32),
    InvalidAction(i32),
    /// The mask does not cover `bit_length` bits.
    MaskTooShort {
        bit_length: u16,
        mask_len: usize,
    },
    /// A mask of this many bytes cannot be addressed by a 16-bit length.
    MaskTooLong(usize),
    /// A read operation must cover at least one word.
    EmptyRead,
}

impl core::fmt::Display for SelectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SelectError::InvalidTarget(_) => write!(f, "invalid target value"),
            SelectError::InvalidAction(_) => write!(f, "invalid action value"),
            SelectError::MaskTooShort {
                bit_length,
                mask_len,
            } => write!(
                f,
                "mask of {mask_len} bytes is too short for {bit_length} bits"
            ),
            SelectError::MaskTooLong(len) => write!(f, "mask of {len} bytes is too long"),
            SelectError::EmptyRead => write!(f, "read of zero words"),
        }
    }
}

/// A Gen2 Select filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Select {
    invert: bool,
    bank: MemoryBank,
    bit_pointer: u32,
    bit_length: u16,
    mask: Vec<u8>,
    target: SelectTarget,
    action: SelectAction,
}

impl Select {
    /// Create a new `Select`.
    ///
    /// Fails if `mask` holds fewer than `ceil(bit_length / 8)` bytes.
    pub fn new(
        invert: bool,
        bank: MemoryBank,
        bit_pointer: u32,
        bit_length: u16,
        mask: Vec<u8>,
        target: SelectTarget,
        action: SelectAction,
    ) -> Result<Self, SelectError> {
        let required = (bit_length as usize + 7) / 8;
        if mask.len() < required {
            return Err(SelectError::MaskTooShort {
                bit_length,
                mask_len: mask.len(),
            });
        }

        Ok(Self {
            invert,
            bank,
            bit_pointer,
            bit_length,
            mask,
            target,
            action,
        })
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    pub fn bank(&self) -> MemoryBank {
        self.bank
    }

    pub fn bit_pointer(&self) -> u32 {
        self.bit_pointer
    }

    pub fn bit_length(&self) -> u16 {
        self.bit_length
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    pub fn target(&self) -> SelectTarget {
        self.target
    }

    pub fn action(&self) -> SelectAction {
        self.action
    }
}

/// Build a non-inverted Select from integer target and action codes.
///
/// `target` indexes [`SelectTarget::TABLE`] and `action` indexes
/// [`SelectAction::TABLE`].
pub fn build_select(
    target: i32,
    action: i32,
    bank: MemoryBank,
    bit_pointer: u32,
    bit_length: u16,
    mask: Vec<u8>,
) -> Result<Select, SelectError> {
    let target = SelectTarget::from_code(target).ok_or(SelectError::InvalidTarget(target))?;
    let action = SelectAction::from_code(action).ok_or(SelectError::InvalidAction(action))?;

    Select::new(false, bank, bit_pointer, bit_length, mask, target, action)
}

impl Loggable for Select {
    fn as_log(&self) -> Vec<crate::fmt::LogItem> {
        log_vec![
            (0, "Gen2 Select"),
            (1, "Target", format!("{:?}", self.target)),
            (1, "Action", format!("{:?}", self.action)),
            (1, "Bank", self.bank),
            (1, "Bit pointer", format!("0x{:X}", self.bit_pointer)),
            (1, "Bit length", self.bit_length),
            (1, "Mask", hex::encode_upper(&self.mask)),
            (1, "Inverted", self.invert),
        ]
    }
}
