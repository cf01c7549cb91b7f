//! Conversion between tag memory bytes and 16-bit Gen2 registers.
//!
//! Gen2 memory is word-addressed and the words are transferred most significant
//! byte first, so every register occupies exactly two consecutive bytes.

/// A byte sequence with an odd length was handed to [`bytes_to_registers`].
///
/// The contained value is the length of the rejected input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OddLength(pub usize);

impl core::fmt::Display for OddLength {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "odd register data length ({} bytes)", self.0)
    }
}

/// Decode big-endian byte pairs into register values.
///
/// Returns [`OddLength`] instead of dropping a trailing byte.
pub fn bytes_to_registers(bytes: &[u8]) -> Result<Vec<u16>, OddLength> {
    if bytes.len() % 2 != 0 {
        return Err(OddLength(bytes.len()));
    }

    let registers = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    Ok(registers)
}

/// Encode register values as big-endian byte pairs.
pub fn registers_to_bytes(registers: &[u16]) -> Vec<u8> {
    registers.iter().flat_map(|r| r.to_be_bytes()).collect()
}
