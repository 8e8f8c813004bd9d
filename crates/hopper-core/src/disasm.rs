//! Linear disassembly of a raw byte image.
//!
//! Rows are produced by walking the image with [`Decoder`], so the listing
//! always agrees with the interpreter on instruction boundaries.

use std::fmt;

use crate::decoder::{Decoded, Decoder, Instruction};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single disassembled instruction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisassemblyRow {
    /// Byte offset of the instruction.
    pub offset: usize,
    /// Encoded length in bytes.
    pub len: u8,
    /// Raw opcode byte.
    pub opcode: u8,
    /// Decoded instruction.
    pub instruction: Instruction,
}

impl From<Decoded> for DisassemblyRow {
    fn from(decoded: Decoded) -> Self {
        Self {
            offset: decoded.offset,
            len: decoded.len,
            opcode: decoded.instruction.opcode_byte(),
            instruction: decoded.instruction,
        }
    }
}

impl fmt::Display for DisassemblyRow {
    /// Renders `OOOO: <asm>    ; [OP]`, omitting the comment for `DB` rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}: {}", self.offset, self.instruction)?;
        if !matches!(self.instruction, Instruction::Unknown(_)) {
            write!(f, "    ; [{:02X}]", self.opcode)?;
        }
        Ok(())
    }
}

/// Disassembles every instruction in `bytes`, in increasing offset order.
///
/// The rows cover `0..bytes.len()` with no gaps or overlaps; the final
/// instruction may extend past the end, with its missing operands read as 0.
#[must_use]
pub fn disassemble_rows(bytes: &[u8]) -> Vec<DisassemblyRow> {
    Decoder::instructions(bytes)
        .map(DisassemblyRow::from)
        .collect()
}

/// Disassembles `bytes` into listing lines ready to print or write out.
#[must_use]
pub fn disassemble(bytes: &[u8]) -> Vec<String> {
    disassemble_rows(bytes)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Disassembles the single instruction starting at `offset`.
#[must_use]
pub fn disassemble_at(bytes: &[u8], offset: usize) -> DisassemblyRow {
    Decoder::decode(bytes, offset).into()
}
