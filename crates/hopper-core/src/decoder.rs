//! Instruction decoder for the Hopper byte code.
//!
//! Decoding is total: every byte value at every offset decodes to some
//! [`Instruction`] and always advances by at least one byte. Operand reads go
//! through the clamped accessors in [`crate::memory`], so an instruction cut
//! off by the end of the buffer decodes with zero-filled operands.

use std::fmt;

use crate::encoding::{encoded_len, Opcode};
use crate::memory::{read_u16_le, read_u8};

/// A decoded instruction with its raw operand values.
///
/// Register operands keep the raw byte from the encoding. Bytes past `7`
/// decode fine and are rejected only when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// `MOV Rn, #imm`: load a 16-bit immediate.
    MoveImmediate {
        /// Destination register operand byte.
        reg: u8,
        /// Immediate value.
        imm: u16,
    },
    /// `MOV Rd, Rs`: copy one register to another.
    MoveRegister {
        /// Destination register operand byte.
        dst: u8,
        /// Source register operand byte.
        src: u8,
    },
    /// `ADD Rd, Rs`: wrapping add, updates the Zero flag.
    AddRegister {
        /// Destination register operand byte.
        dst: u8,
        /// Source register operand byte.
        src: u8,
    },
    /// `JMP addr`: unconditional jump.
    Jump {
        /// Absolute target address.
        target: u16,
    },
    /// `JZ addr`: jump when the Zero flag is set.
    JumpIfZero {
        /// Absolute target address.
        target: u16,
    },
    /// `HLT`: stop execution.
    Halt,
    /// Any unassigned byte, treated as one byte of data.
    Unknown(u8),
}

impl Instruction {
    /// Returns the opcode byte that introduces this instruction.
    #[must_use]
    pub const fn opcode_byte(self) -> u8 {
        match self {
            Self::MoveImmediate { .. } => Opcode::MovRegImm.as_u8(),
            Self::MoveRegister { .. } => Opcode::MovRegReg.as_u8(),
            Self::AddRegister { .. } => Opcode::AddRegReg.as_u8(),
            Self::Jump { .. } => Opcode::Jmp.as_u8(),
            Self::JumpIfZero { .. } => Opcode::Jz.as_u8(),
            Self::Halt => Opcode::Hlt.as_u8(),
            Self::Unknown(byte) => byte,
        }
    }

    /// Returns the recognized opcode, or `None` for [`Instruction::Unknown`].
    #[must_use]
    pub fn opcode(self) -> Option<Opcode> {
        Opcode::from_u8(self.opcode_byte())
    }

    /// Encoded length in bytes, taken from the opcode table.
    #[must_use]
    pub fn encoded_len(self) -> u8 {
        encoded_len(self.opcode_byte())
    }

    /// Re-encodes this instruction into its canonical byte sequence.
    ///
    /// An [`Instruction::Unknown`] carrying an assigned opcode byte encodes to
    /// that single byte, which will not decode back to `Unknown`.
    #[must_use]
    pub fn encode(self) -> Vec<u8> {
        let op = self.opcode_byte();
        match self {
            Self::MoveImmediate { reg, imm } => {
                let [lo, hi] = imm.to_le_bytes();
                vec![op, reg, lo, hi]
            }
            Self::MoveRegister { dst, src } | Self::AddRegister { dst, src } => vec![op, dst, src],
            Self::Jump { target } | Self::JumpIfZero { target } => {
                let [lo, hi] = target.to_le_bytes();
                vec![op, lo, hi]
            }
            Self::Halt | Self::Unknown(_) => vec![op],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveImmediate { reg, imm } => write!(f, "MOV R{reg}, #{imm}"),
            Self::MoveRegister { dst, src } => write!(f, "MOV R{dst}, R{src}"),
            Self::AddRegister { dst, src } => write!(f, "ADD R{dst}, R{src}"),
            Self::Jump { target } => write!(f, "JMP {target:04X}"),
            Self::JumpIfZero { target } => write!(f, "JZ {target:04X}"),
            Self::Halt => f.write_str("HLT"),
            Self::Unknown(byte) => write!(f, "DB 0x{byte:02X}"),
        }
    }
}

/// Decode result: the instruction, where it starts, and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Decoded {
    /// Byte offset of the opcode.
    pub offset: usize,
    /// Encoded length in bytes (always at least 1).
    pub len: u8,
    /// The decoded instruction.
    pub instruction: Instruction,
}

impl Decoded {
    /// Offset of the following instruction, `offset + len`.
    ///
    /// Not clamped to any buffer; callers compare it against their own limit.
    #[must_use]
    pub const fn next_offset(&self) -> usize {
        self.offset.saturating_add(self.len as usize)
    }
}

/// Stateless decoder shared by the disassembler and the interpreter.
pub struct Decoder;

impl Decoder {
    /// Decodes the instruction starting at `offset` in `bytes`.
    ///
    /// Never fails. The opcode and every operand byte are read with clamped
    /// accessors, and 16-bit operands are little-endian.
    #[must_use]
    pub fn decode(bytes: &[u8], offset: usize) -> Decoded {
        let byte = read_u8(bytes, offset);
        let operand = |delta: usize| offset.saturating_add(delta);

        let instruction = match Opcode::from_u8(byte) {
            Some(Opcode::MovRegImm) => Instruction::MoveImmediate {
                reg: read_u8(bytes, operand(1)),
                imm: read_u16_le(bytes, operand(2)),
            },
            Some(Opcode::MovRegReg) => Instruction::MoveRegister {
                dst: read_u8(bytes, operand(1)),
                src: read_u8(bytes, operand(2)),
            },
            Some(Opcode::AddRegReg) => Instruction::AddRegister {
                dst: read_u8(bytes, operand(1)),
                src: read_u8(bytes, operand(2)),
            },
            Some(Opcode::Jmp) => Instruction::Jump {
                target: read_u16_le(bytes, operand(1)),
            },
            Some(Opcode::Jz) => Instruction::JumpIfZero {
                target: read_u16_le(bytes, operand(1)),
            },
            Some(Opcode::Hlt) => Instruction::Halt,
            None => Instruction::Unknown(byte),
        };

        Decoded {
            offset,
            len: encoded_len(byte),
            instruction,
        }
    }

    /// Walks `bytes` from offset 0, yielding each instruction until the next
    /// offset reaches `bytes.len()`.
    pub fn instructions(bytes: &[u8]) -> impl Iterator<Item = Decoded> + '_ {
        let mut offset = 0;
        std::iter::from_fn(move || {
            if offset >= bytes.len() {
                return None;
            }
            let decoded = Self::decode(bytes, offset);
            offset = decoded.next_offset();
            Some(decoded)
        })
    }
}
