/// Recognized opcode bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Opcode {
    /// `MOV Rn, #imm16`
    MovRegImm = 0x01,
    /// `MOV Rd, Rs`
    MovRegReg = 0x02,
    /// `ADD Rd, Rs`
    AddRegReg = 0x03,
    /// `JMP addr16`
    Jmp = 0x10,
    /// `JZ addr16`
    Jz = 0x11,
    /// `HLT`
    Hlt = 0xFF,
}

/// Static description of one opcode's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpcodeInfo {
    /// Opcode byte value.
    pub byte: u8,
    /// Decoded opcode.
    pub opcode: Opcode,
    /// Canonical table mnemonic (e.g. `MOV_REG_IMM`).
    pub name: &'static str,
    /// Encoded length in bytes, including the opcode byte.
    pub len: u8,
}

/// Byte length consumed by any byte that is not in [`OPCODE_TABLE`].
pub const UNKNOWN_OPCODE_LEN: u8 = 1;

/// Single source-of-truth opcode/length table.
///
/// The decoder, and through it both the disassembler and the interpreter,
/// derive instruction boundaries only from this table.
pub const OPCODE_TABLE: &[OpcodeInfo] = &[
    OpcodeInfo {
        byte: 0x01,
        opcode: Opcode::MovRegImm,
        name: "MOV_REG_IMM",
        len: 4,
    },
    OpcodeInfo {
        byte: 0x02,
        opcode: Opcode::MovRegReg,
        name: "MOV_REG_REG",
        len: 3,
    },
    OpcodeInfo {
        byte: 0x03,
        opcode: Opcode::AddRegReg,
        name: "ADD_REG_REG",
        len: 3,
    },
    OpcodeInfo {
        byte: 0x10,
        opcode: Opcode::Jmp,
        name: "JMP",
        len: 3,
    },
    OpcodeInfo {
        byte: 0x11,
        opcode: Opcode::Jz,
        name: "JZ",
        len: 3,
    },
    OpcodeInfo {
        byte: 0xFF,
        opcode: Opcode::Hlt,
        name: "HLT",
        len: 1,
    },
];

/// Looks up the table entry for an opcode byte.
///
/// `None` means the byte is treated as a one-byte data value.
#[must_use]
pub fn lookup_opcode(byte: u8) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE.iter().find(|entry| entry.byte == byte)
}

/// Total encoded length of the instruction introduced by `byte`.
#[must_use]
pub fn encoded_len(byte: u8) -> u8 {
    lookup_opcode(byte).map_or(UNKNOWN_OPCODE_LEN, |entry| entry.len)
}

impl Opcode {
    /// Converts an opcode byte into a recognized opcode.
    #[must_use]
    pub fn from_u8(byte: u8) -> Option<Self> {
        lookup_opcode(byte).map(|entry| entry.opcode)
    }

    /// Returns the opcode byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns this opcode's table entry.
    #[must_use]
    pub const fn info(self) -> &'static OpcodeInfo {
        let row = match self {
            Self::MovRegImm => 0,
            Self::MovRegReg => 1,
            Self::AddRegReg => 2,
            Self::Jmp => 3,
            Self::Jz => 4,
            Self::Hlt => 5,
        };
        &OPCODE_TABLE[row]
    }

    /// Total encoded length in bytes.
    #[must_use]
    pub const fn encoded_len(self) -> u8 {
        self.info().len
    }
}
