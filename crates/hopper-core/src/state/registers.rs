use std::fmt;

use crate::error::RegisterIndexError;

/// Number of general-purpose registers (`R0..R7`).
pub const GENERAL_REGISTER_COUNT: usize = 8;

/// General-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum GeneralRegister {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl GeneralRegister {
    /// Ordered list of all general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    /// Returns the array index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps a raw operand byte onto a register, `None` past `R7`.
    #[must_use]
    pub const fn from_operand(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            4 => Some(Self::R4),
            5 => Some(Self::R5),
            6 => Some(Self::R6),
            7 => Some(Self::R7),
            _ => None,
        }
    }
}

impl TryFrom<u8> for GeneralRegister {
    type Error = RegisterIndexError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_operand(byte).ok_or(RegisterIndexError(byte))
    }
}

impl fmt::Display for GeneralRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.index())
    }
}

/// Register file, program counter and status bits of the machine.
///
/// Only the interpreter mutates a running machine; hosts read it through the
/// accessors and the [`dump`](Self::dump) line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineState {
    gpr: [u16; GENERAL_REGISTER_COUNT],
    pc: u16,
    zero: bool,
    halted: bool,
}

impl MachineState {
    /// Creates a reset machine: registers and `PC` zero, flags clear.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gpr: [0; GENERAL_REGISTER_COUNT],
            pc: 0,
            zero: false,
            halted: false,
        }
    }

    /// Returns every field to its power-on value.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Reads a general-purpose register.
    #[must_use]
    pub const fn gpr(&self, reg: GeneralRegister) -> u16 {
        self.gpr[reg.index()]
    }

    /// Writes a general-purpose register.
    pub const fn set_gpr(&mut self, reg: GeneralRegister, value: u16) {
        self.gpr[reg.index()] = value;
    }

    /// Returns the whole register file in `R0..R7` order.
    #[must_use]
    pub const fn registers(&self) -> &[u16; GENERAL_REGISTER_COUNT] {
        &self.gpr
    }

    /// Reads the `PC` register.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the `PC` register.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Reads the Zero flag.
    #[must_use]
    pub const fn zero(&self) -> bool {
        self.zero
    }

    /// Writes the Zero flag.
    pub const fn set_zero(&mut self, zero: bool) {
        self.zero = zero;
    }

    /// Returns `true` once `HLT` has retired.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Latches the halted bit.
    pub const fn halt(&mut self) {
        self.halted = true;
    }

    /// Current position in the Running/Halted state machine.
    #[must_use]
    pub const fn run_state(&self) -> super::RunState {
        if self.halted {
            super::RunState::Halted
        } else {
            super::RunState::Running
        }
    }

    /// Renders the one-line register dump read by stepping consoles.
    ///
    /// `PC=XXXX R0=XXXX .. R7=XXXX Z=0|1 HALT=True|False`
    #[must_use]
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC={:04X}", self.pc)?;
        for (index, value) in self.gpr.iter().enumerate() {
            write!(f, " R{index}={value:04X}")?;
        }
        let halted = if self.halted { "True" } else { "False" };
        write!(f, " Z={} HALT={halted}", u8::from(self.zero))
    }
}
