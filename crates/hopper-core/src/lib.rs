//! Core of the Hopper byte-code VM: opcode table, decoder, disassembler and
//! interpreter over a flat 64 KiB address space.

/// Flat address space and clamped read accessors.
pub mod memory;
pub use memory::{read_u16_le, read_u8, Memory, ADDRESS_SPACE_BYTES};

/// Machine state model primitives.
pub mod state;
pub use state::{GeneralRegister, MachineState, RunState, GENERAL_REGISTER_COUNT};

/// Error types.
pub mod error;
pub use error::{RegisterIndexError, SessionError};

/// Opcode table shared by every consumer of instruction boundaries.
pub mod encoding;
pub use encoding::{encoded_len, lookup_opcode, Opcode, OpcodeInfo, OPCODE_TABLE};

/// Total instruction decoder.
pub mod decoder;
pub use decoder::{Decoded, Decoder, Instruction};

/// Listing generation.
pub mod disasm;
pub use disasm::{disassemble, disassemble_at, disassemble_rows, DisassemblyRow};

/// Run configuration and outcome types.
pub mod api;
pub use api::{RunConfig, RunOutcome, StepOutcome, StopReason};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{execute_instruction, run, step};

/// Session facade owning image, memory and machine state.
pub mod session;
pub use session::Session;

#[cfg(test)]
use proptest as _;
