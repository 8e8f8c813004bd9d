//! Machine state model: register file, program counter and status bits.

/// Register file types and the machine state container.
pub mod registers;
mod run_state;

pub use registers::{GeneralRegister, MachineState, GENERAL_REGISTER_COUNT};
pub use run_state::RunState;
