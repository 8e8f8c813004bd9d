//! Owning session facade used by hosts such as interactive consoles.
//!
//! A session keeps the loaded image, its 64 KiB memory and the machine state
//! together. Executions are bounded by the image length, so running off the
//! end of a program stops instead of sweeping through zeroed memory.

use crate::api::{RunConfig, RunOutcome, StepOutcome};
use crate::disasm::{disassemble, disassemble_at, DisassemblyRow};
use crate::error::SessionError;
use crate::execute::{run, step};
use crate::memory::Memory;
use crate::state::MachineState;

/// A loaded program together with the machine that executes it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    image: Vec<u8>,
    memory: Memory,
    state: MachineState,
}

impl Session {
    /// Creates a session with no image loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with `image` already loaded.
    #[must_use]
    pub fn with_image(image: &[u8]) -> Self {
        let mut session = Self::new();
        session.load(image);
        session
    }

    /// Replaces the loaded image and resets the machine.
    ///
    /// Returns the number of bytes placed in memory.
    pub fn load(&mut self, image: &[u8]) -> usize {
        let loaded = self.memory.load(image);
        self.image = image[..loaded].to_vec();
        self.state.reset();
        loaded
    }

    /// Returns `true` once a non-empty image has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.image.is_empty()
    }

    /// The loaded image bytes.
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// The session's address space.
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The current machine state.
    #[must_use]
    pub const fn state(&self) -> &MachineState {
        &self.state
    }

    /// Disassembles the loaded image.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoImageLoaded`] if nothing has been loaded.
    pub fn disassemble(&self) -> Result<Vec<String>, SessionError> {
        self.require_image()?;
        Ok(disassemble(&self.image))
    }

    /// Disassembles the instruction at the current `PC`.
    #[must_use]
    pub fn current_instruction(&self) -> DisassemblyRow {
        disassemble_at(self.memory.as_bytes(), usize::from(self.state.pc()))
    }

    /// Resets the machine and runs the image from address 0.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoImageLoaded`] if nothing has been loaded.
    pub fn execute(&mut self, max_steps: Option<usize>) -> Result<RunOutcome, SessionError> {
        self.require_image()?;
        self.state.reset();
        Ok(self.run_image(max_steps))
    }

    /// Resets the machine in preparation for single stepping.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoImageLoaded`] if nothing has been loaded.
    pub fn begin_stepping(&mut self) -> Result<(), SessionError> {
        self.require_image()?;
        self.state.reset();
        Ok(())
    }

    /// Executes one instruction at the current `PC`.
    pub fn step(&mut self) -> StepOutcome {
        step(&self.memory, &mut self.state)
    }

    /// Continues running from the current state without resetting it.
    pub fn resume(&mut self, max_steps: Option<usize>) -> RunOutcome {
        self.run_image(max_steps)
    }

    /// Clears registers, flags and `PC`; the image stays loaded.
    pub const fn reset(&mut self) {
        self.state.reset();
    }

    /// One-line register dump of the current state.
    #[must_use]
    pub fn dump(&self) -> String {
        self.state.dump()
    }

    fn run_image(&mut self, max_steps: Option<usize>) -> RunOutcome {
        let config = RunConfig {
            execution_limit: Some(self.image.len()),
            max_steps,
        };
        run(&self.memory, &mut self.state, &config)
    }

    fn require_image(&self) -> Result<(), SessionError> {
        if self.image.is_empty() {
            Err(SessionError::NoImageLoaded)
        } else {
            Ok(())
        }
    }
}
