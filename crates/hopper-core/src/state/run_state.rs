/// Execution state machine observed by hosts.
///
/// The only transition into [`RunState::Halted`] is retiring `HLT`; a reset
/// returns to [`RunState::Running`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Ready to execute the instruction at `PC`.
    #[default]
    Running,
    /// `HLT` retired; further steps are no-ops until reset.
    Halted,
}

impl RunState {
    /// Returns `true` for [`RunState::Halted`].
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Halted)
    }
}
