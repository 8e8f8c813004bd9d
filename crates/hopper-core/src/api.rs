//! Host-facing run configuration and outcome types.

use crate::decoder::Decoded;
use crate::memory::ADDRESS_SPACE_BYTES;

/// Bounds applied to a [`run`](crate::run) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RunConfig {
    /// Execution stops once `PC` is at or past this offset.
    ///
    /// `None` means the whole address space. Larger values are clamped to it.
    pub execution_limit: Option<usize>,
    /// Maximum number of instructions to execute; `None` is unbounded.
    pub max_steps: Option<usize>,
}

impl RunConfig {
    /// No execution limit beyond the address space and no step budget.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            execution_limit: None,
            max_steps: None,
        }
    }

    /// Limits execution to the bytes of a loaded image.
    #[must_use]
    pub const fn for_image(image_len: usize) -> Self {
        Self::unbounded().with_execution_limit(image_len)
    }

    /// Sets the execution limit in bytes.
    #[must_use]
    pub const fn with_execution_limit(mut self, limit: usize) -> Self {
        self.execution_limit = Some(limit);
        self
    }

    /// Sets the step budget.
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Execution limit after clamping to the address space.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.execution_limit
            .map_or(ADDRESS_SPACE_BYTES, |limit| limit.min(ADDRESS_SPACE_BYTES))
    }
}

/// Result of one [`step`](crate::step) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// One instruction retired.
    Retired {
        /// The instruction that ran and where it was found.
        instruction: Decoded,
        /// Continuation address before masking into the 16-bit `PC`.
        next_pc: usize,
    },
    /// The machine was already halted; nothing ran.
    Idle,
}

/// Why a [`run`](crate::run) call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StopReason {
    /// `HLT` retired, or the machine was halted on entry.
    Halted,
    /// `PC` reached or passed the execution limit.
    OutOfBounds {
        /// The offending continuation address.
        pc: usize,
    },
    /// The step budget was used up.
    StepLimit,
}

/// Aggregated outcome of a [`run`](crate::run) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RunOutcome {
    /// Number of instructions executed during this call.
    pub steps: usize,
    /// The condition that ended the run.
    pub stop: StopReason,
}

#[cfg(test)]
mod tests {
    use super::RunConfig;
    use crate::memory::ADDRESS_SPACE_BYTES;

    #[test]
    fn default_config_is_unbounded() {
        let config = RunConfig::default();
        assert_eq!(config, RunConfig::unbounded());
        assert_eq!(config.effective_limit(), ADDRESS_SPACE_BYTES);
        assert!(config.max_steps.is_none());
    }

    #[test]
    fn oversized_limit_clamps_to_address_space() {
        let config = RunConfig::unbounded().with_execution_limit(usize::MAX);
        assert_eq!(config.effective_limit(), ADDRESS_SPACE_BYTES);
    }

    #[test]
    fn image_config_limits_to_image_length() {
        let config = RunConfig::for_image(12).with_max_steps(3);
        assert_eq!(config.effective_limit(), 12);
        assert_eq!(config.max_steps, Some(3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn outcome_types_are_serializable() {
        fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}

        assert_serde::<RunConfig>();
        assert_serde::<super::StepOutcome>();
        assert_serde::<super::StopReason>();
        assert_serde::<super::RunOutcome>();
    }
}
