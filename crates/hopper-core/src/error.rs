use thiserror::Error;

/// A raw register operand byte did not name one of `R0..R7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("register index {0} is outside R0..R7")]
pub struct RegisterIndexError(pub u8);

impl RegisterIndexError {
    /// Returns the rejected operand byte.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Failures reported by the [`Session`](crate::Session) facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SessionError {
    /// Disassembly or execution was requested before any image was loaded.
    #[error("no binary image loaded")]
    NoImageLoaded,
}
