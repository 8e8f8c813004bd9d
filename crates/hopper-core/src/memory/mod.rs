//! Flat 64 KiB address space and image loading.

/// Bounds-clamped byte and little-endian word readers.
pub mod access;

pub use access::{read_u16_le, read_u8};

use log::debug;

/// Size in bytes of the flat address space (64 KiB).
pub const ADDRESS_SPACE_BYTES: usize = u16::MAX as usize + 1;

/// Fixed-capacity memory holding a loaded program image at address 0.
///
/// The backing store is allocated once and never resized. Reads outside the
/// store go through [`read_u8`] and [`read_u16_le`], which clamp to zero.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Allocates a zeroed 64 KiB address space.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; ADDRESS_SPACE_BYTES].into_boxed_slice(),
        }
    }

    /// Builds memory from a raw image, truncating anything past 64 KiB.
    #[must_use]
    pub fn from_image(image: &[u8]) -> Self {
        let mut memory = Self::new();
        memory.load(image);
        memory
    }

    /// Clears the address space and copies `image` to address 0.
    ///
    /// Returns the number of bytes placed in memory; bytes beyond the end of
    /// the address space are dropped.
    pub fn load(&mut self, image: &[u8]) -> usize {
        self.bytes.fill(0);
        let loaded = image.len().min(ADDRESS_SPACE_BYTES);
        self.bytes[..loaded].copy_from_slice(&image[..loaded]);

        if loaded < image.len() {
            debug!(
                "image truncated to {loaded} bytes ({} dropped)",
                image.len() - loaded
            );
        } else {
            debug!("loaded {loaded} byte image");
        }

        loaded
    }

    /// Reads one byte; out-of-range addresses read as zero.
    #[must_use]
    pub fn read_u8(&self, addr: usize) -> u8 {
        read_u8(&self.bytes, addr)
    }

    /// Reads a little-endian word; out-of-range halves read as zero.
    #[must_use]
    pub fn read_u16_le(&self, addr: usize) -> u16 {
        read_u16_le(&self.bytes, addr)
    }

    /// Returns the full backing store.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Capacity of the address space in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; the address space is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Memory {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self
            .bytes
            .iter()
            .rposition(|byte| *byte != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("Memory")
            .field("capacity", &self.bytes.len())
            .field("used", &used)
            .finish()
    }
}
