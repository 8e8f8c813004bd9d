//! Total read accessors shared by the decoder and the interpreter.
//!
//! Neither reader can fail: any address outside the slice reads as zero.

/// Reads the byte at `addr`, or zero when `addr` is out of range.
#[must_use]
pub fn read_u8(bytes: &[u8], addr: usize) -> u8 {
    bytes.get(addr).copied().unwrap_or(0)
}

/// Reads a little-endian word whose low byte is at `addr`.
///
/// Each half is clamped independently, so a word straddling the end of
/// `bytes` keeps its low byte and reads its high byte as zero.
#[must_use]
pub fn read_u16_le(bytes: &[u8], addr: usize) -> u16 {
    let lo = read_u8(bytes, addr);
    let hi = addr.checked_add(1).map_or(0, |next| read_u8(bytes, next));
    u16::from_le_bytes([lo, hi])
}
