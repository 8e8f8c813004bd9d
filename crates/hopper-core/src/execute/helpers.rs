use crate::state::GeneralRegister;

/// Resolves a `dst, src` operand pair; `None` if either byte is past `R7`.
pub(super) fn register_pair(dst: u8, src: u8) -> Option<(GeneralRegister, GeneralRegister)> {
    let dst = GeneralRegister::try_from(dst).ok()?;
    let src = GeneralRegister::try_from(src).ok()?;
    Some((dst, src))
}

/// Masks a continuation address into the 16-bit `PC`.
#[allow(clippy::cast_possible_truncation)]
pub(super) const fn wrap_pc(addr: usize) -> u16 {
    (addr & 0xFFFF) as u16
}
