//! Splitting 32-bit floats across register pairs.
//!
//! A float is stored in two consecutive VP registers: the most significant
//! word of its IEEE-754 representation at `addr`, the least significant word at
//! `addr + 1`. Within each word the bytes are big-endian, so the wire carries
//! the float's bytes in big-endian order overall.

/// Split a float into its (MSW, LSW) register words.
pub fn split_f32(value: f32) -> (u16, u16) {
    let [b0, b1, b2, b3] = value.to_le_bytes();
    let msw = u16::from_be_bytes([b3, b2]);
    let lsw = u16::from_be_bytes([b1, b0]);
    (msw, lsw)
}

/// Rebuild a float from its (MSW, LSW) register words.
pub fn join_f32(msw: u16, lsw: u16) -> f32 {
    let [b3, b2] = msw.to_be_bytes();
    let [b1, b0] = lsw.to_be_bytes();
    f32::from_le_bytes([b0, b1, b2, b3])
}

/// Address of the second register of a pair. Wraps at the top of the address space.
pub fn next_address(address: u16) -> u16 {
    address.wrapping_add(1)
}
