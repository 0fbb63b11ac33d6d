//! Processor status register bits.
//!
//! The status register is stored as a packed byte (`NV1BDIZC`) rather than as
//! individual booleans so that PHP/PLP/RTI and interrupt entry can move it
//! to and from the stack unchanged.

/// Carry
pub const C: u8 = 0x01;
/// Zero
pub const Z: u8 = 0x02;
/// IRQ disable
pub const I: u8 = 0x04;
/// Decimal mode
pub const D: u8 = 0x08;
/// Break. Only exists on the stack copy pushed by BRK/PHP.
pub const B: u8 = 0x10;
/// Unused bit 5, reads back as 1 whenever the register is pushed.
pub const U: u8 = 0x20;
/// Overflow
pub const V: u8 = 0x40;
/// Negative
pub const N: u8 = 0x80;

/// Returns `p` with the Zero and Negative bits recomputed from `value`.
///
/// Every other bit of `p` is passed through untouched.
///
/// ```
/// use retro6502::status::{self, N, Z};
///
/// assert_eq!(status::with_nz(0x00, 0x00), Z);
/// assert_eq!(status::with_nz(Z, 0x80), N);
/// ```
#[inline]
pub fn with_nz(p: u8, value: u8) -> u8 {
    let mut p = p & !(Z | N);
    if value == 0 {
        p |= Z;
    }
    p | (value & N)
}

/// Renders the register as `NV-BDIZC`, upper case for set bits.
pub fn describe(p: u8) -> String {
    const NAMES: [(u8, char); 8] = [
        (N, 'N'),
        (V, 'V'),
        (U, '-'),
        (B, 'B'),
        (D, 'D'),
        (I, 'I'),
        (Z, 'Z'),
        (C, 'C'),
    ];
    NAMES
        .iter()
        .map(|&(bit, name)| {
            if p & bit != 0 {
                name
            } else {
                name.to_ascii_lowercase()
            }
        })
        .collect()
}
