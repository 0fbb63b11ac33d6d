use std::fmt;

use crate::status;

/// The 6502 register file.
///
/// A plain value: tooling snapshots it with [`crate::Mos6502::registers`] and
/// tests compare snapshots before and after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// Offset into the stack page at `$0100`.
    pub sp: u8,
    pub pc: u16,
    /// Packed status, see [`crate::status`].
    pub p: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFF,
            pc: 0,
            p: status::U | status::I,
        }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} [{}] SP:{:02X} PC:{:04X}",
            self.a,
            self.x,
            self.y,
            self.p,
            status::describe(self.p),
            self.sp,
            self.pc
        )
    }
}
