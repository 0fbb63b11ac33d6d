//! C64 colour RAM.
//!
//! 1 KiB of 4-bit memory at $D800-$DBFF holding the foreground colour of
//! each character cell. Only the low nibble exists; the upper four data
//! lines float and read back as set bits here.

use retro6502::{Device, Memory};

/// Size of colour RAM in bytes.
pub const COLOR_RAM_SIZE: usize = 1024;

/// Light blue, the power-on text colour.
pub const DEFAULT_COLOR: u8 = 14;

#[derive(Debug)]
pub struct ColorRam {
    data: Memory,
}

impl ColorRam {
    pub fn new() -> Self {
        let mut data = Memory::new(COLOR_RAM_SIZE);
        data.fill(DEFAULT_COLOR);
        Self { data }
    }

    /// Colour (0-15) of a cell.
    #[inline]
    pub fn get(&self, offset: u16) -> u8 {
        self.data.load(offset) & 0x0F
    }

    /// The backing store, as shown to memory viewers.
    pub fn memory(&self) -> &Memory {
        &self.data
    }

    pub fn clear(&mut self, color: u8) {
        self.data.fill(color & 0x0F);
    }
}

impl Default for ColorRam {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for ColorRam {
    fn read(&mut self, offset: u16) -> u8 {
        self.get(offset) | 0xF0
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.data.store(offset, value & 0x0F);
    }

    fn tick(&mut self) {}
}
