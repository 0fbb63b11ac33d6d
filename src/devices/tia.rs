//! TIA stub.
//!
//! Holds the 64 write registers and counts colour clocks so the bus and the
//! machine timing can be exercised. No video or audio is generated. Input
//! ports read as "fire button not pressed".

use crate::devices::Device;

pub const REGISTER_COUNT: usize = 64;

/// Colour clocks per scanline.
pub const CLOCKS_PER_LINE: u64 = 228;

/// Read addresses of the fire buttons for players 0 and 1.
pub const INPT4: u16 = 0x0C;
pub const INPT5: u16 = 0x0D;

#[derive(Debug, Clone)]
pub struct Tia {
    registers: [u8; REGISTER_COUNT],
    color_clocks: u64,
}

impl Tia {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            color_clocks: 0,
        }
    }

    /// Last value written to a write register.
    pub fn register(&self, offset: u16) -> u8 {
        self.registers[offset as usize % REGISTER_COUNT]
    }

    pub fn color_clocks(&self) -> u64 {
        self.color_clocks
    }

    pub fn scanline(&self) -> u64 {
        self.color_clocks / CLOCKS_PER_LINE
    }
}

impl Default for Tia {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Tia {
    fn read(&mut self, offset: u16) -> u8 {
        // Read registers decode only A0-A3
        match offset & 0x0F {
            INPT4 | INPT5 => 0x80,
            _ => 0x00,
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.registers[offset as usize % REGISTER_COUNT] = value;
    }

    fn tick(&mut self) {
        self.color_clocks += 1;
    }

    fn tick_n(&mut self, n: u32) {
        self.color_clocks += n as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_and_inputs() {
        let mut tia = Tia::new();
        tia.write(0x09, 0x84); // COLUBK
        assert_eq!(tia.register(0x49), 0x84);
        assert_eq!(tia.read(INPT4), 0x80);
        assert_eq!(tia.read(0x3C), 0x80);
        assert_eq!(tia.read(0x00), 0x00);
    }

    #[test]
    fn test_scanline_count() {
        let mut tia = Tia::new();
        tia.tick_n(228 * 2 + 5);
        assert_eq!(tia.scanline(), 2);
        tia.tick();
        assert_eq!(tia.color_clocks(), 228 * 2 + 6);
    }
}
