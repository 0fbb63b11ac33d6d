//! 6510 CPU I/O port.
//!
//! The 6510 has an 8-bit I/O port at addresses $00-$01:
//! - $00: Data Direction Register (DDR) - 0=input, 1=output per bit
//! - $01: Data Register
//!
//! Bits 0-2 of the data register select what the CPU sees in the upper
//! address space:
//! - Bit 0 (LORAM): BASIC ROM at $A000-$BFFF (together with HIRAM)
//! - Bit 1 (HIRAM): KERNAL ROM at $E000-$FFFF
//! - Bit 2 (CHAREN): I/O instead of character ROM at $D000-$DFFF
//!
//! The power-on configuration ($37) makes BASIC, KERNAL and I/O visible.

use retro6502::Device;

pub const LORAM: u8 = 0x01;
pub const HIRAM: u8 = 0x02;
pub const CHAREN: u8 = 0x04;

/// 6510 on-chip I/O port.
#[derive(Debug, Clone)]
pub struct Port6510 {
    /// 0 = input, 1 = output
    ddr: u8,
    data: u8,
    /// Levels on pins configured as inputs (cassette sense and friends).
    external: u8,
}

impl Port6510 {
    /// DDR $2F and data $37, as the KERNAL leaves them.
    pub fn new() -> Self {
        Self {
            ddr: 0x2F,
            data: 0x37,
            external: 0,
        }
    }

    /// Banking bits 0-2 as seen on the pins.
    ///
    /// | Value | $A000-$BFFF | $D000-$DFFF | $E000-$FFFF |
    /// |-------|-------------|-------------|-------------|
    /// | 0, 4  | RAM         | RAM         | RAM         |
    /// | 1     | RAM         | CHAR ROM    | RAM         |
    /// | 2     | RAM         | CHAR ROM    | KERNAL      |
    /// | 3     | BASIC       | CHAR ROM    | KERNAL      |
    /// | 5     | RAM         | I/O         | RAM         |
    /// | 6     | RAM         | I/O         | KERNAL      |
    /// | 7     | BASIC       | I/O         | KERNAL      |
    #[inline]
    pub fn bank_config(&self) -> u8 {
        self.effective_data() & 0x07
    }

    #[inline]
    pub fn basic_visible(&self) -> bool {
        self.bank_config() & (LORAM | HIRAM) == LORAM | HIRAM
    }

    #[inline]
    pub fn kernal_visible(&self) -> bool {
        self.bank_config() & HIRAM != 0
    }

    #[inline]
    pub fn io_visible(&self) -> bool {
        let cfg = self.bank_config();
        cfg & CHAREN != 0 && cfg & (LORAM | HIRAM) != 0
    }

    #[inline]
    pub fn char_rom_visible(&self) -> bool {
        let cfg = self.bank_config();
        cfg & CHAREN == 0 && cfg & (LORAM | HIRAM) != 0
    }

    /// Output bits from the data register, input bits from the pins.
    #[inline]
    fn effective_data(&self) -> u8 {
        (self.data & self.ddr) | (self.external & !self.ddr)
    }

    pub fn set_external(&mut self, value: u8) {
        self.external = value;
    }

    pub fn ddr(&self) -> u8 {
        self.ddr
    }

    pub fn data(&self) -> u8 {
        self.data
    }
}

impl Default for Port6510 {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Port6510 {
    fn read(&mut self, offset: u16) -> u8 {
        match offset & 0x01 {
            0 => self.ddr,
            _ => self.effective_data(),
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        match offset & 0x01 {
            0 => self.ddr = value,
            _ => self.data = value,
        }
    }

    fn tick(&mut self) {}
}
