//! VIC-II (MOS 6569/6567) register stub.
//!
//! No pixels are produced. The chip keeps its register file, runs the
//! raster beam at the region's line length and raises the raster
//! interrupt, which is enough for KERNAL and game code that polls or
//! waits on `$D012`.

use retro6502::Device;

use crate::system::Region;

/// Register window, mirrored across $D000-$D3FF.
pub const VIC_REGISTER_COUNT: usize = 64;

pub const CONTROL_1: usize = 0x11;
pub const RASTER: usize = 0x12;
pub const IRQ_STATUS: usize = 0x19;
pub const IRQ_ENABLE: usize = 0x1A;
pub const BORDER_COLOR: usize = 0x20;
pub const BACKGROUND_COLOR: usize = 0x21;

#[derive(Debug, Clone)]
pub struct VicII {
    registers: [u8; VIC_REGISTER_COUNT],
    region: Region,
    raster: u16,
    cycle_in_line: u16,
    irq_pending: bool,
}

impl VicII {
    /// A chip with the register values the KERNAL leaves after boot.
    pub fn new(region: Region) -> Self {
        let mut registers = [0; VIC_REGISTER_COUNT];
        registers[CONTROL_1] = 0x1B;
        registers[0x16] = 0xC8;
        registers[0x18] = 0x15;
        registers[BORDER_COLOR] = 0x0E;
        registers[BACKGROUND_COLOR] = 0x06;

        Self {
            registers,
            region,
            raster: 0,
            cycle_in_line: 0,
            irq_pending: false,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn raster(&self) -> u16 {
        self.raster
    }

    pub fn border_color(&self) -> u8 {
        self.registers[BORDER_COLOR] & 0x0F
    }

    pub fn background_color(&self) -> u8 {
        self.registers[BACKGROUND_COLOR] & 0x0F
    }

    pub fn display_enabled(&self) -> bool {
        self.registers[CONTROL_1] & 0x10 != 0
    }

    /// Line that triggers the raster interrupt: $D012 plus bit 7 of $D011.
    fn raster_compare(&self) -> u16 {
        let high = ((self.registers[CONTROL_1] & 0x80) as u16) << 1;
        high | self.registers[RASTER] as u16
    }

    fn start_line(&mut self) {
        if self.raster == self.raster_compare() {
            self.registers[IRQ_STATUS] |= 0x01;
            if self.registers[IRQ_ENABLE] & 0x01 != 0 {
                self.irq_pending = true;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.region);
    }
}

impl Default for VicII {
    fn default() -> Self {
        Self::new(Region::default())
    }
}

impl Device for VicII {
    fn read(&mut self, offset: u16) -> u8 {
        let offset = offset as usize % VIC_REGISTER_COUNT;
        match offset {
            CONTROL_1 => {
                let bit8 = if self.raster > 0xFF { 0x80 } else { 0 };
                (self.registers[CONTROL_1] & 0x7F) | bit8
            }
            RASTER => self.raster as u8,
            // Unused bits read as 1
            IRQ_STATUS => {
                let any = if self.irq_pending { 0x80 } else { 0 };
                self.registers[IRQ_STATUS] | 0x70 | any
            }
            // Colour registers are 4 bits wide
            0x20..=0x2E => self.registers[offset] | 0xF0,
            0x2F..=0x3F => 0xFF,
            _ => self.registers[offset],
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        let offset = offset as usize % VIC_REGISTER_COUNT;
        match offset {
            // Writing 1 acknowledges a source
            IRQ_STATUS => {
                self.registers[IRQ_STATUS] &= !(value & 0x0F);
                if self.registers[IRQ_STATUS] & self.registers[IRQ_ENABLE] & 0x0F == 0 {
                    self.irq_pending = false;
                }
            }
            // Collision latches are read-only
            0x1E | 0x1F => {}
            _ => self.registers[offset] = value,
        }
    }

    /// One CPU cycle; the beam moves to the next line every
    /// `cycles_per_line` calls.
    fn tick(&mut self) {
        self.cycle_in_line += 1;
        if self.cycle_in_line < self.region.cycles_per_line() {
            return;
        }
        self.cycle_in_line = 0;
        self.raster += 1;
        if self.raster >= self.region.scanlines() {
            self.raster = 0;
        }
        self.start_line();
    }

    fn irq_active(&self) -> bool {
        self.irq_pending
    }
}
