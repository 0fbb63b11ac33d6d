//! SID (MOS 6581) register stub.
//!
//! Stores what the CPU writes and answers the read-only registers with
//! plausible values. No audio is synthesised.

use retro6502::Device;

/// Register window, mirrored across $D400-$D7FF.
pub const SID_REGISTER_COUNT: usize = 32;

pub const MODE_VOLUME: usize = 0x18;
pub const POT_X: usize = 0x19;
pub const POT_Y: usize = 0x1A;
pub const OSC3: usize = 0x1B;
pub const ENV3: usize = 0x1C;

#[derive(Debug, Clone)]
pub struct Sid6581 {
    registers: [u8; SID_REGISTER_COUNT],
    /// Stand-in for voice 3's oscillator so `OSC3` polling sees movement.
    noise: u8,
}

impl Sid6581 {
    pub fn new() -> Self {
        Self {
            registers: [0; SID_REGISTER_COUNT],
            noise: 0xFF,
        }
    }

    /// Master volume (0-15).
    pub fn volume(&self) -> u8 {
        self.registers[MODE_VOLUME] & 0x0F
    }

    /// Last value written to a write-only register.
    pub fn register(&self, offset: u16) -> u8 {
        self.registers[offset as usize % SID_REGISTER_COUNT]
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Sid6581 {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Sid6581 {
    fn read(&mut self, offset: u16) -> u8 {
        match offset as usize % SID_REGISTER_COUNT {
            // No paddles connected
            POT_X | POT_Y => 0xFF,
            OSC3 => self.noise,
            ENV3 => 0x00,
            // Write-only registers float low
            _ => 0x00,
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.registers[offset as usize % SID_REGISTER_COUNT] = value;
    }

    /// Steps an 8-bit Galois LFSR.
    fn tick(&mut self) {
        let lsb = self.noise & 0x01;
        self.noise >>= 1;
        if lsb != 0 {
            self.noise ^= 0xB8;
        }
    }
}
