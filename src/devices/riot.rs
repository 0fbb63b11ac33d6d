//! MOS 6532 RIOT: 128 bytes of RAM, two 8-bit I/O ports and an interval timer.
//!
//! The RAM is exposed as a plain [`Memory`] so the bus can route RAM accesses
//! to it directly; the [`Device`] impl covers the I/O and timer registers.
//!
//! # Register map (chip-local offsets)
//!
//! | Offset | Read     | Write                       |
//! |--------|----------|-----------------------------|
//! | `$00`  | SWCHA    | port A output               |
//! | `$01`  | SWACNT   | port A direction            |
//! | `$02`  | SWCHB    | port B output               |
//! | `$03`  | SWBCNT   | port B direction            |
//! | `$04`  | INTIM    | edge-detect control (ignored) |
//! | `$05`  | TIMINT   |                             |
//! | `$14`-`$17` |     | TIM1T / TIM8T / TIM64T / T1024T |

use crate::devices::Device;
use crate::memory::Memory;

pub const SWCHA: u16 = 0x00;
pub const SWACNT: u16 = 0x01;
pub const SWCHB: u16 = 0x02;
pub const SWBCNT: u16 = 0x03;
pub const INTIM: u16 = 0x04;
pub const TIMINT: u16 = 0x05;
pub const TIM1T: u16 = 0x14;
pub const TIM8T: u16 = 0x15;
pub const TIM64T: u16 = 0x16;
pub const T1024T: u16 = 0x17;

pub const RAM_SIZE: usize = 128;

const INTERVALS: [u16; 4] = [1, 8, 64, 1024];

/// Timer underflow bit in TIMINT.
const TIMER_FLAG: u8 = 0x80;

#[derive(Debug)]
pub struct Riot {
    ram: Memory,
    port_a: Port,
    port_b: Port,
    timer: u8,
    interval: u16,
    prescaler: u16,
    underflow: bool,
}

/// One I/O port: output latch, direction register and the level driven by
/// whatever is plugged in.
#[derive(Debug, Clone, Copy)]
struct Port {
    output: u8,
    direction: u8,
    input: u8,
}

impl Port {
    fn new(input: u8) -> Self {
        Self {
            output: 0,
            direction: 0,
            input,
        }
    }

    /// Output bits where the direction register says output, external levels elsewhere.
    fn value(&self) -> u8 {
        (self.output & self.direction) | (self.input & !self.direction)
    }
}

impl Riot {
    pub fn new() -> Self {
        Self {
            ram: Memory::new(RAM_SIZE),
            // Joysticks released
            port_a: Port::new(0xFF),
            // Reset and select released, colour mode
            port_b: Port::new(0x0B),
            timer: 0,
            interval: 1024,
            prescaler: 1024,
            underflow: false,
        }
    }

    pub fn ram(&self) -> &Memory {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut Memory {
        &mut self.ram
    }

    /// Sets the levels on port A pins (joystick directions, active low).
    pub fn set_port_a_input(&mut self, value: u8) {
        self.port_a.input = value;
    }

    /// Sets the levels on port B pins (console switches, active low).
    pub fn set_port_b_input(&mut self, value: u8) {
        self.port_b.input = value;
    }

    pub fn timer(&self) -> u8 {
        self.timer
    }
}

impl Default for Riot {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Riot {
    fn read(&mut self, offset: u16) -> u8 {
        match offset & 0x07 {
            0x00 => self.port_a.value(),
            0x01 => self.port_a.direction,
            0x02 => self.port_b.value(),
            0x03 => self.port_b.direction,
            // INTIM mirrors; reading the counter acknowledges the underflow
            0x04 | 0x06 => {
                self.underflow = false;
                self.timer
            }
            _ => {
                if self.underflow {
                    TIMER_FLAG
                } else {
                    0
                }
            }
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        if offset & 0x14 == 0x14 {
            self.interval = INTERVALS[(offset & 0x03) as usize];
            self.prescaler = self.interval;
            self.timer = value;
            self.underflow = false;
            return;
        }
        match offset & 0x07 {
            0x00 => self.port_a.output = value,
            0x01 => self.port_a.direction = value,
            0x02 => self.port_b.output = value,
            0x03 => self.port_b.direction = value,
            _ => {}
        }
    }

    /// One CPU clock. After an underflow the counter keeps running at one
    /// decrement per clock until it is rewritten.
    fn tick(&mut self) {
        self.prescaler -= 1;
        if self.prescaler > 0 {
            return;
        }
        if self.timer == 0 {
            self.underflow = true;
            self.interval = 1;
        }
        self.timer = self.timer.wrapping_sub(1);
        self.prescaler = self.interval;
    }
}
