//! CIA (MOS 6526) Complex Interface Adapter.
//!
//! The C64 has two:
//! - CIA1 ($DC00-$DCFF): keyboard matrix and joystick ports, drives IRQ
//! - CIA2 ($DD00-$DDFF): serial bus and VIC-II bank select, drives NMI
//!
//! Modelled here: both I/O ports with their direction registers, the two
//! 16-bit interval timers (continuous, one-shot and B counting A
//! underflows) and the interrupt control register. The time-of-day clock
//! and serial shift register are plain storage.
//!
//! Every write also lands in a 16-byte register file that memory viewers
//! can inspect through [`Cia6526::registers`].

use log::trace;
use retro6502::{Device, Memory};

/// Registers per chip; they mirror across the 256-byte page.
pub const CIA_REGISTER_COUNT: usize = 16;

pub const PRA: u16 = 0x00;
pub const PRB: u16 = 0x01;
pub const DDRA: u16 = 0x02;
pub const DDRB: u16 = 0x03;
pub const TALO: u16 = 0x04;
pub const TAHI: u16 = 0x05;
pub const TBLO: u16 = 0x06;
pub const TBHI: u16 = 0x07;
pub const ICR: u16 = 0x0D;
pub const CRA: u16 = 0x0E;
pub const CRB: u16 = 0x0F;

/// ICR source bits.
pub const INT_TIMER_A: u8 = 0x01;
pub const INT_TIMER_B: u8 = 0x02;

/// One I/O port: output latch and direction register.
#[derive(Debug, Clone, Default)]
pub struct CiaPort {
    pub data: u8,
    /// 0 = input, 1 = output
    pub ddr: u8,
}

impl CiaPort {
    /// Latched bits on pins configured as outputs.
    #[inline]
    pub fn output(&self) -> u8 {
        self.data & self.ddr
    }

    /// Output latch on output pins, external levels on input pins.
    #[inline]
    pub fn read(&self, external: u8) -> u8 {
        self.output() | (external & !self.ddr)
    }
}

#[derive(Debug, Clone)]
pub struct CiaTimer {
    pub counter: u16,
    pub latch: u16,
    pub running: bool,
    /// Stop after the next underflow.
    pub one_shot: bool,
}

impl CiaTimer {
    pub fn new() -> Self {
        Self {
            counter: 0xFFFF,
            latch: 0xFFFF,
            running: false,
            one_shot: false,
        }
    }

    /// Counts one pulse. Returns true on underflow, when the counter
    /// reloads from the latch.
    pub fn clock(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.counter == 0 {
            self.counter = self.latch;
            if self.one_shot {
                self.running = false;
            }
            true
        } else {
            self.counter -= 1;
            false
        }
    }

    fn control(&mut self, value: u8) {
        self.running = value & 0x01 != 0;
        self.one_shot = value & 0x08 != 0;
        // Force load
        if value & 0x10 != 0 {
            self.counter = self.latch;
        }
    }
}

impl Default for CiaTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which interrupt line a chip drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiaType {
    /// IRQ
    Cia1,
    /// NMI
    Cia2,
}

/// MOS 6526 Complex Interface Adapter.
#[derive(Debug)]
pub struct Cia6526 {
    cia_type: CiaType,
    registers: Memory,

    pub port_a: CiaPort,
    pub port_b: CiaPort,
    pub timer_a: CiaTimer,
    pub timer_b: CiaTimer,

    /// Latched sources, cleared by reading ICR.
    interrupt_flags: u8,
    interrupt_mask: u8,

    /// Levels on port pins configured as inputs.
    pub external_a: u8,
    pub external_b: u8,
}

impl Cia6526 {
    pub fn new(cia_type: CiaType) -> Self {
        Self {
            cia_type,
            registers: Memory::new(CIA_REGISTER_COUNT),
            port_a: CiaPort::default(),
            port_b: CiaPort::default(),
            timer_a: CiaTimer::new(),
            timer_b: CiaTimer::new(),
            interrupt_flags: 0,
            interrupt_mask: 0,
            external_a: 0xFF,
            external_b: 0xFF,
        }
    }

    pub fn new_cia1() -> Self {
        Self::new(CiaType::Cia1)
    }

    pub fn new_cia2() -> Self {
        Self::new(CiaType::Cia2)
    }

    pub fn cia_type(&self) -> CiaType {
        self.cia_type
    }

    /// The last value written to each register.
    pub fn registers(&self) -> &Memory {
        &self.registers
    }

    pub fn interrupt_flags(&self) -> u8 {
        self.interrupt_flags
    }

    pub fn interrupt_mask(&self) -> u8 {
        self.interrupt_mask
    }

    /// An enabled source has fired and ICR has not been read since.
    pub fn interrupt_pending(&self) -> bool {
        self.interrupt_flags & self.interrupt_mask != 0
    }

    /// VIC-II bank (0-3) selected by CIA2 port A bits 0-1, inverted.
    pub fn vic_bank(&self) -> u8 {
        !self.port_a.read(self.external_a) & 0x03
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.cia_type);
    }
}

impl Device for Cia6526 {
    fn read(&mut self, offset: u16) -> u8 {
        let offset = offset & 0x0F;
        match offset {
            PRA => self.port_a.read(self.external_a),
            PRB => self.port_b.read(self.external_b),
            DDRA => self.port_a.ddr,
            DDRB => self.port_b.ddr,
            TALO => self.timer_a.counter as u8,
            TAHI => (self.timer_a.counter >> 8) as u8,
            TBLO => self.timer_b.counter as u8,
            TBHI => (self.timer_b.counter >> 8) as u8,
            ICR => {
                let value = self.interrupt_flags | if self.interrupt_pending() { 0x80 } else { 0 };
                self.interrupt_flags = 0;
                value
            }
            CRA => self.registers.load(CRA) & !0x10,
            CRB => self.registers.load(CRB) & !0x10,
            // TOD and SDR
            _ => self.registers.load(offset),
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        let offset = offset & 0x0F;
        self.registers.store(offset, value);
        match offset {
            PRA => self.port_a.data = value,
            PRB => self.port_b.data = value,
            DDRA => self.port_a.ddr = value,
            DDRB => self.port_b.ddr = value,
            TALO => self.timer_a.latch = (self.timer_a.latch & 0xFF00) | value as u16,
            // A stopped timer loads on a high-byte write
            TAHI => {
                self.timer_a.latch = (self.timer_a.latch & 0x00FF) | ((value as u16) << 8);
                if !self.timer_a.running {
                    self.timer_a.counter = self.timer_a.latch;
                }
            }
            TBLO => self.timer_b.latch = (self.timer_b.latch & 0xFF00) | value as u16,
            TBHI => {
                self.timer_b.latch = (self.timer_b.latch & 0x00FF) | ((value as u16) << 8);
                if !self.timer_b.running {
                    self.timer_b.counter = self.timer_b.latch;
                }
            }
            // Bit 7 chooses set or clear for the other mask bits
            ICR => {
                let bits = value & 0x1F;
                if value & 0x80 != 0 {
                    self.interrupt_mask |= bits;
                } else {
                    self.interrupt_mask &= !bits;
                }
            }
            CRA => self.timer_a.control(value),
            CRB => self.timer_b.control(value),
            _ => {}
        }
    }

    /// One phi2 clock.
    fn tick(&mut self) {
        let before = self.interrupt_flags;
        let a_underflow = self.timer_a.clock();
        if a_underflow {
            self.interrupt_flags |= INT_TIMER_A;
        }

        // CRB bits 5-6 = %10: count timer A underflows
        let b_pulse = if self.registers.load(CRB) & 0x60 == 0x40 {
            a_underflow
        } else {
            true
        };
        if b_pulse && self.timer_b.clock() {
            self.interrupt_flags |= INT_TIMER_B;
        }

        if self.interrupt_flags != before && self.interrupt_pending() {
            trace!("{:?} interrupt, ICR flags {:02X}", self.cia_type, self.interrupt_flags);
        }
    }

    /// CIA2's output is wired to NMI, not IRQ.
    fn irq_active(&self) -> bool {
        self.cia_type == CiaType::Cia1 && self.interrupt_pending()
    }
}
