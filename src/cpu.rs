//! # CPU State and Execution
//!
//! [`Mos6502`] is the instruction interpreter. It owns nothing but its
//! register file; every memory access goes through the [`Bus`] handed to
//! each call, so the same core drives a flat test RAM, a 6507 with 13 address
//! lines or a bank-switched home computer.
//!
//! ## Execution Model
//!
//! - `step()`: fetch, decode through [`OPCODE_TABLE`], resolve the effective
//!   address, execute, and return the cycles spent.
//! - `irq()` / `nmi()`: hardware interrupt entry, called by the owner between
//!   instructions.
//!
//! Cycle cost is the table's base cost plus a per-instruction penalty counter
//! that the addressing and instruction code bump for page crossings, taken
//! branches and decimal-mode arithmetic.

use log::{debug, trace};

use crate::addressing::AddressingMode;
use crate::bus::{self, Bus};
use crate::instructions;
use crate::opcodes::OPCODE_TABLE;
use crate::registers::Registers;
use crate::status::{self, B, D, I, U};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;
/// NMI vector (`$FFFA/$FFFB`).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector (`$FFFC/$FFFD`).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ and BRK vector (`$FFFE/$FFFF`).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles taken by interrupt entry, hardware or BRK.
const INTERRUPT_CYCLES: u32 = 7;

/// What an instruction operates on once its addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    Implied,
    Accumulator,
    /// Effective address. For relative mode this is the branch target.
    Address(u16),
}

/// An NMOS 6502 (or 6507) core.
///
/// # Examples
///
/// ```
/// use retro6502::{Bus, FlatBus, Mos6502};
///
/// let mut bus = FlatBus::new();
/// bus.store(0xFFFC, 0x00);
/// bus.store(0xFFFD, 0x80);
/// bus.store(0x8000, 0xA9); // LDA #$42
/// bus.store(0x8001, 0x42);
///
/// let mut cpu = Mos6502::new();
/// cpu.reset(&mut bus);
/// assert_eq!(cpu.pc(), 0x8000);
///
/// let cycles = cpu.step(&mut bus);
/// assert_eq!(cycles, 2);
/// assert_eq!(cpu.a(), 0x42);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mos6502 {
    pub(crate) regs: Registers,
    pub(crate) jammed: bool,
    /// Extra cycles accrued by the instruction in flight.
    pub(crate) penalty: u32,
    current_opcode: u8,
}

impl Mos6502 {
    /// Creates a core in its power-on register state. Call [`reset`](Self::reset)
    /// with a bus to load the program counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Performs the reset sequence.
    ///
    /// SP becomes `$FF`, IRQ-disable is set, decimal mode is cleared, a
    /// previous lock-up is released and PC is loaded from `$FFFC/$FFFD`.
    pub fn reset<M: Bus + ?Sized>(&mut self, bus: &mut M) {
        self.regs.sp = 0xFF;
        self.regs.p = (self.regs.p | I | U) & !D;
        self.jammed = false;
        self.penalty = 0;
        self.regs.pc = bus::load_word(bus, RESET_VECTOR);
        debug!("reset: PC={:04X}", self.regs.pc);
    }

    /// Executes one instruction and returns the number of cycles it took.
    ///
    /// A jammed core does nothing and returns 0.
    pub fn step<M: Bus + ?Sized>(&mut self, bus: &mut M) -> u32 {
        if self.jammed {
            return 0;
        }
        self.penalty = 0;

        let pc = self.regs.pc;
        let opcode = self.fetch(bus);
        self.current_opcode = opcode;
        let entry = &OPCODE_TABLE[opcode as usize];

        let operand = self.resolve(bus, entry.mode, entry.mnemonic.page_cross_penalty());
        // Illegal opcodes are starred
        trace!(
            "{:04X}  {:02X} {}{} {:<9} {}",
            pc,
            opcode,
            if entry.mnemonic.is_undocumented() { '*' } else { ' ' },
            entry.mnemonic,
            describe_operand(entry.mode, operand),
            self.regs
        );

        instructions::execute(self, bus, entry.mnemonic, operand);
        entry.base_cycles as u32 + self.penalty
    }

    /// Services a maskable interrupt request.
    ///
    /// Returns 0 without side effects when IRQ-disable is set or the core is
    /// jammed; otherwise pushes PC and status (Break clear), sets
    /// IRQ-disable and jumps through `$FFFE`.
    pub fn irq<M: Bus + ?Sized>(&mut self, bus: &mut M) -> u32 {
        if self.jammed || self.flag(I) {
            return 0;
        }
        self.interrupt(bus, IRQ_VECTOR, false);
        INTERRUPT_CYCLES
    }

    /// Services a non-maskable interrupt through `$FFFA`.
    pub fn nmi<M: Bus + ?Sized>(&mut self, bus: &mut M) -> u32 {
        if self.jammed {
            return 0;
        }
        self.interrupt(bus, NMI_VECTOR, false);
        INTERRUPT_CYCLES
    }

    /// Shared interrupt entry for BRK, IRQ and NMI.
    pub(crate) fn interrupt<M: Bus + ?Sized>(&mut self, bus: &mut M, vector: u16, software: bool) {
        let pushed = if software {
            self.regs.p | B | U
        } else {
            (self.regs.p | U) & !B
        };
        self.push_word(bus, self.regs.pc);
        self.push(bus, pushed);
        self.regs.p |= I;
        self.regs.pc = bus::load_word(bus, vector);
    }

    // ========== Fetch and operand resolution ==========

    #[inline]
    pub(crate) fn fetch<M: Bus + ?Sized>(&mut self, bus: &mut M) -> u8 {
        let value = bus.load(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word<M: Bus + ?Sized>(&mut self, bus: &mut M) -> u16 {
        let lo = self.fetch(bus) as u16;
        let hi = self.fetch(bus) as u16;
        (hi << 8) | lo
    }

    /// Consumes the operand bytes for `mode` and returns the effective address.
    ///
    /// `page_penalty` selects whether an indexed page crossing costs a cycle.
    pub(crate) fn resolve<M: Bus + ?Sized>(
        &mut self,
        bus: &mut M,
        mode: AddressingMode,
        page_penalty: bool,
    ) -> Operand {
        match mode {
            AddressingMode::Implicit => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                Operand::Address(addr)
            }
            AddressingMode::ZeroPage => Operand::Address(self.fetch(bus) as u16),
            AddressingMode::ZeroPageX => {
                Operand::Address(self.fetch(bus).wrapping_add(self.regs.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                Operand::Address(self.fetch(bus).wrapping_add(self.regs.y) as u16)
            }
            AddressingMode::Relative => {
                let offset = self.fetch(bus) as i8;
                Operand::Address(self.regs.pc.wrapping_add(offset as u16))
            }
            AddressingMode::Absolute => Operand::Address(self.fetch_word(bus)),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(bus);
                Operand::Address(self.index(base, self.regs.x, page_penalty))
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(bus);
                Operand::Address(self.index(base, self.regs.y, page_penalty))
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word(bus);
                Operand::Address(bus::load_word_page_wrapped(bus, ptr))
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch(bus).wrapping_add(self.regs.x);
                Operand::Address(bus::load_word_page_wrapped(bus, zp as u16))
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch(bus);
                let base = bus::load_word_page_wrapped(bus, zp as u16);
                Operand::Address(self.index(base, self.regs.y, page_penalty))
            }
        }
    }

    /// `base + index` with wraparound, charging a cycle on a page change.
    #[inline]
    pub(crate) fn index(&mut self, base: u16, index: u8, page_penalty: bool) -> u16 {
        let addr = base.wrapping_add(index as u16);
        if page_penalty && (base & 0xFF00) != (addr & 0xFF00) {
            self.penalty += 1;
        }
        addr
    }

    pub(crate) fn read_operand<M: Bus + ?Sized>(&self, bus: &mut M, operand: Operand) -> u8 {
        match operand {
            Operand::Address(addr) => bus.load(addr),
            Operand::Accumulator => self.regs.a,
            Operand::Implied => 0,
        }
    }

    pub(crate) fn write_operand<M: Bus + ?Sized>(&mut self, bus: &mut M, operand: Operand, value: u8) {
        match operand {
            Operand::Address(addr) => bus.store(addr, value),
            Operand::Accumulator => self.regs.a = value,
            Operand::Implied => {}
        }
    }

    // ========== Stack ==========

    pub(crate) fn push<M: Bus + ?Sized>(&mut self, bus: &mut M, value: u8) {
        bus.store(STACK_BASE | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    pub(crate) fn pull<M: Bus + ?Sized>(&mut self, bus: &mut M) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        bus.load(STACK_BASE | self.regs.sp as u16)
    }

    /// Pushes high byte first, so the word reads back little-endian.
    pub(crate) fn push_word<M: Bus + ?Sized>(&mut self, bus: &mut M, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    pub(crate) fn pull_word<M: Bus + ?Sized>(&mut self, bus: &mut M) -> u16 {
        let lo = self.pull(bus) as u16;
        let hi = self.pull(bus) as u16;
        (hi << 8) | lo
    }

    // ========== Flags ==========

    /// Whether every bit of `mask` is set in the status register.
    #[inline]
    pub fn flag(&self, mask: u8) -> bool {
        self.regs.p & mask == mask
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.regs.p |= mask;
        } else {
            self.regs.p &= !mask;
        }
    }

    /// Updates Zero and Negative from `value`; no other flag is touched.
    #[inline]
    pub(crate) fn update_nz(&mut self, value: u8) {
        self.regs.p = status::with_nz(self.regs.p, value);
    }

    // ========== Accessors ==========

    /// Overwrites the status register verbatim.
    pub fn set_flags(&mut self, p: u8) {
        self.regs.p = p;
    }

    /// Returns the packed status register (`NV-BDIZC`).
    pub fn status(&self) -> u8 {
        self.regs.p
    }

    /// The last opcode byte fetched by [`step`](Self::step).
    pub fn current_opcode(&self) -> u8 {
        self.current_opcode
    }

    /// True once a JAM opcode has locked the core up. Only reset clears it.
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    /// Returns a copy of the whole register file.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    /// Replaces the whole register file. The jammed state is left alone.
    pub fn set_registers(&mut self, regs: Registers) {
        self.regs = regs;
    }

    /// Returns the accumulator.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the stack pointer.
    ///
    /// The full stack address is `$0100 + SP`; the stack grows down from `$01FF`.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Sets the accumulator. Flags are not updated.
    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    /// Sets the X index register. Flags are not updated.
    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    /// Sets the Y index register. Flags are not updated.
    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    /// Sets the program counter; the next [`step`](Self::step) fetches from here.
    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }
}

fn describe_operand(mode: AddressingMode, operand: Operand) -> String {
    match (mode, operand) {
        (AddressingMode::Accumulator, _) => "A".to_string(),
        (AddressingMode::Immediate, _) | (_, Operand::Implied) => String::new(),
        (_, Operand::Address(addr)) => format!("@{:04X}", addr),
        (_, Operand::Accumulator) => "A".to_string(),
    }
}
