//! # Control Flow Instructions
//!
//! JMP, JSR, RTS, RTI, BRK and the JAM lock-up.

use log::warn;

use crate::bus::Bus;
use crate::cpu::{Mos6502, Operand, IRQ_VECTOR};
use crate::status::{B, U};

/// Absolute and indirect JMP alike: the page-wrap quirk of `JMP ($xxFF)` is
/// handled while resolving the operand.
pub(crate) fn jmp(cpu: &mut Mos6502, operand: Operand) {
    if let Operand::Address(target) = operand {
        cpu.regs.pc = target;
    }
}

/// Pushes the address of the last byte of the JSR, not of the next instruction.
pub(crate) fn jsr<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let Operand::Address(target) = operand else {
        return;
    };
    let return_addr = cpu.regs.pc.wrapping_sub(1);
    cpu.push_word(bus, return_addr);
    cpu.regs.pc = target;
}

pub(crate) fn rts<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M) {
    cpu.regs.pc = cpu.pull_word(bus).wrapping_add(1);
}

/// Status first, then PC, with no +1 adjustment.
pub(crate) fn rti<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M) {
    cpu.regs.p = (cpu.pull(bus) | U) & !B;
    cpu.regs.pc = cpu.pull_word(bus);
}

/// Software interrupt. The pushed return address skips the padding byte
/// after the opcode.
pub(crate) fn brk<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M) {
    cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
    cpu.interrupt(bus, IRQ_VECTOR, true);
}

pub(crate) fn jam(cpu: &mut Mos6502) {
    cpu.jammed = true;
    warn!(
        "CPU jammed by opcode {:02X} at {:04X}",
        cpu.current_opcode(),
        cpu.regs.pc.wrapping_sub(1)
    );
}
