//! # Increment and Decrement Instructions
//!
//! INC/DEC on memory and INX/INY/DEX/DEY on the index registers. All wrap
//! at 8 bits and set N and Z only.

use crate::bus::Bus;
use crate::cpu::{Mos6502, Operand};

pub(crate) fn inc<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) -> u8 {
    let result = cpu.read_operand(bus, operand).wrapping_add(1);
    cpu.update_nz(result);
    cpu.write_operand(bus, operand, result);
    result
}

pub(crate) fn dec<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) -> u8 {
    let result = cpu.read_operand(bus, operand).wrapping_sub(1);
    cpu.update_nz(result);
    cpu.write_operand(bus, operand, result);
    result
}

pub(crate) fn inx(cpu: &mut Mos6502) {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.update_nz(cpu.regs.x);
}

pub(crate) fn iny(cpu: &mut Mos6502) {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.update_nz(cpu.regs.y);
}

pub(crate) fn dex(cpu: &mut Mos6502) {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.update_nz(cpu.regs.x);
}

pub(crate) fn dey(cpu: &mut Mos6502) {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.update_nz(cpu.regs.y);
}
