//! # Load and Store Instructions

use crate::bus::Bus;
use crate::cpu::{Mos6502, Operand};

pub(crate) fn lda<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    cpu.regs.a = cpu.read_operand(bus, operand);
    cpu.update_nz(cpu.regs.a);
}

pub(crate) fn ldx<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    cpu.regs.x = cpu.read_operand(bus, operand);
    cpu.update_nz(cpu.regs.x);
}

pub(crate) fn ldy<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    cpu.regs.y = cpu.read_operand(bus, operand);
    cpu.update_nz(cpu.regs.y);
}

// Stores never touch flags.

pub(crate) fn sta<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.regs.a;
    cpu.write_operand(bus, operand, value);
}

pub(crate) fn stx<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.regs.x;
    cpu.write_operand(bus, operand, value);
}

pub(crate) fn sty<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.regs.y;
    cpu.write_operand(bus, operand, value);
}
