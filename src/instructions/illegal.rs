//! # Undocumented Instructions
//!
//! The stable NMOS combinations. Read-modify-write forms run the documented
//! operation on memory and then feed the written value to a second ALU
//! operation; the immediate forms combine an AND with a shift or a subtract.

use crate::bus::Bus;
use crate::cpu::{Mos6502, Operand};
use crate::instructions::{alu, inc_dec, shifts};
use crate::status::{C, N, V};

/// ASL memory, then ORA.
pub(crate) fn slo<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = shifts::asl(cpu, bus, operand);
    cpu.regs.a |= value;
    cpu.update_nz(cpu.regs.a);
}

/// ROL memory, then AND.
pub(crate) fn rla<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = shifts::rol(cpu, bus, operand);
    cpu.regs.a &= value;
    cpu.update_nz(cpu.regs.a);
}

/// LSR memory, then EOR.
pub(crate) fn sre<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = shifts::lsr(cpu, bus, operand);
    cpu.regs.a ^= value;
    cpu.update_nz(cpu.regs.a);
}

/// ROR memory, then ADC using the carry shifted out.
pub(crate) fn rra<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = shifts::ror(cpu, bus, operand);
    alu::add(cpu, value);
}

/// Stores `A & X`. Flags untouched.
pub(crate) fn sax<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.regs.a & cpu.regs.x;
    cpu.write_operand(bus, operand, value);
}

/// Loads A and X with the same byte.
pub(crate) fn lax<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    cpu.regs.a = value;
    cpu.regs.x = value;
    cpu.update_nz(value);
}

/// DEC memory, then CMP.
pub(crate) fn dcp<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = inc_dec::dec(cpu, bus, operand);
    let a = cpu.regs.a;
    alu::compare(cpu, a, value);
}

/// INC memory, then SBC.
pub(crate) fn isc<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = inc_dec::inc(cpu, bus, operand);
    alu::subtract(cpu, value);
}

/// AND immediate, then C copied from N.
pub(crate) fn anc<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    alu::and(cpu, bus, operand);
    cpu.set_flag(C, cpu.flag(N));
}

/// AND immediate, then LSR A.
pub(crate) fn alr<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    alu::and(cpu, bus, operand);
    shifts::lsr(cpu, bus, Operand::Accumulator);
}

/// AND immediate, then ROR A with odd flags: C from bit 6, V from bit 6 xor bit 5.
pub(crate) fn arr<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    let anded = cpu.regs.a & value;
    let result = (anded >> 1) | ((cpu.flag(C) as u8) << 7);
    cpu.regs.a = result;
    cpu.update_nz(result);
    cpu.set_flag(C, result & 0x40 != 0);
    cpu.set_flag(V, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
}

/// X = (A & X) - M, without borrow in. C set when no borrow occurred.
pub(crate) fn axs<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    let ax = cpu.regs.a & cpu.regs.x;
    cpu.set_flag(C, ax >= value);
    cpu.regs.x = ax.wrapping_sub(value);
    cpu.update_nz(cpu.regs.x);
}
