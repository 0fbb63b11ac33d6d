//! # ALU Instructions
//!
//! ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY and BIT.
//!
//! `add` and `subtract` are also the second half of the undocumented RRA and
//! ISC combinations, so they take the operand value rather than an address.

use crate::bus::Bus;
use crate::cpu::{Mos6502, Operand};
use crate::status::{C, D, N, V, Z};

/// A + M + C, with BCD correction when the Decimal flag is set.
///
/// N, V and Z always reflect the binary sum, as on NMOS silicon. In decimal
/// mode the sum is adjusted by +$06 for a low-digit carry and +$60 for a
/// high-digit carry, Carry is taken from the adjusted value and the
/// instruction costs one extra cycle.
pub(crate) fn add(cpu: &mut Mos6502, value: u8) {
    let a = cpu.regs.a as u16;
    let m = value as u16;
    let carry_in = cpu.flag(C) as u16;
    let mut sum = a + m + carry_in;

    cpu.set_flag(V, (a ^ sum) & (m ^ sum) & 0x80 != 0);
    cpu.update_nz(sum as u8);

    if cpu.flag(D) {
        if (a & 0x0F) + (m & 0x0F) + carry_in > 9 {
            sum += 0x06;
        }
        if sum > 0x9F {
            sum += 0x60;
        }
        cpu.penalty += 1;
    }

    cpu.set_flag(C, sum > 0xFF);
    cpu.regs.a = sum as u8;
}

/// A - M - !C, with BCD correction when the Decimal flag is set.
///
/// Carry is the inverted borrow. Decimal mode subtracts $06 on a low-digit
/// borrow and $60 when the whole difference goes negative.
pub(crate) fn subtract(cpu: &mut Mos6502, value: u8) {
    let a = cpu.regs.a as i16;
    let m = value as i16;
    let borrow = 1 - cpu.flag(C) as i16;
    let mut diff = a - m - borrow;

    cpu.set_flag(V, (a ^ diff) & (a ^ m) & 0x80 != 0);
    cpu.update_nz(diff as u8);

    if cpu.flag(D) {
        if (a & 0x0F) - (m & 0x0F) - borrow < 0 {
            diff -= 0x06;
        }
        if diff < 0 {
            diff -= 0x60;
        }
        cpu.penalty += 1;
    }

    cpu.set_flag(C, diff >= 0);
    cpu.regs.a = diff as u8;
}

/// Register minus value: C when `register >= value`, N and Z from the difference.
pub(crate) fn compare(cpu: &mut Mos6502, register: u8, value: u8) {
    cpu.set_flag(C, register >= value);
    cpu.update_nz(register.wrapping_sub(value));
}

pub(crate) fn adc<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    add(cpu, value);
}

pub(crate) fn sbc<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    subtract(cpu, value);
}

pub(crate) fn and<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    cpu.regs.a &= cpu.read_operand(bus, operand);
    cpu.update_nz(cpu.regs.a);
}

pub(crate) fn ora<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    cpu.regs.a |= cpu.read_operand(bus, operand);
    cpu.update_nz(cpu.regs.a);
}

pub(crate) fn eor<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    cpu.regs.a ^= cpu.read_operand(bus, operand);
    cpu.update_nz(cpu.regs.a);
}

pub(crate) fn cmp<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    let register = cpu.regs.a;
    compare(cpu, register, value);
}

pub(crate) fn cpx<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    let register = cpu.regs.x;
    compare(cpu, register, value);
}

pub(crate) fn cpy<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    let register = cpu.regs.y;
    compare(cpu, register, value);
}

/// N and V copied from bits 7 and 6 of memory, Z from `A & M`.
pub(crate) fn bit<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) {
    let value = cpu.read_operand(bus, operand);
    cpu.set_flag(N, value & 0x80 != 0);
    cpu.set_flag(V, value & 0x40 != 0);
    cpu.set_flag(Z, cpu.regs.a & value == 0);
}
