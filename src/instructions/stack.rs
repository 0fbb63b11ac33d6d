//! # Stack Instructions
//!
//! PHA, PHP, PLA and PLP. The status byte on the stack always has bit 5 set;
//! PHP also sets Break, and PLP never lets Break into the live register.

use crate::bus::Bus;
use crate::cpu::Mos6502;
use crate::status::{B, U};

pub(crate) fn pha<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M) {
    let value = cpu.regs.a;
    cpu.push(bus, value);
}

pub(crate) fn php<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M) {
    let value = cpu.regs.p | B | U;
    cpu.push(bus, value);
}

pub(crate) fn pla<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M) {
    cpu.regs.a = cpu.pull(bus);
    cpu.update_nz(cpu.regs.a);
}

pub(crate) fn plp<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M) {
    cpu.regs.p = (cpu.pull(bus) | U) & !B;
}
