//! # Register Transfer Instructions
//!
//! All transfers set N and Z from the copied value except TXS, which leaves
//! the status register alone.

use crate::cpu::Mos6502;

pub(crate) fn tax(cpu: &mut Mos6502) {
    cpu.regs.x = cpu.regs.a;
    cpu.update_nz(cpu.regs.x);
}

pub(crate) fn tay(cpu: &mut Mos6502) {
    cpu.regs.y = cpu.regs.a;
    cpu.update_nz(cpu.regs.y);
}

pub(crate) fn txa(cpu: &mut Mos6502) {
    cpu.regs.a = cpu.regs.x;
    cpu.update_nz(cpu.regs.a);
}

pub(crate) fn tya(cpu: &mut Mos6502) {
    cpu.regs.a = cpu.regs.y;
    cpu.update_nz(cpu.regs.a);
}

pub(crate) fn tsx(cpu: &mut Mos6502) {
    cpu.regs.x = cpu.regs.sp;
    cpu.update_nz(cpu.regs.x);
}

pub(crate) fn txs(cpu: &mut Mos6502) {
    cpu.regs.sp = cpu.regs.x;
}
