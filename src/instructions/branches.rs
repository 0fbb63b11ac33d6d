//! # Branch Instructions
//!
//! The relative operand has already been turned into a target address by the
//! time these run, and PC points at the following instruction.
//!
//! The opcode table charges the 2 cycles of a branch that is not taken.
//! Taken branches cost one extra cycle, two if the target lies in a different
//! page from the following instruction, as on the silicon.

use crate::cpu::{Mos6502, Operand};

/// Branches when status bit `flag` equals `when_set`.
pub(crate) fn branch(cpu: &mut Mos6502, operand: Operand, flag: u8, when_set: bool) {
    let Operand::Address(target) = operand else {
        return;
    };
    if cpu.flag(flag) != when_set {
        return;
    }
    cpu.penalty += 1;
    if (cpu.regs.pc & 0xFF00) != (target & 0xFF00) {
        cpu.penalty += 1;
    }
    cpu.regs.pc = target;
}
