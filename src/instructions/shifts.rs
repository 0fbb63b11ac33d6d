//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR, on the accumulator or in memory. Each returns the
//! value written so SLO/RLA/SRE/RRA can feed it to their second operation.

use crate::bus::Bus;
use crate::cpu::{Mos6502, Operand};
use crate::status::C;

fn modify<M: Bus + ?Sized>(
    cpu: &mut Mos6502,
    bus: &mut M,
    operand: Operand,
    op: impl FnOnce(u8, bool) -> (u8, bool),
) -> u8 {
    let value = cpu.read_operand(bus, operand);
    let (result, carry) = op(value, cpu.flag(C));
    cpu.set_flag(C, carry);
    cpu.update_nz(result);
    cpu.write_operand(bus, operand, result);
    result
}

pub(crate) fn asl<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) -> u8 {
    modify(cpu, bus, operand, |v, _| (v << 1, v & 0x80 != 0))
}

pub(crate) fn lsr<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) -> u8 {
    modify(cpu, bus, operand, |v, _| (v >> 1, v & 0x01 != 0))
}

pub(crate) fn rol<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) -> u8 {
    modify(cpu, bus, operand, |v, c| ((v << 1) | c as u8, v & 0x80 != 0))
}

pub(crate) fn ror<M: Bus + ?Sized>(cpu: &mut Mos6502, bus: &mut M, operand: Operand) -> u8 {
    modify(cpu, bus, operand, |v, c| ((v >> 1) | ((c as u8) << 7), v & 0x01 != 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatBus;
    use crate::status::{N, Z};

    #[test]
    fn test_rotate_through_carry() {
        let mut bus = FlatBus::new();
        let mut cpu = Mos6502::new();
        cpu.regs.a = 0x80;
        cpu.set_flag(C, false);

        assert_eq!(rol(&mut cpu, &mut bus, Operand::Accumulator), 0x00);
        assert!(cpu.flag(C) && cpu.flag(Z));

        assert_eq!(ror(&mut cpu, &mut bus, Operand::Accumulator), 0x80);
        assert!(!cpu.flag(C) && cpu.flag(N));
    }

    #[test]
    fn test_shift_memory() {
        let mut bus = FlatBus::new();
        let mut cpu = Mos6502::new();
        bus.store(0x0010, 0x81);

        lsr(&mut cpu, &mut bus, Operand::Address(0x0010));
        assert_eq!(bus.load(0x0010), 0x40);
        assert!(cpu.flag(C));

        asl(&mut cpu, &mut bus, Operand::Address(0x0010));
        assert_eq!(bus.load(0x0010), 0x80);
        assert!(!cpu.flag(C) && cpu.flag(N));
    }
}
