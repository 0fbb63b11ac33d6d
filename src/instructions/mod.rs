//! # 6502 Instruction Implementations
//!
//! Instructions are free functions over the core and the bus, grouped by
//! family. [`execute`] is the single dispatch point: the CPU has already
//! decoded the opcode through the table and resolved its operand.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, RTI, BRK, JAM
//! - **stack**: PHA, PHP, PLA, PLP
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS
//! - **illegal**: SLO, RLA, SRE, RRA, SAX, LAX, DCP, ISC, ANC, ALR, ARR, AXS

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod illegal;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::bus::Bus;
use crate::cpu::{Mos6502, Operand};
use crate::opcodes::Mnemonic;
use crate::status::{C, D, I, N, V, Z};

pub(crate) fn execute<M: Bus + ?Sized>(
    cpu: &mut Mos6502,
    bus: &mut M,
    mnemonic: Mnemonic,
    operand: Operand,
) {
    use Mnemonic::*;

    match mnemonic {
        Adc => alu::adc(cpu, bus, operand),
        Sbc => alu::sbc(cpu, bus, operand),
        And => alu::and(cpu, bus, operand),
        Ora => alu::ora(cpu, bus, operand),
        Eor => alu::eor(cpu, bus, operand),
        Cmp => alu::cmp(cpu, bus, operand),
        Cpx => alu::cpx(cpu, bus, operand),
        Cpy => alu::cpy(cpu, bus, operand),
        Bit => alu::bit(cpu, bus, operand),

        Asl => {
            shifts::asl(cpu, bus, operand);
        }
        Lsr => {
            shifts::lsr(cpu, bus, operand);
        }
        Rol => {
            shifts::rol(cpu, bus, operand);
        }
        Ror => {
            shifts::ror(cpu, bus, operand);
        }

        Lda => load_store::lda(cpu, bus, operand),
        Ldx => load_store::ldx(cpu, bus, operand),
        Ldy => load_store::ldy(cpu, bus, operand),
        Sta => load_store::sta(cpu, bus, operand),
        Stx => load_store::stx(cpu, bus, operand),
        Sty => load_store::sty(cpu, bus, operand),

        Inc => {
            inc_dec::inc(cpu, bus, operand);
        }
        Dec => {
            inc_dec::dec(cpu, bus, operand);
        }
        Inx => inc_dec::inx(cpu),
        Iny => inc_dec::iny(cpu),
        Dex => inc_dec::dex(cpu),
        Dey => inc_dec::dey(cpu),

        Tax => transfer::tax(cpu),
        Tay => transfer::tay(cpu),
        Txa => transfer::txa(cpu),
        Tya => transfer::tya(cpu),
        Tsx => transfer::tsx(cpu),
        Txs => transfer::txs(cpu),

        Pha => stack::pha(cpu, bus),
        Php => stack::php(cpu, bus),
        Pla => stack::pla(cpu, bus),
        Plp => stack::plp(cpu, bus),

        Clc => cpu.set_flag(C, false),
        Sec => cpu.set_flag(C, true),
        Cli => cpu.set_flag(I, false),
        Sei => cpu.set_flag(I, true),
        Cld => cpu.set_flag(D, false),
        Sed => cpu.set_flag(D, true),
        Clv => cpu.set_flag(V, false),

        Bcc => branches::branch(cpu, operand, C, false),
        Bcs => branches::branch(cpu, operand, C, true),
        Bne => branches::branch(cpu, operand, Z, false),
        Beq => branches::branch(cpu, operand, Z, true),
        Bpl => branches::branch(cpu, operand, N, false),
        Bmi => branches::branch(cpu, operand, N, true),
        Bvc => branches::branch(cpu, operand, V, false),
        Bvs => branches::branch(cpu, operand, V, true),

        Jmp => control::jmp(cpu, operand),
        Jsr => control::jsr(cpu, bus, operand),
        Rts => control::rts(cpu, bus),
        Rti => control::rti(cpu, bus),
        Brk => control::brk(cpu, bus),
        Jam => control::jam(cpu),

        Slo => illegal::slo(cpu, bus, operand),
        Rla => illegal::rla(cpu, bus, operand),
        Sre => illegal::sre(cpu, bus, operand),
        Rra => illegal::rra(cpu, bus, operand),
        Sax => illegal::sax(cpu, bus, operand),
        Lax => illegal::lax(cpu, bus, operand),
        Dcp => illegal::dcp(cpu, bus, operand),
        Isc => illegal::isc(cpu, bus, operand),
        Anc => illegal::anc(cpu, bus, operand),
        Alr => illegal::alr(cpu, bus, operand),
        Arr => illegal::arr(cpu, bus, operand),
        Axs => illegal::axs(cpu, bus, operand),

        // Operand bytes were consumed during resolution; nothing else happens.
        Nop | Unstable => {}
    }
}
