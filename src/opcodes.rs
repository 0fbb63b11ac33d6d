//! # Opcode Table
//!
//! The 256-entry decode table for the NMOS 6502. It is the single source of
//! truth for mnemonic, addressing mode and nominal cycle cost of every opcode
//! byte, including the undocumented ones.
//!
//! Runtime penalties (indexed page crossing, taken branches, decimal mode) are
//! not baked in here; the CPU adds them while executing.

use std::fmt;

use crate::addressing::AddressingMode;

/// Operation performed by an opcode.
///
/// Covers the 56 documented instructions, the stable undocumented
/// combinations, the `JAM` lock-up family and a catch-all for the unstable
/// undocumented slots (`XAA`, `AHX`, `TAS`, `SHY`, `SHX`, `LXA`, `LAS`) whose
/// results depend on analogue effects and which execute as no-ops here.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,

    // Undocumented, stable
    Slo, Rla, Sre, Rra, Sax, Lax, Dcp, Isc, Anc, Alr, Arr, Axs,

    Jam,
    Unstable,
}

impl Mnemonic {
    /// Three-letter assembler name. Unstable slots render as `???`.
    #[rustfmt::skip]
    pub fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA", Slo => "SLO", Rla => "RLA", Sre => "SRE", Rra => "RRA",
            Sax => "SAX", Lax => "LAX", Dcp => "DCP", Isc => "ISC", Anc => "ANC",
            Alr => "ALR", Arr => "ARR", Axs => "AXS", Jam => "JAM", Unstable => "???",
        }
    }

    /// Whether an indexed page crossing costs this operation an extra cycle.
    ///
    /// Only pure reads pay it at runtime. Stores and read-modify-write forms
    /// always perform the dummy access, so their table cost already includes it.
    pub fn page_cross_penalty(self) -> bool {
        use Mnemonic::*;
        matches!(
            self,
            Adc | And | Cmp | Eor | Lda | Ldx | Ldy | Ora | Sbc | Lax | Nop
        )
    }

    /// True for opcodes outside the documented instruction set.
    pub fn is_undocumented(self) -> bool {
        use Mnemonic::*;
        matches!(
            self,
            Slo | Rla | Sre | Rra | Sax | Lax | Dcp | Isc | Anc | Alr | Arr | Axs | Jam | Unstable
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static decode information for one opcode byte.
///
/// # Examples
///
/// ```
/// use retro6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Nominal cost, before page-cross, branch and decimal penalties.
    pub base_cycles: u8,
}

impl Opcode {
    /// Instruction length in bytes, opcode included.
    pub const fn size(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, base_cycles: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        base_cycles,
    }
}

use AddressingMode::*;
use Mnemonic::*;

/// Decode table indexed by opcode byte.
#[rustfmt::skip]
pub const OPCODE_TABLE: [Opcode; 256] = [
    // 0x00
    op(Brk, Implicit, 7),
    op(Ora, IndirectX, 6),
    op(Jam, Implicit, 2),
    op(Slo, IndirectX, 8),
    op(Nop, ZeroPage, 3),
    op(Ora, ZeroPage, 3),
    op(Asl, ZeroPage, 5),
    op(Slo, ZeroPage, 5),
    op(Php, Implicit, 3),
    op(Ora, Immediate, 2),
    op(Asl, Accumulator, 2),
    op(Anc, Immediate, 2),
    op(Nop, Absolute, 4),
    op(Ora, Absolute, 4),
    op(Asl, Absolute, 6),
    op(Slo, Absolute, 6),
    // 0x10
    op(Bpl, Relative, 2),
    op(Ora, IndirectY, 5),
    op(Jam, Implicit, 2),
    op(Slo, IndirectY, 8),
    op(Nop, ZeroPageX, 4),
    op(Ora, ZeroPageX, 4),
    op(Asl, ZeroPageX, 6),
    op(Slo, ZeroPageX, 6),
    op(Clc, Implicit, 2),
    op(Ora, AbsoluteY, 4),
    op(Nop, Implicit, 2),
    op(Slo, AbsoluteY, 7),
    op(Nop, AbsoluteX, 4),
    op(Ora, AbsoluteX, 4),
    op(Asl, AbsoluteX, 7),
    op(Slo, AbsoluteX, 7),
    // 0x20
    op(Jsr, Absolute, 6),
    op(And, IndirectX, 6),
    op(Jam, Implicit, 2),
    op(Rla, IndirectX, 8),
    op(Bit, ZeroPage, 3),
    op(And, ZeroPage, 3),
    op(Rol, ZeroPage, 5),
    op(Rla, ZeroPage, 5),
    op(Plp, Implicit, 4),
    op(And, Immediate, 2),
    op(Rol, Accumulator, 2),
    op(Anc, Immediate, 2),
    op(Bit, Absolute, 4),
    op(And, Absolute, 4),
    op(Rol, Absolute, 6),
    op(Rla, Absolute, 6),
    // 0x30
    op(Bmi, Relative, 2),
    op(And, IndirectY, 5),
    op(Jam, Implicit, 2),
    op(Rla, IndirectY, 8),
    op(Nop, ZeroPageX, 4),
    op(And, ZeroPageX, 4),
    op(Rol, ZeroPageX, 6),
    op(Rla, ZeroPageX, 6),
    op(Sec, Implicit, 2),
    op(And, AbsoluteY, 4),
    op(Nop, Implicit, 2),
    op(Rla, AbsoluteY, 7),
    op(Nop, AbsoluteX, 4),
    op(And, AbsoluteX, 4),
    op(Rol, AbsoluteX, 7),
    op(Rla, AbsoluteX, 7),
    // 0x40
    op(Rti, Implicit, 6),
    op(Eor, IndirectX, 6),
    op(Jam, Implicit, 2),
    op(Sre, IndirectX, 8),
    op(Nop, ZeroPage, 3),
    op(Eor, ZeroPage, 3),
    op(Lsr, ZeroPage, 5),
    op(Sre, ZeroPage, 5),
    op(Pha, Implicit, 3),
    op(Eor, Immediate, 2),
    op(Lsr, Accumulator, 2),
    op(Alr, Immediate, 2),
    op(Jmp, Absolute, 3),
    op(Eor, Absolute, 4),
    op(Lsr, Absolute, 6),
    op(Sre, Absolute, 6),
    // 0x50
    op(Bvc, Relative, 2),
    op(Eor, IndirectY, 5),
    op(Jam, Implicit, 2),
    op(Sre, IndirectY, 8),
    op(Nop, ZeroPageX, 4),
    op(Eor, ZeroPageX, 4),
    op(Lsr, ZeroPageX, 6),
    op(Sre, ZeroPageX, 6),
    op(Cli, Implicit, 2),
    op(Eor, AbsoluteY, 4),
    op(Nop, Implicit, 2),
    op(Sre, AbsoluteY, 7),
    op(Nop, AbsoluteX, 4),
    op(Eor, AbsoluteX, 4),
    op(Lsr, AbsoluteX, 7),
    op(Sre, AbsoluteX, 7),
    // 0x60
    op(Rts, Implicit, 6),
    op(Adc, IndirectX, 6),
    op(Jam, Implicit, 2),
    op(Rra, IndirectX, 8),
    op(Nop, ZeroPage, 3),
    op(Adc, ZeroPage, 3),
    op(Ror, ZeroPage, 5),
    op(Rra, ZeroPage, 5),
    op(Pla, Implicit, 4),
    op(Adc, Immediate, 2),
    op(Ror, Accumulator, 2),
    op(Arr, Immediate, 2),
    op(Jmp, Indirect, 5),
    op(Adc, Absolute, 4),
    op(Ror, Absolute, 6),
    op(Rra, Absolute, 6),
    // 0x70
    op(Bvs, Relative, 2),
    op(Adc, IndirectY, 5),
    op(Jam, Implicit, 2),
    op(Rra, IndirectY, 8),
    op(Nop, ZeroPageX, 4),
    op(Adc, ZeroPageX, 4),
    op(Ror, ZeroPageX, 6),
    op(Rra, ZeroPageX, 6),
    op(Sei, Implicit, 2),
    op(Adc, AbsoluteY, 4),
    op(Nop, Implicit, 2),
    op(Rra, AbsoluteY, 7),
    op(Nop, AbsoluteX, 4),
    op(Adc, AbsoluteX, 4),
    op(Ror, AbsoluteX, 7),
    op(Rra, AbsoluteX, 7),
    // 0x80
    op(Nop, Immediate, 2),
    op(Sta, IndirectX, 6),
    op(Nop, Immediate, 2),
    op(Sax, IndirectX, 6),
    op(Sty, ZeroPage, 3),
    op(Sta, ZeroPage, 3),
    op(Stx, ZeroPage, 3),
    op(Sax, ZeroPage, 3),
    op(Dey, Implicit, 2),
    op(Nop, Immediate, 2),
    op(Txa, Implicit, 2),
    op(Unstable, Immediate, 2),
    op(Sty, Absolute, 4),
    op(Sta, Absolute, 4),
    op(Stx, Absolute, 4),
    op(Sax, Absolute, 4),
    // 0x90
    op(Bcc, Relative, 2),
    op(Sta, IndirectY, 6),
    op(Jam, Implicit, 2),
    op(Unstable, IndirectY, 6),
    op(Sty, ZeroPageX, 4),
    op(Sta, ZeroPageX, 4),
    op(Stx, ZeroPageY, 4),
    op(Sax, ZeroPageY, 4),
    op(Tya, Implicit, 2),
    op(Sta, AbsoluteY, 5),
    op(Txs, Implicit, 2),
    op(Unstable, AbsoluteY, 5),
    op(Unstable, AbsoluteX, 5),
    op(Sta, AbsoluteX, 5),
    op(Unstable, AbsoluteY, 5),
    op(Unstable, AbsoluteY, 5),
    // 0xA0
    op(Ldy, Immediate, 2),
    op(Lda, IndirectX, 6),
    op(Ldx, Immediate, 2),
    op(Lax, IndirectX, 6),
    op(Ldy, ZeroPage, 3),
    op(Lda, ZeroPage, 3),
    op(Ldx, ZeroPage, 3),
    op(Lax, ZeroPage, 3),
    op(Tay, Implicit, 2),
    op(Lda, Immediate, 2),
    op(Tax, Implicit, 2),
    op(Unstable, Immediate, 2),
    op(Ldy, Absolute, 4),
    op(Lda, Absolute, 4),
    op(Ldx, Absolute, 4),
    op(Lax, Absolute, 4),
    // 0xB0
    op(Bcs, Relative, 2),
    op(Lda, IndirectY, 5),
    op(Jam, Implicit, 2),
    op(Lax, IndirectY, 5),
    op(Ldy, ZeroPageX, 4),
    op(Lda, ZeroPageX, 4),
    op(Ldx, ZeroPageY, 4),
    op(Lax, ZeroPageY, 4),
    op(Clv, Implicit, 2),
    op(Lda, AbsoluteY, 4),
    op(Tsx, Implicit, 2),
    op(Unstable, AbsoluteY, 4),
    op(Ldy, AbsoluteX, 4),
    op(Lda, AbsoluteX, 4),
    op(Ldx, AbsoluteY, 4),
    op(Lax, AbsoluteY, 4),
    // 0xC0
    op(Cpy, Immediate, 2),
    op(Cmp, IndirectX, 6),
    op(Nop, Immediate, 2),
    op(Dcp, IndirectX, 8),
    op(Cpy, ZeroPage, 3),
    op(Cmp, ZeroPage, 3),
    op(Dec, ZeroPage, 5),
    op(Dcp, ZeroPage, 5),
    op(Iny, Implicit, 2),
    op(Cmp, Immediate, 2),
    op(Dex, Implicit, 2),
    op(Axs, Immediate, 2),
    op(Cpy, Absolute, 4),
    op(Cmp, Absolute, 4),
    op(Dec, Absolute, 6),
    op(Dcp, Absolute, 6),
    // 0xD0
    op(Bne, Relative, 2),
    op(Cmp, IndirectY, 5),
    op(Jam, Implicit, 2),
    op(Dcp, IndirectY, 8),
    op(Nop, ZeroPageX, 4),
    op(Cmp, ZeroPageX, 4),
    op(Dec, ZeroPageX, 6),
    op(Dcp, ZeroPageX, 6),
    op(Cld, Implicit, 2),
    op(Cmp, AbsoluteY, 4),
    op(Nop, Implicit, 2),
    op(Dcp, AbsoluteY, 7),
    op(Nop, AbsoluteX, 4),
    op(Cmp, AbsoluteX, 4),
    op(Dec, AbsoluteX, 7),
    op(Dcp, AbsoluteX, 7),
    // 0xE0
    op(Cpx, Immediate, 2),
    op(Sbc, IndirectX, 6),
    op(Nop, Immediate, 2),
    op(Isc, IndirectX, 8),
    op(Cpx, ZeroPage, 3),
    op(Sbc, ZeroPage, 3),
    op(Inc, ZeroPage, 5),
    op(Isc, ZeroPage, 5),
    op(Inx, Implicit, 2),
    op(Sbc, Immediate, 2),
    op(Nop, Implicit, 2),
    op(Sbc, Immediate, 2),
    op(Cpx, Absolute, 4),
    op(Sbc, Absolute, 4),
    op(Inc, Absolute, 6),
    op(Isc, Absolute, 6),
    // 0xF0
    op(Beq, Relative, 2),
    op(Sbc, IndirectY, 5),
    op(Jam, Implicit, 2),
    op(Isc, IndirectY, 8),
    op(Nop, ZeroPageX, 4),
    op(Sbc, ZeroPageX, 4),
    op(Inc, ZeroPageX, 6),
    op(Isc, ZeroPageX, 6),
    op(Sed, Implicit, 2),
    op(Sbc, AbsoluteY, 4),
    op(Nop, Implicit, 2),
    op(Isc, AbsoluteY, 7),
    op(Nop, AbsoluteX, 4),
    op(Sbc, AbsoluteX, 4),
    op(Inc, AbsoluteX, 7),
    op(Isc, AbsoluteX, 7),

];
