//! # Addressing Modes
//!
//! The 13 NMOS 6502 addressing modes. Effective-address resolution lives in
//! [`crate::cpu`]; this module only carries the operand width the opcode
//! table derives instruction sizes from.

/// How an instruction locates its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand (`CLC`, `RTS`)
    Implicit,

    /// Operates on A (`ASL A`)
    Accumulator,

    /// Operand is the byte after the opcode (`LDA #$10`)
    Immediate,

    /// 8-bit address in page zero (`LDA $10`)
    ZeroPage,

    /// Zero page + X, wrapping inside page zero (`LDA $10,X`)
    ZeroPageX,

    /// Zero page + Y, wrapping inside page zero (`LDX $10,Y`)
    ZeroPageY,

    /// Signed 8-bit branch displacement (`BEQ label`)
    Relative,

    /// Full 16-bit address (`LDA $1234`)
    Absolute,

    /// Absolute + X, one extra cycle on page cross for reads (`LDA $1234,X`)
    AbsoluteX,

    /// Absolute + Y, one extra cycle on page cross for reads (`LDA $1234,Y`)
    AbsoluteY,

    /// JMP only: 16-bit pointer, high byte fetched within the pointer's page (`JMP ($1234)`)
    Indirect,

    /// Pointer at (zp + X) in page zero (`LDA ($10,X)`)
    IndirectX,

    /// Pointer at zp, then + Y (`LDA ($10),Y`)
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}
