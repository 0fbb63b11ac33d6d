//! # retro6502
//!
//! An NMOS 6502/6507 instruction engine plus the memory-mapped buses that
//! give it a world to run in.
//!
//! The CPU executes one instruction per [`Mos6502::step`] and reports the
//! cycles it took, including indexed page-crossing, branch and decimal-mode
//! penalties. It reproduces the hardware quirks that programs depend on: the
//! zero-page index wrap, the `JMP ($xxFF)` page-wrap bug, binary N/V/Z flags
//! in decimal mode and the stable undocumented opcodes. JAM opcodes lock the
//! core until reset.
//!
//! ## Quick Start
//!
//! ```rust
//! use retro6502::{Bus, TestComputer};
//!
//! let mut computer = TestComputer::default();
//!
//! // Reset vector -> $8000
//! computer.bus_mut().store(0xFFFC, 0x00);
//! computer.bus_mut().store(0xFFFD, 0x80);
//!
//! // SED; LDA #$09; CLC; ADC #$01
//! let program = [0xF8, 0xA9, 0x09, 0x18, 0x69, 0x01];
//! for (i, byte) in program.iter().enumerate() {
//!     computer.bus_mut().store(0x8000 + i as u16, *byte);
//! }
//! computer.reset();
//!
//! for _ in 0..4 {
//!     computer.step();
//! }
//! assert_eq!(computer.cpu().a(), 0x10);
//! ```
//!
//! ## Architecture
//!
//! - [`Memory`]: fixed-size byte store, wraparound addressing, write observers
//! - [`Bus`]: address decoding onto memories and peripherals, plus
//!   introspection through [`Bus::enum_memory`]
//! - [`Device`]: a clocked peripheral with chip-local registers
//! - [`Mos6502`]: the instruction engine, owning only registers
//! - [`Computer`]: one bus and one CPU, with system-specific chip timing
//!   supplied by the [`Machine`] trait
//!
//! ## Modules
//!
//! - `cpu` - Register file, fetch/decode/execute, interrupts
//! - `opcodes` - The 256-entry decode table
//! - `addressing` - Addressing mode enumeration
//! - `memory` - Backing stores and write observers
//! - `bus` - The address-space trait and word helpers
//! - `devices` - Peripheral trait, range-mapped bus, RIOT and TIA
//! - `system` - `Computer`, the Atari 2600 and the flat test system
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade: one `trace` line per executed
//! instruction, `debug` on reset and `warn` when the CPU jams or a ROM image
//! has an unexpected size. Install any logger to see them.

pub mod addressing;
pub mod bus;
pub mod cpu;
pub mod devices;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod status;
pub mod system;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use bus::{Bus, FlatBus, MemoryRegion};
pub use cpu::Mos6502;
pub use devices::{Access, Device, MapError, MappedBus};
pub use memory::{Memory, WriteObserver};
pub use opcodes::{Mnemonic, Opcode, OPCODE_TABLE};
pub use registers::Registers;
pub use system::{Atari2600, Atari2600Bus, Computer, Machine, TestComputer};
