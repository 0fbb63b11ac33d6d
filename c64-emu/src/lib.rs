//! # Commodore 64 Bus
//!
//! A partial Commodore 64 built on the retro6502 CPU core: the banked
//! address space and the chips behind it, enough to boot a KERNAL image
//! and run code that talks to the timers.
//!
//! ## Architecture
//!
//! The C64's hardware is modelled as `retro6502::Device` chips behind a
//! [`C64Bus`], which implements `retro6502::Machine` so the generic
//! `Computer` can drive it:
//!
//! - **VIC-II**: register stub with the raster counter and raster IRQ
//! - **SID**: register stub
//! - **CIA**: I/O ports, interval timers, interrupt control
//! - **Port 6510**: the CPU's own port, which selects the memory banks
//! - **Color RAM**: 1 KiB of 4-bit colour memory
//!
//! ## Quick Start
//!
//! ```rust
//! use c64_emu::{boot, Region, BASIC_SIZE, CHAR_ROM_SIZE, KERNAL_SIZE};
//!
//! // Stand-in KERNAL: reset vector -> $E000, JMP $E000
//! let mut kernal = vec![0xEA; KERNAL_SIZE];
//! kernal[..3].copy_from_slice(&[0x4C, 0x00, 0xE0]);
//! kernal[0x1FFC] = 0x00;
//! kernal[0x1FFD] = 0xE0;
//!
//! let mut c64 = boot(Region::PAL, &[0; BASIC_SIZE], &kernal, &[0; CHAR_ROM_SIZE]).unwrap();
//! c64.run_for_cycles(30);
//! assert_eq!(c64.cpu().pc(), 0xE000);
//! ```
//!
//! ## Module Organization
//!
//! - `devices`: the chips
//! - `system`: bus decoding, ROM installation and the `C64` machine type

pub mod devices;
pub mod system;

pub use devices::{Cia6526, ColorRam, Port6510, Sid6581, VicII};
pub use system::{
    boot, hard_reset, run_frames, C64Bus, Region, RomError, BASIC_SIZE, C64, CHAR_ROM_SIZE, KERNAL_SIZE,
    RAM_SIZE,
};
