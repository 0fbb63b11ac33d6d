//! The C64 bus and the machine built on it.

mod c64_bus;
mod c64_system;

pub use c64_bus::{C64Bus, RomError, BASIC_SIZE, CHAR_ROM_SIZE, KERNAL_SIZE, RAM_SIZE};
pub use c64_system::{boot, hard_reset, run_frames, Region, C64};
