//! C64 chips implementing the `retro6502::Device` trait.
//!
//! - [`VicII`]: MOS 6569/6567 register stub with the raster counter
//! - [`Sid6581`]: MOS 6581 register stub
//! - [`Cia6526`]: MOS 6526 ports, timers and interrupt control
//! - [`Port6510`]: the 6510's on-chip port that drives memory banking
//! - [`ColorRam`]: 1 KiB of 4-bit colour memory

pub mod cia;
pub mod color_ram;
pub mod port_6510;
pub mod sid;
pub mod vic_ii;

pub use cia::{Cia6526, CiaType};
pub use color_ram::ColorRam;
pub use port_6510::Port6510;
pub use sid::Sid6581;
pub use vic_ii::VicII;
