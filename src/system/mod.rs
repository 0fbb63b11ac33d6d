//! Complete systems: a bus with its chips plus a CPU, driven by [`Computer`].
//!
//! A [`Machine`] is a bus that also knows its own timing (how many chip
//! clocks one CPU cycle is worth), how to take a ROM image and whether its
//! IRQ line is asserted. [`Computer`] is generic over it, so the console and
//! the flat test system share one stepping loop.

pub mod atari2600;
pub mod computer;

pub use atari2600::{Atari2600, Atari2600Bus};
pub use computer::Computer;

use crate::bus::{Bus, FlatBus};

/// A bus that can be driven by a [`Computer`].
pub trait Machine: Bus {
    /// Advances peripherals after the CPU has spent `cpu_cycles`.
    fn advance(&mut self, cpu_cycles: u32);

    /// Copies a program image into the machine's program store.
    ///
    /// Never fails: at most the store's capacity is copied and the remainder
    /// keeps its previous contents.
    fn load_rom(&mut self, bytes: &[u8]);

    /// Level of the shared IRQ line.
    fn irq_active(&self) -> bool {
        false
    }
}

impl Machine for FlatBus {
    fn advance(&mut self, _cpu_cycles: u32) {}

    /// Copies the image to `$0000` upward.
    fn load_rom(&mut self, bytes: &[u8]) {
        self.memory_mut().copy_from(bytes);
    }
}

/// Flat 64 KiB RAM system used for running bare CPU programs.
pub type TestComputer = Computer<FlatBus>;
