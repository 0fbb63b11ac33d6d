//! # Address-space abstraction
//!
//! The CPU sees the world only through [`Bus`]. A bus owns its memories and
//! peripherals and decodes each CPU address to exactly one of them; the decode
//! must be total, so unmapped space resolves to a fill value instead of an
//! error.
//!
//! Word reads and observer fan-out are free functions over the two required
//! byte operations rather than trait defaults, so no bus can override them
//! with different semantics.

use std::rc::Rc;

use crate::memory::{Memory, WriteObserver};

/// A named backing store, as exposed to debugger and viewer tooling.
#[derive(Debug, Clone, Copy)]
pub struct MemoryRegion<'a> {
    pub name: &'static str,
    pub memory: &'a Memory,
}

/// CPU-visible address space.
///
/// `load` takes `&mut self` because reads from chip registers can have side
/// effects (clearing an interrupt flag, for instance).
///
/// # Examples
///
/// ```
/// use retro6502::{Bus, FlatBus};
///
/// let mut bus = FlatBus::new();
/// bus.store(0x1234, 0x42);
/// assert_eq!(bus.load(0x1234), 0x42);
/// assert_eq!(retro6502::bus::load_word(&mut bus, 0x1234), 0x0042);
/// ```
pub trait Bus {
    /// Reads one byte. Never fails; unmapped addresses return a fill value.
    fn load(&mut self, addr: u16) -> u8;

    /// Writes one byte. Writes to read-only or unmapped space are dropped.
    fn store(&mut self, addr: u16, value: u8);

    /// Every backing memory, in a stable order.
    fn enum_memory(&self) -> Vec<MemoryRegion<'_>>;
}

/// Little-endian word as two consecutive byte loads.
///
/// No page handling: the high byte is read from `addr + 1`, wrapping only at
/// the top of the 16-bit space.
pub fn load_word<M: Bus + ?Sized>(bus: &mut M, addr: u16) -> u16 {
    let lo = bus.load(addr) as u16;
    let hi = bus.load(addr.wrapping_add(1)) as u16;
    (hi << 8) | lo
}

/// Little-endian word whose high byte is fetched from the same page.
///
/// Reproduces the NMOS `JMP ($xxFF)` behaviour and zero-page pointer wrap.
pub fn load_word_page_wrapped<M: Bus + ?Sized>(bus: &mut M, addr: u16) -> u16 {
    let lo = bus.load(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.load(hi_addr) as u16;
    (hi << 8) | lo
}

/// Subscribes `observer` to every memory the bus exposes.
pub fn observe_all<M: Bus + ?Sized>(bus: &M, observer: &Rc<dyn WriteObserver>) {
    for region in bus.enum_memory() {
        region.memory.add_observer(observer);
    }
}

/// Looks up a region by name.
pub fn find_memory<'a, M: Bus + ?Sized>(bus: &'a M, name: &str) -> Option<&'a Memory> {
    bus.enum_memory()
        .into_iter()
        .find(|region| region.name == name)
        .map(|region| region.memory)
}

/// A bus with a single 64 KiB RAM and no decoding at all.
///
/// Used by tests and for running bare CPU programs.
#[derive(Debug)]
pub struct FlatBus {
    ram: Memory,
}

impl FlatBus {
    pub const NAME: &'static str = "Test Memory";

    pub fn new() -> Self {
        Self {
            ram: Memory::new(0x10000),
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.ram
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.ram
    }
}

impl Default for FlatBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FlatBus {
    #[inline]
    fn load(&mut self, addr: u16) -> u8 {
        self.ram.load(addr)
    }

    #[inline]
    fn store(&mut self, addr: u16, value: u8) {
        self.ram.store(addr, value)
    }

    fn enum_memory(&self) -> Vec<MemoryRegion<'_>> {
        vec![MemoryRegion {
            name: Self::NAME,
            memory: &self.ram,
        }]
    }
}
