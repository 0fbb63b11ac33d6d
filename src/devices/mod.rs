//! Memory-mapped peripherals and a generic range-mapped bus.
//!
//! # Architecture
//!
//! - **Device trait**: a chip with a small local register file and a clock.
//!   It never sees CPU addresses, only the offset a bus routes to it.
//! - **MappedBus**: a [`Bus`] assembled at runtime from named memories and
//!   devices placed at base addresses, with overlap checking.
//! - **Chips**: the RIOT (6532) and a TIA stub used by the Atari 2600 bus.
//!
//! # Example
//!
//! ```rust
//! use retro6502::{Access, Bus, MappedBus, Memory};
//!
//! let mut bus = MappedBus::new();
//! bus.map_memory(0x0000, 0x4000, "RAM", Memory::new(0x4000), Access::ReadWrite).unwrap();
//! bus.map_memory(0xC000, 0x4000, "ROM", Memory::new(0x4000), Access::ReadOnly).unwrap();
//!
//! bus.store(0x1234, 0x42);
//! assert_eq!(bus.load(0x1234), 0x42);
//!
//! bus.store(0xC000, 0x42); // dropped
//! assert_eq!(bus.load(0xC000), 0x00);
//!
//! assert_eq!(bus.load(0x8000), 0xFF); // unmapped
//! ```

use thiserror::Error;

use crate::bus::{Bus, MemoryRegion};
use crate::memory::Memory;
use crate::system::Machine;

pub mod riot;
pub mod tia;

pub use riot::Riot;
pub use tia::Tia;

/// A clocked peripheral with chip-local registers.
///
/// `read` takes `&mut self` because real chips acknowledge interrupts or
/// latch values on read.
///
/// # Examples
///
/// ```rust
/// use retro6502::Device;
///
/// struct Counter {
///     ticks: u8,
/// }
///
/// impl Device for Counter {
///     fn read(&mut self, _offset: u16) -> u8 {
///         self.ticks
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.ticks = value;
///     }
///
///     fn tick(&mut self) {
///         self.ticks = self.ticks.wrapping_add(1);
///     }
/// }
///
/// let mut counter = Counter { ticks: 0 };
/// counter.tick_n(3);
/// assert_eq!(counter.read(0), 3);
/// ```
pub trait Device {
    /// Reads the register at a chip-local offset.
    fn read(&mut self, offset: u16) -> u8;

    /// Writes the register at a chip-local offset.
    fn write(&mut self, offset: u16, value: u8);

    /// Advances the chip by one of its own clock cycles.
    fn tick(&mut self);

    /// Advances the chip by `n` cycles.
    fn tick_n(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Level of the chip's interrupt output.
    fn irq_active(&self) -> bool {
        false
    }
}

/// Whether CPU writes reach a mapped memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    /// Writes are silently discarded.
    ReadOnly,
}

/// Error returned when a range cannot be added to a [`MappedBus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error(
        "{name} at ${base:04X}-${end:04X} overlaps {existing} at ${existing_base:04X}-${existing_end:04X}"
    )]
    Overlap {
        name: &'static str,
        base: u16,
        end: u16,
        existing: &'static str,
        existing_base: u16,
        existing_end: u16,
    },

    #[error("{name} at ${base:04X} with span {span:#X} runs past $FFFF")]
    OutOfRange {
        name: &'static str,
        base: u16,
        span: u32,
    },

    #[error("{name} has an empty span")]
    Empty { name: &'static str },
}

enum Target {
    Memory { memory: Memory, access: Access },
    Device { device: Box<dyn Device>, registers: u16 },
}

struct Mapping {
    name: &'static str,
    base: u16,
    span: u32,
    target: Target,
}

impl Mapping {
    fn end(&self) -> u16 {
        (self.base as u32 + self.span - 1) as u16
    }

    fn contains(&self, addr: u16) -> bool {
        addr >= self.base && (addr as u32) < self.base as u32 + self.span
    }
}

/// A bus built from ranges registered at runtime.
///
/// Memories mirror across their span when the span exceeds their capacity;
/// devices mirror every `registers` bytes. Reads from unmapped addresses
/// return the configured fill value (0xFF by default) and unmapped writes are
/// dropped, so decode stays total.
pub struct MappedBus {
    mappings: Vec<Mapping>,
    unmapped_value: u8,
}

impl MappedBus {
    pub fn new() -> Self {
        Self {
            mappings: Vec::new(),
            unmapped_value: 0xFF,
        }
    }

    /// Sets the byte returned for unmapped reads.
    pub fn with_unmapped_value(mut self, value: u8) -> Self {
        self.unmapped_value = value;
        self
    }

    pub fn unmapped_value(&self) -> u8 {
        self.unmapped_value
    }

    /// Places `memory` at `base..base + span`.
    pub fn map_memory(
        &mut self,
        base: u16,
        span: u32,
        name: &'static str,
        memory: Memory,
        access: Access,
    ) -> Result<(), MapError> {
        self.insert(Mapping {
            name,
            base,
            span,
            target: Target::Memory { memory, access },
        })
    }

    /// Places `device` at `base..base + span`, its `registers` mirrored
    /// across the whole span.
    pub fn map_device(
        &mut self,
        base: u16,
        span: u32,
        registers: u16,
        name: &'static str,
        device: Box<dyn Device>,
    ) -> Result<(), MapError> {
        let registers = registers.max(1);
        self.insert(Mapping {
            name,
            base,
            span,
            target: Target::Device { device, registers },
        })
    }

    fn insert(&mut self, mapping: Mapping) -> Result<(), MapError> {
        let name = mapping.name;
        if mapping.span == 0 {
            return Err(MapError::Empty { name });
        }
        if mapping.base as u32 + mapping.span > 0x1_0000 {
            return Err(MapError::OutOfRange {
                name,
                base: mapping.base,
                span: mapping.span,
            });
        }

        // Half-open ranges [base, base + span)
        let start = mapping.base as u32;
        let end = start + mapping.span;
        for existing in &self.mappings {
            let existing_start = existing.base as u32;
            let existing_end = existing_start + existing.span;
            if start < existing_end && end > existing_start {
                return Err(MapError::Overlap {
                    name,
                    base: mapping.base,
                    end: mapping.end(),
                    existing: existing.name,
                    existing_base: existing.base,
                    existing_end: existing.end(),
                });
            }
        }

        self.mappings.push(mapping);
        Ok(())
    }

    fn find(&mut self, addr: u16) -> Option<&mut Mapping> {
        self.mappings.iter_mut().find(|m| m.contains(addr))
    }

    /// Ticks every mapped device `n` times.
    pub fn tick_devices(&mut self, n: u32) {
        for mapping in &mut self.mappings {
            if let Target::Device { device, .. } = &mut mapping.target {
                device.tick_n(n);
            }
        }
    }
}

impl Default for MappedBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for MappedBus {
    fn load(&mut self, addr: u16) -> u8 {
        let unmapped = self.unmapped_value;
        match self.find(addr) {
            Some(mapping) => {
                let offset = addr - mapping.base;
                match &mut mapping.target {
                    Target::Memory { memory, .. } => memory.load(offset),
                    Target::Device { device, registers } => device.read(offset % *registers),
                }
            }
            None => unmapped,
        }
    }

    fn store(&mut self, addr: u16, value: u8) {
        let Some(mapping) = self.find(addr) else {
            return;
        };
        let offset = addr - mapping.base;
        match &mut mapping.target {
            Target::Memory {
                memory,
                access: Access::ReadWrite,
            } => memory.store(offset, value),
            Target::Memory { .. } => {}
            Target::Device { device, registers } => device.write(offset % *registers, value),
        }
    }

    fn enum_memory(&self) -> Vec<MemoryRegion<'_>> {
        self.mappings
            .iter()
            .filter_map(|mapping| match &mapping.target {
                Target::Memory { memory, .. } => Some(MemoryRegion {
                    name: mapping.name,
                    memory,
                }),
                Target::Device { .. } => None,
            })
            .collect()
    }
}

impl Machine for MappedBus {
    /// One device tick per CPU cycle.
    fn advance(&mut self, cpu_cycles: u32) {
        self.tick_devices(cpu_cycles);
    }

    /// Copies the image into the first read-only memory, if there is one.
    fn load_rom(&mut self, bytes: &[u8]) {
        let rom = self.mappings.iter_mut().find_map(|mapping| match &mut mapping.target {
            Target::Memory {
                memory,
                access: Access::ReadOnly,
            } => Some(memory),
            _ => None,
        });
        match rom {
            Some(memory) => {
                if bytes.len() != memory.capacity() {
                    log::warn!(
                        "ROM image is {} bytes, destination holds {}",
                        bytes.len(),
                        memory.capacity()
                    );
                }
                memory.copy_from(bytes);
            }
            None => log::warn!("no read-only region mapped, ROM image ignored"),
        }
    }

    fn irq_active(&self) -> bool {
        self.mappings.iter().any(|mapping| match &mapping.target {
            Target::Device { device, .. } => device.irq_active(),
            Target::Memory { .. } => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch {
        regs: [u8; 4],
        ticks: u32,
    }

    impl Device for Latch {
        fn read(&mut self, offset: u16) -> u8 {
            self.regs[offset as usize]
        }

        fn write(&mut self, offset: u16, value: u8) {
            self.regs[offset as usize] = value;
        }

        fn tick(&mut self) {
            self.ticks += 1;
        }

        fn irq_active(&self) -> bool {
            self.regs[3] != 0
        }
    }

    #[test]
    fn test_empty_bus_reads_fill_value() {
        let mut bus = MappedBus::new();
        assert_eq!(bus.load(0x0000), 0xFF);
        assert_eq!(bus.load(0xFFFF), 0xFF);

        let mut bus = MappedBus::new().with_unmapped_value(0x00);
        assert_eq!(bus.load(0x1234), 0x00);
        bus.store(0x1234, 0x55);
        assert_eq!(bus.load(0x1234), 0x00);
    }

    #[test]
    fn test_memory_mirrors_across_span() {
        let mut bus = MappedBus::new();
        bus.map_memory(0x0000, 0x2000, "RAM", Memory::new(0x800), Access::ReadWrite)
            .unwrap();
        bus.store(0x0001, 0x42);
        assert_eq!(bus.load(0x0801), 0x42);
        assert_eq!(bus.load(0x1801), 0x42);
        assert_eq!(bus.load(0x2001), 0xFF);
    }

    #[test]
    fn test_device_registers_mirror() {
        let mut bus = MappedBus::new();
        let latch = Latch { regs: [0; 4], ticks: 0 };
        bus.map_device(0xD000, 0x100, 4, "Latch", Box::new(latch)).unwrap();

        bus.store(0xD001, 0x77);
        assert_eq!(bus.load(0xD005), 0x77);
        assert_eq!(bus.load(0xD0FD), 0x77);
    }

    #[test]
    fn test_overlap_rejected() {
        let mut bus = MappedBus::new();
        bus.map_memory(0x1000, 0x100, "A", Memory::new(0x100), Access::ReadWrite)
            .unwrap();
        let err = bus
            .map_memory(0x10FF, 0x10, "B", Memory::new(0x10), Access::ReadWrite)
            .unwrap_err();
        assert_eq!(
            err,
            MapError::Overlap {
                name: "B",
                base: 0x10FF,
                end: 0x110E,
                existing: "A",
                existing_base: 0x1000,
                existing_end: 0x10FF,
            }
        );
        assert_eq!(
            err.to_string(),
            "B at $10FF-$110E overlaps A at $1000-$10FF"
        );

        // Adjacent is fine
        bus.map_memory(0x1100, 0x10, "C", Memory::new(0x10), Access::ReadWrite)
            .unwrap();
    }

    #[test]
    fn test_range_checks() {
        let mut bus = MappedBus::new();
        assert_eq!(
            bus.map_memory(0xFF00, 0x101, "X", Memory::new(1), Access::ReadOnly),
            Err(MapError::OutOfRange {
                name: "X",
                base: 0xFF00,
                span: 0x101
            })
        );
        assert_eq!(
            bus.map_memory(0x0000, 0, "Y", Memory::new(1), Access::ReadOnly),
            Err(MapError::Empty { name: "Y" })
        );
        // The full top page is allowed
        bus.map_memory(0xFF00, 0x100, "Top", Memory::new(0x100), Access::ReadOnly)
            .unwrap();
        assert_eq!(bus.load(0xFFFF), 0x00);
    }

    #[test]
    fn test_machine_hooks() {
        let mut bus = MappedBus::new();
        bus.map_memory(0xF000, 0x1000, "ROM", Memory::new(0x1000), Access::ReadOnly)
            .unwrap();
        bus.map_device(0x0200, 4, 4, "Latch", Box::new(Latch { regs: [0; 4], ticks: 0 }))
            .unwrap();

        bus.load_rom(&[0xEA, 0xEA]);
        assert_eq!(bus.load(0xF001), 0xEA);
        assert!(!bus.irq_active());

        bus.store(0x0203, 1);
        assert!(bus.irq_active());

        assert_eq!(bus.enum_memory().len(), 1);
        assert_eq!(bus.enum_memory()[0].name, "ROM");
    }
}
