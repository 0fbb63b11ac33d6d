//! C64 address space with bank switching.
//!
//! Several ROMs, 64 KiB of RAM and the I/O chips share the upper address
//! space. The 6510 port at $00-$01 chooses what the CPU sees; each access
//! goes to exactly one target:
//!
//! - $0000-$0001: 6510 I/O port
//! - $A000-$BFFF: BASIC ROM when LORAM and HIRAM are set
//! - $D000-$DFFF: I/O when CHAREN is set, character ROM when it is clear,
//!   RAM when LORAM and HIRAM are both clear
//! - $E000-$FFFF: KERNAL ROM when HIRAM is set
//! - everything else: RAM
//!
//! Writes never reach a ROM. They land in the RAM underneath, or in the
//! chips when I/O is visible.

use log::{debug, warn};
use retro6502::{Bus, Device, Machine, Memory, MemoryRegion};
use thiserror::Error;

use crate::devices::{Cia6526, ColorRam, Port6510, Sid6581, VicII};
use crate::system::Region;

pub const RAM_SIZE: usize = 0x10000;
pub const BASIC_SIZE: usize = 0x2000;
pub const KERNAL_SIZE: usize = 0x2000;
pub const CHAR_ROM_SIZE: usize = 0x1000;

const BASIC_START: u16 = 0xA000;
const IO_START: u16 = 0xD000;
const KERNAL_START: u16 = 0xE000;

/// Where a CPU address lands under the current bank configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Select {
    Port(u16),
    Basic(u16),
    Io(u16),
    CharRom(u16),
    Kernal(u16),
    Ram(u16),
}

/// Error returned by [`C64Bus::load_roms`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RomError {
    #[error("{name} ROM must be {expected} bytes, got {actual}")]
    Size {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

fn check_size(name: &'static str, bytes: &[u8], expected: usize) -> Result<(), RomError> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(RomError::Size {
            name,
            expected,
            actual: bytes.len(),
        })
    }
}

/// The C64 bus: memories, the banking port and the I/O chips.
#[derive(Debug)]
pub struct C64Bus {
    ram: Memory,
    basic_rom: Memory,
    kernal_rom: Memory,
    char_rom: Memory,

    pub port: Port6510,
    pub vic: VicII,
    pub sid: Sid6581,
    /// Keyboard, joysticks, IRQ.
    pub cia1: Cia6526,
    /// Serial bus, VIC bank, NMI.
    pub cia2: Cia6526,
    pub color_ram: ColorRam,
}

impl C64Bus {
    /// A powered-on machine with empty ROMs.
    pub fn new(region: Region) -> Self {
        let mut ram = Memory::new(RAM_SIZE);
        // Mirror of the port's power-on DDR and data
        ram.store(0x0000, 0x2F);
        ram.store(0x0001, 0x37);

        Self {
            ram,
            basic_rom: Memory::new(BASIC_SIZE),
            kernal_rom: Memory::new(KERNAL_SIZE),
            char_rom: Memory::new(CHAR_ROM_SIZE),
            port: Port6510::new(),
            vic: VicII::new(region),
            sid: Sid6581::new(),
            cia1: Cia6526::new_cia1(),
            cia2: Cia6526::new_cia2(),
            color_ram: ColorRam::new(),
        }
    }

    /// Installs all three ROM images. Nothing is copied unless every size
    /// is exact.
    pub fn load_roms(&mut self, basic: &[u8], kernal: &[u8], charrom: &[u8]) -> Result<(), RomError> {
        check_size("BASIC", basic, BASIC_SIZE)?;
        check_size("KERNAL", kernal, KERNAL_SIZE)?;
        check_size("Character", charrom, CHAR_ROM_SIZE)?;

        self.basic_rom.copy_from(basic);
        self.kernal_rom.copy_from(kernal);
        self.char_rom.copy_from(charrom);
        debug!("C64 ROMs installed");
        Ok(())
    }

    pub fn ram(&self) -> &Memory {
        &self.ram
    }

    /// Level of CIA2's interrupt output, wired to NMI.
    pub fn nmi_active(&self) -> bool {
        self.cia2.interrupt_pending()
    }

    /// Returns the chips to power-on state and clears RAM. ROMs stay.
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.ram.store(0x0000, 0x2F);
        self.ram.store(0x0001, 0x37);
        self.port = Port6510::new();
        self.vic.reset();
        self.sid.reset();
        self.cia1.reset();
        self.cia2.reset();
        self.color_ram.clear(crate::devices::color_ram::DEFAULT_COLOR);
    }

    /// First match wins, so every address has exactly one target.
    fn decode(&self, addr: u16) -> Select {
        match addr {
            0x0000..=0x0001 => Select::Port(addr),
            BASIC_START..=0xBFFF if self.port.basic_visible() => Select::Basic(addr - BASIC_START),
            IO_START..=0xDFFF if self.port.io_visible() => Select::Io(addr),
            IO_START..=0xDFFF if self.port.char_rom_visible() => Select::CharRom(addr - IO_START),
            KERNAL_START..=0xFFFF if self.port.kernal_visible() => {
                Select::Kernal(addr - KERNAL_START)
            }
            _ => Select::Ram(addr),
        }
    }

    fn read_io(&mut self, addr: u16) -> u8 {
        match addr {
            0xD000..=0xD3FF => self.vic.read(addr & 0x3F),
            0xD400..=0xD7FF => self.sid.read(addr & 0x1F),
            0xD800..=0xDBFF => self.color_ram.read(addr - 0xD800),
            0xDC00..=0xDCFF => self.cia1.read(addr & 0x0F),
            0xDD00..=0xDDFF => self.cia2.read(addr & 0x0F),
            // Expansion port I/O, nothing attached
            _ => 0xFF,
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            0xD000..=0xD3FF => self.vic.write(addr & 0x3F, value),
            0xD400..=0xD7FF => self.sid.write(addr & 0x1F, value),
            0xD800..=0xDBFF => self.color_ram.write(addr - 0xD800, value),
            0xDC00..=0xDCFF => self.cia1.write(addr & 0x0F, value),
            0xDD00..=0xDDFF => self.cia2.write(addr & 0x0F, value),
            _ => {}
        }
    }
}

impl Default for C64Bus {
    fn default() -> Self {
        Self::new(Region::default())
    }
}

impl Bus for C64Bus {
    fn load(&mut self, addr: u16) -> u8 {
        match self.decode(addr) {
            Select::Port(offset) => self.port.read(offset),
            Select::Basic(offset) => self.basic_rom.load(offset),
            Select::Io(addr) => self.read_io(addr),
            Select::CharRom(offset) => self.char_rom.load(offset),
            Select::Kernal(offset) => self.kernal_rom.load(offset),
            Select::Ram(addr) => self.ram.load(addr),
        }
    }

    fn store(&mut self, addr: u16, value: u8) {
        match self.decode(addr) {
            Select::Port(offset) => {
                let before = self.port.bank_config();
                self.port.write(offset, value);
                // The port also drives the RAM cells behind it
                self.ram.store(addr, value);
                let after = self.port.bank_config();
                if after != before {
                    debug!("bank configuration {} -> {}", before, after);
                }
            }
            Select::Io(addr) => self.write_io(addr, value),
            // Writes under a ROM reach the RAM beneath it
            Select::Basic(_) | Select::CharRom(_) | Select::Kernal(_) | Select::Ram(_) => {
                self.ram.store(addr, value)
            }
        }
    }

    fn enum_memory(&self) -> Vec<MemoryRegion<'_>> {
        vec![
            MemoryRegion {
                name: "Char ROM",
                memory: &self.char_rom,
            },
            MemoryRegion {
                name: "Kernal ROM",
                memory: &self.kernal_rom,
            },
            MemoryRegion {
                name: "Basic ROM",
                memory: &self.basic_rom,
            },
            MemoryRegion {
                name: "Dynamic RAM",
                memory: &self.ram,
            },
            MemoryRegion {
                name: "Color RAM",
                memory: self.color_ram.memory(),
            },
            MemoryRegion {
                name: "CIA 1",
                memory: self.cia1.registers(),
            },
            MemoryRegion {
                name: "CIA 2",
                memory: self.cia2.registers(),
            },
        ]
    }
}

impl Machine for C64Bus {
    /// All chips run off the CPU's phi2 clock.
    fn advance(&mut self, cpu_cycles: u32) {
        self.vic.tick_n(cpu_cycles);
        self.sid.tick_n(cpu_cycles);
        self.cia1.tick_n(cpu_cycles);
        self.cia2.tick_n(cpu_cycles);
    }

    /// Treats the image as a KERNAL replacement. Short images leave the
    /// tail of the ROM untouched, long ones are truncated.
    fn load_rom(&mut self, bytes: &[u8]) {
        if bytes.len() != KERNAL_SIZE {
            warn!(
                "KERNAL image is {} bytes, expected {}",
                bytes.len(),
                KERNAL_SIZE
            );
        }
        self.kernal_rom.copy_from(bytes);
    }

    fn irq_active(&self) -> bool {
        self.cia1.irq_active() || self.vic.irq_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn loaded() -> C64Bus {
        let mut bus = C64Bus::default();
        bus.load_roms(&[0xAA; BASIC_SIZE], &[0xBB; KERNAL_SIZE], &[0xCC; CHAR_ROM_SIZE])
            .unwrap();
        bus
    }

    #[test]
    fn test_power_on_port() {
        let mut bus = C64Bus::default();
        assert_eq!(bus.load(0x0000), 0x2F);
        // DDR=$2F, data=$37, pins low
        assert_eq!(bus.load(0x0001), 0x27);
        assert_eq!(bus.ram().load(0x0001), 0x37);
    }

    #[test]
    fn test_rom_size_validation() {
        let mut bus = C64Bus::default();
        assert_eq!(
            bus.load_roms(&[0; 100], &[0; KERNAL_SIZE], &[0; CHAR_ROM_SIZE]),
            Err(RomError::Size {
                name: "BASIC",
                expected: BASIC_SIZE,
                actual: 100
            })
        );
        let err = bus
            .load_roms(&[0; BASIC_SIZE], &[0; KERNAL_SIZE], &[0; 100])
            .unwrap_err();
        assert_eq!(err.to_string(), "Character ROM must be 4096 bytes, got 100");

        // A failed load copies nothing
        assert!(bus
            .load_roms(&[1; BASIC_SIZE], &[1; 10], &[1; CHAR_ROM_SIZE])
            .is_err());
        assert_eq!(bus.load(0xA000), 0x00);
    }

    #[test]
    fn test_default_banking() {
        let mut bus = loaded();
        assert_eq!(bus.load(0xA000), 0xAA);
        assert_eq!(bus.load(0xE000), 0xBB);
        // VIC border colour through I/O
        assert_eq!(bus.load(0xD020) & 0x0F, 0x0E);
        assert_eq!(bus.load(0x1000), 0x00);
    }

    #[test]
    fn test_writes_land_under_rom() {
        let mut bus = loaded();
        bus.store(0xA000, 0x55);
        bus.store(0xFFFC, 0x66);
        assert_eq!(bus.load(0xA000), 0xAA);
        assert_eq!(bus.load(0xFFFC), 0xBB);

        // All RAM
        bus.store(0x0001, 0x30);
        assert_eq!(bus.load(0xA000), 0x55);
        assert_eq!(bus.load(0xFFFC), 0x66);
    }

    #[test]
    fn test_character_rom_banking() {
        let mut bus = loaded();
        bus.store(0xD000, 0x11); // VIC sprite 0 X
        assert_eq!(bus.vic.read(0x00), 0x11);

        // CHAREN clear: character ROM, writes fall to RAM
        bus.store(0x0001, 0x33);
        assert_eq!(bus.load(0xD000), 0xCC);
        bus.store(0xD000, 0x22);
        assert_eq!(bus.load(0xD000), 0xCC);
        assert_eq!(bus.ram().load(0xD000), 0x22);

        // Config 4: RAM
        bus.store(0x0001, 0x34);
        assert_eq!(bus.load(0xD000), 0x22);
    }

    #[test]
    fn test_io_decode() {
        let mut bus = loaded();
        bus.store(0xD418, 0x0F);
        assert_eq!(bus.sid.volume(), 0x0F);

        bus.store(0xD800, 0x03);
        assert_eq!(bus.load(0xD800) & 0x0F, 0x03);

        bus.store(0xDC02, 0xFF);
        bus.store(0xDC00, 0x5A);
        assert_eq!(bus.load(0xDC00), 0x5A);
        // CIA mirror
        assert_eq!(bus.load(0xDC10), 0x5A);

        bus.store(0xDD02, 0x03);
        assert_eq!(bus.cia2.port_a.ddr, 0x03);

        assert_eq!(bus.load(0xDE00), 0xFF);
        assert_eq!(bus.load(0xDFFF), 0xFF);
        // Nothing leaked into RAM
        assert_eq!(bus.ram().load(0xD418), 0x00);
    }

    #[test]
    fn test_enum_memory_order() {
        let bus = C64Bus::default();
        let names: Vec<_> = bus.enum_memory().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "Char ROM",
                "Kernal ROM",
                "Basic ROM",
                "Dynamic RAM",
                "Color RAM",
                "CIA 1",
                "CIA 2"
            ]
        );
    }

    #[test]
    fn test_load_rom_is_permissive() {
        let mut bus = C64Bus::default();
        bus.load_rom(&[0x4C, 0x00, 0xE0]);
        assert_eq!(bus.load(0xE000), 0x4C);
        assert_eq!(bus.load(0xE003), 0x00);

        bus.load_rom(&vec![0xEA; KERNAL_SIZE + 16]);
        assert_eq!(bus.load(0xFFFF), 0xEA);
    }

    #[test]
    fn test_cia1_drives_irq() {
        let mut bus = C64Bus::default();
        bus.store(0xDC0D, 0x81);
        bus.store(0xDC04, 0x01);
        bus.store(0xDC05, 0x00);
        bus.store(0xDC0E, 0x01);
        assert!(!bus.irq_active());

        bus.advance(2);
        assert!(bus.irq_active());

        // Reading ICR acknowledges
        assert_eq!(bus.load(0xDC0D), 0x81);
        assert!(!bus.irq_active());
    }

    #[test]
    fn test_cia2_drives_nmi() {
        let mut bus = C64Bus::default();
        bus.store(0xDD0D, 0x81);
        bus.store(0xDD04, 0x00);
        bus.store(0xDD05, 0x00);
        bus.store(0xDD0E, 0x01);
        bus.advance(1);
        assert!(bus.nmi_active());
        assert!(!bus.irq_active());
    }

    #[test]
    fn test_reset_keeps_roms() {
        let mut bus = loaded();
        bus.store(0x0400, 0x20);
        bus.store(0x0001, 0x30);
        bus.reset();
        assert_eq!(bus.load(0x0400), 0x00);
        assert_eq!(bus.load(0xA000), 0xAA);
    }

    fn banked(config: u8) -> C64Bus {
        let mut bus = loaded();
        bus.store(0x0001, config);
        bus
    }

    proptest! {
        #[test]
        fn prop_decode_follows_bank_table(config in 0u8..8, addr in any::<u16>()) {
            let bus = banked(config);
            let loram = config & 0x01 != 0;
            let hiram = config & 0x02 != 0;
            let charen = config & 0x04 != 0;

            let expected = match addr {
                0x0000..=0x0001 => Select::Port(addr),
                0xA000..=0xBFFF if loram && hiram => Select::Basic(addr - 0xA000),
                0xD000..=0xDFFF if (loram || hiram) && charen => Select::Io(addr),
                0xD000..=0xDFFF if loram || hiram => Select::CharRom(addr - 0xD000),
                0xE000..=0xFFFF if hiram => Select::Kernal(addr - 0xE000),
                _ => Select::Ram(addr),
            };
            prop_assert_eq!(bus.decode(addr), expected);
        }

        #[test]
        fn prop_stores_outside_io_reach_ram_only(
            config in 0u8..8,
            addr in 0x0002u16..=0xFFFF,
            value in any::<u8>(),
        ) {
            let mut bus = banked(config);
            prop_assume!(!matches!(bus.decode(addr), Select::Io(_)));

            bus.store(addr, value);

            prop_assert_eq!(bus.ram().load(addr), value);
            prop_assert!(bus.basic_rom.as_slice().iter().all(|&b| b == 0xAA));
            prop_assert!(bus.kernal_rom.as_slice().iter().all(|&b| b == 0xBB));
            prop_assert!(bus.char_rom.as_slice().iter().all(|&b| b == 0xCC));
        }
    }
}
