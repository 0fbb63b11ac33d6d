//! # Atari 2600
//!
//! The console's 6507 has only 13 address lines, so every CPU address is
//! masked to `$0000-$1FFF` before decoding. Within that window the chips are
//! selected by single address lines:
//!
//! | A12 | A9 | A7 | Target                      | Local offset  |
//! |-----|----|----|-----------------------------|---------------|
//! | 1   | -  | -  | cartridge ROM (4 KiB)       | `addr & $FFF` |
//! | 0   | -  | 0  | TIA                         | `addr & $3F`  |
//! | 0   | 1  | 1  | RIOT I/O and timer          | `addr & $1F`  |
//! | 0   | 0  | 1  | RIOT RAM (128 bytes)        | `addr & $7F`  |
//!
//! The RIOT RAM row covers both `$0080-$00FF` and the `$0180-$01FF` stack
//! page, which is how the 2600 gets a stack out of 128 bytes.

use log::warn;

use crate::bus::{Bus, MemoryRegion};
use crate::devices::{Device, Riot, Tia};
use crate::memory::Memory;
use crate::system::{Computer, Machine};

/// Address lines wired on the 6507.
pub const ADDRESS_MASK: u16 = 0x1FFF;

/// Size of an unbanked cartridge.
pub const CARTRIDGE_SIZE: usize = 4096;

/// TIA colour clocks per CPU cycle.
pub const TIA_CLOCKS_PER_CYCLE: u32 = 3;

/// Where a masked address lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Select {
    Cartridge(u16),
    Tia(u16),
    RiotIo(u16),
    RiotRam(u16),
}

fn decode(addr: u16) -> Select {
    let addr = addr & ADDRESS_MASK;
    if addr & 0x1000 != 0 {
        Select::Cartridge(addr & 0x0FFF)
    } else if addr & 0x0080 == 0 {
        Select::Tia(addr & 0x3F)
    } else if addr & 0x0200 != 0 {
        Select::RiotIo(addr & 0x1F)
    } else {
        Select::RiotRam(addr & 0x7F)
    }
}

/// The 2600 address space: cartridge, TIA and RIOT.
#[derive(Debug)]
pub struct Atari2600Bus {
    cartridge: Memory,
    riot: Riot,
    tia: Tia,
}

impl Atari2600Bus {
    pub fn new() -> Self {
        Self {
            cartridge: Memory::new(CARTRIDGE_SIZE),
            riot: Riot::new(),
            tia: Tia::new(),
        }
    }

    pub fn cartridge(&self) -> &Memory {
        &self.cartridge
    }

    pub fn riot(&self) -> &Riot {
        &self.riot
    }

    pub fn riot_mut(&mut self) -> &mut Riot {
        &mut self.riot
    }

    pub fn tia(&self) -> &Tia {
        &self.tia
    }

    pub fn tia_mut(&mut self) -> &mut Tia {
        &mut self.tia
    }
}

impl Default for Atari2600Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Atari2600Bus {
    fn load(&mut self, addr: u16) -> u8 {
        match decode(addr) {
            Select::Cartridge(offset) => self.cartridge.load(offset),
            Select::Tia(offset) => self.tia.read(offset),
            Select::RiotIo(offset) => self.riot.read(offset),
            Select::RiotRam(offset) => self.riot.ram().load(offset),
        }
    }

    fn store(&mut self, addr: u16, value: u8) {
        match decode(addr) {
            // ROM
            Select::Cartridge(_) => {}
            Select::Tia(offset) => self.tia.write(offset, value),
            Select::RiotIo(offset) => self.riot.write(offset, value),
            Select::RiotRam(offset) => self.riot.ram_mut().store(offset, value),
        }
    }

    fn enum_memory(&self) -> Vec<MemoryRegion<'_>> {
        vec![
            MemoryRegion {
                name: "Cartridge",
                memory: &self.cartridge,
            },
            MemoryRegion {
                name: "RIOT",
                memory: self.riot.ram(),
            },
        ]
    }
}

impl Machine for Atari2600Bus {
    fn advance(&mut self, cpu_cycles: u32) {
        self.riot.tick_n(cpu_cycles);
        self.tia.tick_n(cpu_cycles * TIA_CLOCKS_PER_CYCLE);
    }

    /// Copies the image into the cartridge. Images of any other size than
    /// 4 KiB are still loaded, truncated or partial.
    fn load_rom(&mut self, bytes: &[u8]) {
        if bytes.len() != CARTRIDGE_SIZE {
            warn!(
                "cartridge image is {} bytes, expected {}",
                bytes.len(),
                CARTRIDGE_SIZE
            );
        }
        self.cartridge.copy_from(bytes);
    }
}

/// An Atari 2600 console.
pub type Atari2600 = Computer<Atari2600Bus>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_table() {
        assert_eq!(decode(0xF000), Select::Cartridge(0x000));
        assert_eq!(decode(0xFFFC), Select::Cartridge(0xFFC));
        assert_eq!(decode(0x1FFF), Select::Cartridge(0xFFF));
        assert_eq!(decode(0x0000), Select::Tia(0x00));
        assert_eq!(decode(0x0040), Select::Tia(0x00));
        assert_eq!(decode(0x007F), Select::Tia(0x3F));
        assert_eq!(decode(0x0080), Select::RiotRam(0x00));
        assert_eq!(decode(0x01FF), Select::RiotRam(0x7F));
        assert_eq!(decode(0x0280), Select::RiotIo(0x00));
        assert_eq!(decode(0x0294), Select::RiotIo(0x14));
        // A13-A15 are not connected
        assert_eq!(decode(0xE080), decode(0x0080));
    }

    #[test]
    fn test_decode_offsets_in_range() {
        for addr in 0..=0xFFFFu16 {
            let in_range = match decode(addr) {
                Select::Cartridge(offset) => (offset as usize) < CARTRIDGE_SIZE,
                Select::Tia(offset) => offset < 0x40,
                Select::RiotIo(offset) => offset < 0x20,
                Select::RiotRam(offset) => offset < 0x80,
            };
            assert!(in_range, "${:04X} decodes out of range", addr);
        }
    }
}
