//! C64 machine assembly and timing constants.

use retro6502::Computer;

use super::c64_bus::{C64Bus, RomError};

/// Video standard, which fixes the VIC-II's line length and frame height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// 6569: 312 lines of 63 cycles, 985,248 Hz
    #[default]
    PAL,
    /// 6567: 263 lines of 65 cycles, 1,022,727 Hz
    NTSC,
}

impl Region {
    pub fn clock_hz(&self) -> u32 {
        match self {
            Region::PAL => 985_248,
            Region::NTSC => 1_022_727,
        }
    }

    pub fn scanlines(&self) -> u16 {
        match self {
            Region::PAL => 312,
            Region::NTSC => 263,
        }
    }

    pub fn cycles_per_line(&self) -> u16 {
        match self {
            Region::PAL => 63,
            Region::NTSC => 65,
        }
    }

    pub fn cycles_per_frame(&self) -> u32 {
        self.scanlines() as u32 * self.cycles_per_line() as u32
    }
}

/// A Commodore 64: the 6510 core on a [`C64Bus`].
pub type C64 = Computer<C64Bus>;

/// Builds a machine, installs the three ROMs and resets the CPU through the
/// KERNAL's reset vector.
pub fn boot(region: Region, basic: &[u8], kernal: &[u8], charrom: &[u8]) -> Result<C64, RomError> {
    let mut bus = C64Bus::new(region);
    bus.load_roms(basic, kernal, charrom)?;
    Ok(Computer::new(bus))
}

/// Power-cycles the machine: RAM and chips return to power-on state, the
/// ROMs stay installed and the CPU restarts through the KERNAL reset vector.
pub fn hard_reset(c64: &mut C64) {
    c64.bus_mut().reset();
    c64.reset();
}

/// Runs whole frames; returns the cycles spent, which may overshoot the
/// frame length by part of an instruction.
pub fn run_frames(c64: &mut C64, frames: u32) -> u64 {
    let budget = c64.bus().vic.region().cycles_per_frame() as u64 * frames as u64;
    c64.run_for_cycles(budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro6502::Bus;
    use crate::system::c64_bus::{BASIC_SIZE, CHAR_ROM_SIZE, KERNAL_SIZE};

    #[test]
    fn test_region_timing() {
        assert_eq!(Region::PAL.cycles_per_frame(), 19_656);
        assert_eq!(Region::NTSC.cycles_per_frame(), 17_095);
        assert_eq!(Region::default(), Region::PAL);
        assert!(Region::NTSC.clock_hz() > Region::PAL.clock_hz());
    }

    #[test]
    fn test_boot_rejects_bad_roms() {
        let result = boot(Region::PAL, &[], &[0; KERNAL_SIZE], &[0; CHAR_ROM_SIZE]);
        assert!(matches!(result, Err(RomError::Size { name: "BASIC", .. })));
    }

    #[test]
    fn test_boot_follows_reset_vector() {
        let mut kernal = vec![0xEA; KERNAL_SIZE];
        kernal[0x1FFC] = 0x00;
        kernal[0x1FFD] = 0xE0;
        let c64 = boot(Region::NTSC, &[0; BASIC_SIZE], &kernal, &[0; CHAR_ROM_SIZE]).unwrap();
        assert_eq!(c64.cpu().pc(), 0xE000);
        assert_eq!(c64.bus().vic.region(), Region::NTSC);
    }

    #[test]
    fn test_hard_reset_clears_ram_and_keeps_roms() {
        let mut kernal = vec![0xEA; KERNAL_SIZE];
        kernal[0x1FFC] = 0x00;
        kernal[0x1FFD] = 0xE0;
        let mut c64 = boot(Region::PAL, &[0; BASIC_SIZE], &kernal, &[0; CHAR_ROM_SIZE]).unwrap();

        c64.bus_mut().store(0x0400, 0x42);
        c64.bus_mut().store(0xD800, 0x01);
        // All RAM: the KERNAL is banked out
        c64.bus_mut().store(0x0001, 0x30);
        assert_eq!(c64.bus().port.bank_config(), 0x00);

        hard_reset(&mut c64);

        assert_eq!(c64.bus().ram().load(0x0400), 0x00);
        assert_eq!(c64.bus().port.bank_config(), 0x07);
        assert_eq!(c64.bus_mut().load(0xD800) & 0x0F, crate::devices::color_ram::DEFAULT_COLOR);
        assert_eq!(c64.bus_mut().load(0xE000), 0xEA);
        assert_eq!(c64.cpu().pc(), 0xE000);
    }
}
