//! Integration tests: the 6510 running a stand-in KERNAL on the C64 bus.
//!
//! Real ROMs are not redistributable, so each test assembles a small KERNAL
//! image with the reset and IRQ vectors pointing into it.

use std::cell::RefCell;
use std::rc::Rc;

use c64_emu::{boot, run_frames, Region, BASIC_SIZE, C64, CHAR_ROM_SIZE, KERNAL_SIZE};
use retro6502::bus::observe_all;
use retro6502::{Bus, WriteObserver};

/// KERNAL with `code` at $E000, `irq` at $E100 and the vectors set.
fn kernal(code: &[u8], irq: &[u8]) -> Vec<u8> {
    let mut rom = vec![0xEA; KERNAL_SIZE];
    rom[..code.len()].copy_from_slice(code);
    rom[0x100..0x100 + irq.len()].copy_from_slice(irq);
    rom[0x1FFC] = 0x00;
    rom[0x1FFD] = 0xE0;
    rom[0x1FFE] = 0x00;
    rom[0x1FFF] = 0xE1;
    rom
}

fn machine(code: &[u8], irq: &[u8]) -> C64 {
    let mut basic = vec![0x00; BASIC_SIZE];
    basic[0] = 0x94;
    boot(Region::PAL, &basic, &kernal(code, irq), &[0x3C; CHAR_ROM_SIZE]).unwrap()
}

#[test]
fn test_reset_enters_kernal() {
    let c64 = machine(&[], &[]);
    assert_eq!(c64.cpu().pc(), 0xE000);
}

#[test]
fn test_cpu_switches_banks() {
    #[rustfmt::skip]
    let code = [
        0xAD, 0x00, 0xA0,       // LDA $A000   (BASIC)
        0x85, 0x10,             // STA $10
        0xA9, 0x77,             // LDA #$77
        0x8D, 0x00, 0xA0,       // STA $A000   (RAM underneath)
        0xA9, 0x36,             // LDA #$36
        0x85, 0x01,             // STA $01     (BASIC out)
        0xAD, 0x00, 0xA0,       // LDA $A000
        0x85, 0x11,             // STA $11
        0xA9, 0x33,             // LDA #$33
        0x85, 0x01,             // STA $01     (character ROM in)
        0xAD, 0x00, 0xD0,       // LDA $D000
        0x85, 0x12,             // STA $12
        0x02,                   // JAM
    ];
    let mut c64 = machine(&code, &[]);
    c64.run_for_cycles(1_000);

    assert!(c64.cpu().is_jammed());
    let bus = c64.bus_mut();
    assert_eq!(bus.load(0x0010), 0x94);
    assert_eq!(bus.load(0x0011), 0x77);
    assert_eq!(bus.load(0x0012), 0x3C);
}

#[test]
fn test_cia_timer_interrupts() {
    #[rustfmt::skip]
    let code = [
        0x78,                   // SEI
        0xA9, 0x81,             // LDA #$81
        0x8D, 0x0D, 0xDC,       // STA $DC0D   (enable timer A)
        0xA9, 0x00,             // LDA #$00
        0x8D, 0x04, 0xDC,       // STA $DC04
        0xA9, 0x01,             // LDA #$01
        0x8D, 0x05, 0xDC,       // STA $DC05   (latch $0100)
        0xA9, 0x11,             // LDA #$11
        0x8D, 0x0E, 0xDC,       // STA $DC0E   (start, force load)
        0x58,                   // CLI
        0x4C, 0x16, 0xE0,       // JMP $E016
    ];
    #[rustfmt::skip]
    let irq = [
        0xE6, 0x02,             // INC $02
        0xAD, 0x0D, 0xDC,       // LDA $DC0D   (acknowledge)
        0x40,                   // RTI
    ];
    let mut c64 = machine(&code, &irq);

    c64.run_for_cycles(3_000);
    let count = c64.bus_mut().load(0x0002);
    // One underflow every 257 cycles after a short setup
    assert!((10..=12).contains(&count), "IRQ count {}", count);
    assert!(!c64.cpu().flag(retro6502::status::I));
}

#[test]
fn test_raster_advances_with_cpu() {
    // JMP $E000
    let mut c64 = machine(&[0x4C, 0x00, 0xE0], &[]);
    let spent = run_frames(&mut c64, 1);
    assert!(spent >= Region::PAL.cycles_per_frame() as u64);
    assert!(spent < Region::PAL.cycles_per_frame() as u64 + 3);

    let line = c64.bus().vic.raster();
    assert!(line < 2, "raster {}", line);
}

#[test]
fn test_cia_register_file_is_observable() {
    #[rustfmt::skip]
    let code = [
        0xA9, 0x42,             // LDA #$42
        0x8D, 0x0C, 0xDC,       // STA $DC0C   (serial data)
        0x02,                   // JAM
    ];
    let mut c64 = machine(&code, &[]);

    let writes = Rc::new(RefCell::new(Vec::new()));
    let sink = writes.clone();
    let observer: Rc<dyn WriteObserver> = Rc::new(move |addr: u16, value: u8| {
        sink.borrow_mut().push((addr, value));
    });
    observe_all(c64.bus(), &observer);

    c64.run_for_cycles(100);
    assert_eq!(*writes.borrow(), vec![(0x000C, 0x42)]);

    let regions = c64.enum_memory();
    let cia1 = regions.iter().find(|r| r.name == "CIA 1").unwrap();
    assert_eq!(cia1.memory.load(0x0C), 0x42);
}
