//! Fuzz target for instruction execution.
//!
//! Builds an arbitrary register file and memory image, runs a few
//! instructions and checks the invariants that hold for every opcode.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use retro6502::status::U;
use retro6502::{Bus, Registers, TestComputer, OPCODE_TABLE};

#[derive(Debug, Arbitrary)]
struct FuzzRegisters {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    p: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Placed at $4000 for absolute addressing
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    registers: FuzzRegisters,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut computer = TestComputer::default();
    let bus = computer.bus_mut();

    // RESET -> $8000, IRQ/BRK -> $9000
    bus.store(0xFFFC, 0x00);
    bus.store(0xFFFD, 0x80);
    bus.store(0xFFFE, 0x00);
    bus.store(0xFFFF, 0x90);

    for (i, &byte) in input.memory.program.iter().enumerate() {
        bus.store(0x8000 + i as u16, byte);
    }
    for (i, &byte) in input.memory.zero_page.iter().enumerate() {
        bus.store(i as u16, byte);
    }
    for (i, &byte) in input.memory.stack_page.iter().enumerate() {
        bus.store(0x0100 + i as u16, byte);
    }
    for (i, &byte) in input.memory.main_memory.iter().enumerate() {
        bus.store(0x4000 + i as u16, byte);
    }

    computer.reset();
    let regs = input.registers;
    computer.cpu_mut().set_registers(Registers {
        a: regs.a,
        x: regs.x,
        y: regs.y,
        sp: regs.sp,
        pc: 0x8000,
        p: regs.p | U,
    });

    for _ in 0..(input.steps % 8) + 1 {
        let pc = computer.cpu().pc();
        let opcode = computer.bus_mut().load(pc);
        let jammed_before = computer.cpu().is_jammed();
        let cycles = computer.step();

        if jammed_before {
            assert_eq!(cycles, 0);
            continue;
        }

        // Base cost plus at most a page crossing and a branch or decimal cycle
        let base = OPCODE_TABLE[opcode as usize].base_cycles as u32;
        assert!(cycles >= base && cycles <= base + 2, "opcode {:02X}: {} cycles", opcode, cycles);
        assert!(computer.cpu().status() & U != 0);
    }
});
