//! Tests for the arithmetic and logic instructions through full execution.
//!
//! Tests cover:
//! - Binary ADC/SBC flags
//! - Decimal-mode correction and its extra cycle
//! - Page-crossing penalties on indexed reads
//! - Compare and BIT flag semantics

use retro6502::status::{C, D, N, U, V, Z};
use retro6502::{Bus, TestComputer};

/// Helper function to create a computer with reset vector at 0x8000
fn setup() -> TestComputer {
    let mut computer = TestComputer::default();
    computer.bus_mut().store(0xFFFC, 0x00);
    computer.bus_mut().store(0xFFFD, 0x80);
    computer.reset();
    computer
}

fn load(computer: &mut TestComputer, addr: u16, bytes: &[u8]) {
    for (i, byte) in bytes.iter().enumerate() {
        computer.bus_mut().store(addr.wrapping_add(i as u16), *byte);
    }
}

// ========== ADC ==========

#[test]
fn test_adc_immediate_basic() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0x69, 0x05]); // ADC #$05
    computer.cpu_mut().set_a(0x10);
    computer.cpu_mut().set_flags(U);

    assert_eq!(computer.step(), 2);
    assert_eq!(computer.cpu().a(), 0x15);
    assert_eq!(computer.cpu().status(), U);
    assert_eq!(computer.cpu().pc(), 0x8002);
}

#[test]
fn test_adc_carry_out_and_zero() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0x69, 0xFF]);
    computer.cpu_mut().set_a(0x01);
    computer.cpu_mut().set_flags(U);

    computer.step();
    assert_eq!(computer.cpu().a(), 0x00);
    assert!(computer.cpu().flag(C));
    assert!(computer.cpu().flag(Z));
    assert!(!computer.cpu().flag(V));
}

#[test]
fn test_adc_decimal_examples() {
    // 0x09 + 0x01 = 0x10, no carry
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0x69, 0x01]);
    computer.cpu_mut().set_a(0x09);
    computer.cpu_mut().set_flags(U | D);
    assert_eq!(computer.step(), 3);
    assert_eq!(computer.cpu().a(), 0x10);
    assert!(!computer.cpu().flag(C));

    // 0x99 + 0x01 = 0x00, carry
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0x69, 0x01]);
    computer.cpu_mut().set_a(0x99);
    computer.cpu_mut().set_flags(U | D);
    assert_eq!(computer.step(), 3);
    assert_eq!(computer.cpu().a(), 0x00);
    assert!(computer.cpu().flag(C));
}

#[test]
fn test_adc_absolute_x_page_cross() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0x7D, 0xFF, 0x20]); // ADC $20FF,X
    computer.bus_mut().store(0x2100, 0x01);
    computer.cpu_mut().set_x(0x01);

    assert_eq!(computer.step(), 5);
    assert_eq!(computer.cpu().a(), 0x01);
}

#[test]
fn test_adc_decimal_and_page_cross_stack() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0x79, 0xF0, 0x20]); // ADC $20F0,Y
    computer.bus_mut().store(0x2110, 0x01);
    computer.cpu_mut().set_y(0x20);
    computer.cpu_mut().set_a(0x19);
    computer.cpu_mut().set_flags(U | D);

    assert_eq!(computer.step(), 4 + 1 + 1);
    assert_eq!(computer.cpu().a(), 0x20);
}

// ========== SBC ==========

#[test]
fn test_sbc_binary() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0xE9, 0x01]);
    computer.cpu_mut().set_a(0x80);
    computer.cpu_mut().set_flags(U | C);

    assert_eq!(computer.step(), 2);
    assert_eq!(computer.cpu().a(), 0x7F);
    assert!(computer.cpu().flag(C));
    assert!(computer.cpu().flag(V));
    assert!(!computer.cpu().flag(N));
}

#[test]
fn test_sbc_decimal() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0xE9, 0x05]);
    computer.cpu_mut().set_a(0x42);
    computer.cpu_mut().set_flags(U | D | C);

    assert_eq!(computer.step(), 3);
    assert_eq!(computer.cpu().a(), 0x37);
    assert!(computer.cpu().flag(C));
}

#[test]
fn test_usbc_matches_sbc() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0xEB, 0x10]);
    computer.cpu_mut().set_a(0x30);
    computer.cpu_mut().set_flags(U | C);

    assert_eq!(computer.step(), 2);
    assert_eq!(computer.cpu().a(), 0x20);
}

// ========== Logic, compare, BIT ==========

#[test]
fn test_and_ora_eor() {
    let mut computer = setup();
    // AND #$0F; ORA #$80; EOR #$FF
    load(&mut computer, 0x8000, &[0x29, 0x0F, 0x09, 0x80, 0x49, 0xFF]);
    computer.cpu_mut().set_a(0x5A);

    computer.step();
    assert_eq!(computer.cpu().a(), 0x0A);
    computer.step();
    assert_eq!(computer.cpu().a(), 0x8A);
    assert!(computer.cpu().flag(N));
    computer.step();
    assert_eq!(computer.cpu().a(), 0x75);
    assert!(!computer.cpu().flag(N));
}

#[test]
fn test_cmp_indirect_y_page_cross() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0xD1, 0x40]); // CMP ($40),Y
    load(&mut computer, 0x0040, &[0xF0, 0x30]);
    computer.bus_mut().store(0x3110, 0x20);
    computer.cpu_mut().set_y(0x20);
    computer.cpu_mut().set_a(0x20);

    assert_eq!(computer.step(), 6);
    assert!(computer.cpu().flag(Z));
    assert!(computer.cpu().flag(C));
}

#[test]
fn test_cpx_cpy() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0xE0, 0x10, 0xC0, 0x10]); // CPX #$10; CPY #$10
    computer.cpu_mut().set_x(0x0F);
    computer.cpu_mut().set_y(0x11);

    computer.step();
    assert!(!computer.cpu().flag(C));
    assert!(computer.cpu().flag(N));
    computer.step();
    assert!(computer.cpu().flag(C));
    assert!(!computer.cpu().flag(Z));
}

#[test]
fn test_bit_copies_high_bits() {
    let mut computer = setup();
    load(&mut computer, 0x8000, &[0x24, 0x10]); // BIT $10
    computer.bus_mut().store(0x0010, 0xC0);
    computer.cpu_mut().set_a(0x01);

    assert_eq!(computer.step(), 3);
    assert!(computer.cpu().flag(N));
    assert!(computer.cpu().flag(V));
    assert!(computer.cpu().flag(Z));
}
