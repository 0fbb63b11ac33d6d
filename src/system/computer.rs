use crate::bus::MemoryRegion;
use crate::cpu::Mos6502;
use crate::system::Machine;

/// One CPU bound to one machine bus.
///
/// Owns both, and accumulates the total cycle count. Each [`step`](Self::step)
/// runs one instruction, services a pending IRQ, then lets the machine
/// advance its chips by the cycles just spent.
///
/// # Examples
///
/// ```
/// use retro6502::{Bus, TestComputer};
///
/// let mut computer = TestComputer::default();
/// // Reset vector -> $0200, program: LDX #$05; INX
/// computer.bus_mut().store(0xFFFC, 0x00);
/// computer.bus_mut().store(0xFFFD, 0x02);
/// for (i, byte) in [0xA2, 0x05, 0xE8].iter().enumerate() {
///     computer.bus_mut().store(0x0200 + i as u16, *byte);
/// }
/// computer.reset();
///
/// computer.step();
/// computer.step();
/// assert_eq!(computer.cpu().x(), 0x06);
/// assert_eq!(computer.total_cycles(), 4);
/// ```
#[derive(Debug)]
pub struct Computer<M: Machine> {
    bus: M,
    cpu: Mos6502,
    total_cycles: u64,
}

impl<M: Machine> Computer<M> {
    /// Binds a fresh CPU to `bus` and resets it through the bus's vector.
    pub fn new(mut bus: M) -> Self {
        let mut cpu = Mos6502::new();
        cpu.reset(&mut bus);
        Self {
            bus,
            cpu,
            total_cycles: 0,
        }
    }

    /// Executes one instruction and returns the cycles spent, interrupt entry
    /// included. A jammed CPU spends 0 and the machine does not advance.
    pub fn step(&mut self) -> u32 {
        let mut cycles = self.cpu.step(&mut self.bus);
        if self.bus.irq_active() {
            cycles += self.cpu.irq(&mut self.bus);
        }
        if cycles > 0 {
            self.total_cycles += cycles as u64;
            self.bus.advance(cycles);
        }
        cycles
    }

    /// Steps until at least `budget` cycles have been spent or the CPU jams.
    /// Returns the cycles actually spent.
    pub fn run_for_cycles(&mut self, budget: u64) -> u64 {
        let mut spent = 0;
        while spent < budget {
            let cycles = self.step();
            if cycles == 0 {
                break;
            }
            spent += cycles as u64;
        }
        spent
    }

    /// Loads a program image and resets the CPU onto it.
    pub fn load_rom(&mut self, bytes: &[u8]) {
        self.bus.load_rom(bytes);
        self.cpu.reset(&mut self.bus);
    }

    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
    }

    /// Raises a non-maskable interrupt before the next instruction.
    pub fn nmi(&mut self) -> u32 {
        let cycles = self.cpu.nmi(&mut self.bus);
        self.total_cycles += cycles as u64;
        self.bus.advance(cycles);
        cycles
    }

    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Mos6502 {
        &mut self.cpu
    }

    pub fn bus(&self) -> &M {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut M {
        &mut self.bus
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// The bus's named memories, for viewers.
    pub fn enum_memory(&self) -> Vec<MemoryRegion<'_>> {
        self.bus.enum_memory()
    }
}

impl<M: Machine + Default> Default for Computer<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{Bus, FlatBus};
    use crate::status::I;

    /// Flat bus with a one-shot IRQ line.
    #[derive(Default)]
    struct IrqBus {
        inner: FlatBus,
        irq: bool,
        advanced: u32,
    }

    impl Bus for IrqBus {
        fn load(&mut self, addr: u16) -> u8 {
            self.inner.load(addr)
        }

        fn store(&mut self, addr: u16, value: u8) {
            self.inner.store(addr, value)
        }

        fn enum_memory(&self) -> Vec<MemoryRegion<'_>> {
            self.inner.enum_memory()
        }
    }

    impl Machine for IrqBus {
        fn advance(&mut self, cpu_cycles: u32) {
            self.advanced += cpu_cycles;
        }

        fn load_rom(&mut self, bytes: &[u8]) {
            self.inner.load_rom(bytes);
        }

        fn irq_active(&self) -> bool {
            self.irq
        }
    }

    fn setup() -> Computer<IrqBus> {
        let mut bus = IrqBus::default();
        bus.store(0xFFFC, 0x00);
        bus.store(0xFFFD, 0x80);
        bus.store(0xFFFE, 0x00);
        bus.store(0xFFFF, 0x90);
        // CLI; NOP
        bus.store(0x8000, 0x58);
        bus.store(0x8001, 0xEA);
        Computer::new(bus)
    }

    #[test]
    fn test_step_services_irq_after_cli() {
        let mut computer = setup();
        computer.bus_mut().irq = true;

        // CLI executes, then the IRQ is taken at once
        assert_eq!(computer.step(), 2 + 7);
        assert_eq!(computer.cpu().pc(), 0x9000);
        assert!(computer.cpu().flag(I));
        assert_eq!(computer.bus().advanced, 9);
        assert_eq!(computer.total_cycles(), 9);
    }

    #[test]
    fn test_irq_ignored_while_masked() {
        let mut computer = setup();
        computer.bus_mut().store(0x8000, 0xEA);
        computer.bus_mut().irq = true;
        assert_eq!(computer.step(), 2);
        assert_eq!(computer.cpu().pc(), 0x8001);
    }

    #[test]
    fn test_run_for_cycles_stops_on_jam() {
        let mut computer = setup();
        computer.bus_mut().store(0x8001, 0x02);
        assert_eq!(computer.run_for_cycles(1000), 4);
        assert!(computer.cpu().is_jammed());
        assert_eq!(computer.total_cycles(), 4);
    }

    #[test]
    fn test_load_rom_resets() {
        let mut computer = setup();
        computer.step();
        computer.load_rom(&[0xEA]);
        assert_eq!(computer.cpu().pc(), 0x8000);
        assert_eq!(computer.cpu().sp(), 0xFF);
    }
}
