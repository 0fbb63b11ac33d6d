//! # Addressable Memory
//!
//! `Memory` is the only backing store in the crate: RAM, cartridge ROM, chip
//! register files and colour RAM are all instances of it, owned by a bus.
//!
//! ## Addressing
//!
//! Every access indexes `addr % capacity`. There are no out-of-range faults;
//! a 128-byte RAM addressed at `0x0080` and at `0x0000` sees the same cell.
//! Buses rely on this to implement mirroring without extra masking.
//!
//! ## Write observers
//!
//! Tooling can watch a memory through [`Memory::add_observer`]. Observers are
//! held weakly, called synchronously in registration order before the byte is
//! committed, and silently forgotten once their last strong handle is dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives every store made to a [`Memory`].
///
/// Implemented for any `Fn(u16, u8)` closure. Observers must not write back
/// into the memory they are watching.
pub trait WriteObserver {
    /// Called with the local address and the value about to be stored.
    fn on_store(&self, addr: u16, value: u8);
}

impl<F: Fn(u16, u8)> WriteObserver for F {
    fn on_store(&self, addr: u16, value: u8) {
        self(addr, value)
    }
}

/// Fixed-capacity byte store with wraparound addressing.
///
/// # Examples
///
/// ```
/// use retro6502::Memory;
///
/// let mut ram = Memory::new(128);
/// ram.store(0x80, 0x42);
/// assert_eq!(ram.load(0x00), 0x42);
/// assert_eq!(ram.capacity(), 128);
/// ```
pub struct Memory {
    data: Box<[u8]>,
    observers: RefCell<Vec<Weak<dyn WriteObserver>>>,
}

impl Memory {
    /// Creates a zero-filled memory of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, since there is no address to wrap onto.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "memory capacity must be non-zero");
        Self {
            data: vec![0; capacity].into_boxed_slice(),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Number of bytes this memory holds.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn index(&self, addr: u16) -> usize {
        addr as usize % self.data.len()
    }

    /// Reads the byte at `addr % capacity`.
    #[inline]
    pub fn load(&self, addr: u16) -> u8 {
        self.data[self.index(addr)]
    }

    /// Writes `value` at `addr % capacity` after notifying observers.
    pub fn store(&mut self, addr: u16, value: u8) {
        let index = self.index(addr);
        self.notify(index as u16, value);
        self.data[index] = value;
    }

    fn notify(&self, addr: u16, value: u8) {
        let live: Vec<Rc<dyn WriteObserver>> = {
            let mut observers = self.observers.borrow_mut();
            if observers.is_empty() {
                return;
            }
            observers.retain(|weak| weak.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.on_store(addr, value);
        }
    }

    /// Little-endian word at `addr`, high byte from `addr + 1` (both wrapped).
    pub fn load_word(&self, addr: u16) -> u16 {
        let lo = self.load(addr) as u16;
        let hi = self.load(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Little-endian word whose high byte stays in the page of `addr`.
    ///
    /// When `addr` is the last byte of a page (`$xxFF`), the high byte comes
    /// from `$xx00` instead of the next page.
    pub fn load_word_zp_bug(&self, addr: u16) -> u16 {
        let lo = self.load(addr) as u16;
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let hi = self.load(hi_addr) as u16;
        (hi << 8) | lo
    }

    /// Copies `bytes` into the start of the memory and returns how many were
    /// taken. Anything past the capacity is ignored; observers are not told.
    pub fn copy_from(&mut self, bytes: &[u8]) -> usize {
        let count = bytes.len().min(self.data.len());
        self.data[..count].copy_from_slice(&bytes[..count]);
        count
    }

    /// Sets every byte to `value`. Observers are not told.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Registers a weakly held write observer.
    ///
    /// Takes `&self` so tooling holding only the introspection view returned by
    /// a bus can subscribe.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use retro6502::{Memory, WriteObserver};
    ///
    /// let mut mem = Memory::new(16);
    /// let seen = Rc::new(Cell::new(0u8));
    /// let sink = seen.clone();
    /// let observer: Rc<dyn WriteObserver> = Rc::new(move |_addr: u16, value: u8| sink.set(value));
    /// mem.add_observer(&observer);
    ///
    /// mem.store(3, 0x99);
    /// assert_eq!(seen.get(), 0x99);
    /// ```
    pub fn add_observer(&self, observer: &Rc<dyn WriteObserver>) {
        self.observers.borrow_mut().push(Rc::downgrade(observer));
    }

    /// Number of registered observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("capacity", &self.data.len())
            .field("observers", &self.observer_count())
            .finish()
    }
}
