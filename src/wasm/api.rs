//! WASM API for the Atari 2600.

use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;

use crate::bus;
use crate::memory::WriteObserver;
use crate::status;
use crate::system::Atari2600;

/// A console driven from JavaScript.
#[wasm_bindgen]
pub struct Atari2600Emulator {
    console: Atari2600,
    // Keeps the JS write listener alive; memories only hold it weakly.
    listener: Option<Rc<dyn WriteObserver>>,
}

#[wasm_bindgen]
impl Atari2600Emulator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            console: Atari2600::default(),
            listener: None,
        }
    }

    /// Loads a cartridge image and resets the CPU.
    pub fn load_rom(&mut self, rom: &[u8]) {
        self.console.load_rom(rom);
    }

    /// Executes one instruction and returns its cycle count (0 once jammed).
    pub fn step(&mut self) -> u32 {
        self.console.step()
    }

    /// Runs for at least `cycles` CPU cycles and returns the cycles spent.
    pub fn run_for_cycles(&mut self, cycles: f64) -> f64 {
        // Negative and NaN budgets saturate to 0
        self.console.run_for_cycles(cycles as u64) as f64
    }

    pub fn reset(&mut self) {
        self.console.reset();
    }

    /// Calls `callback(address, value)` for every store to any region.
    ///
    /// Replaces a previously registered callback.
    pub fn on_store(&mut self, callback: js_sys::Function) {
        let listener: Rc<dyn WriteObserver> = Rc::new(move |addr: u16, value: u8| {
            if let Err(err) = callback.call2(
                &JsValue::NULL,
                &JsValue::from(addr),
                &JsValue::from(value),
            ) {
                warn!("store listener threw at ${:04X}: {:?}", addr, err);
            }
        });
        bus::observe_all(self.console.bus(), &listener);
        self.listener = Some(listener);
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.console.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.console.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.console.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.console.cpu().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.console.cpu().sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.console.cpu().status()
    }

    /// Status register as `NV-BDIZC` text.
    #[wasm_bindgen(getter)]
    pub fn flags(&self) -> String {
        status::describe(self.console.cpu().status())
    }

    #[wasm_bindgen(getter)]
    pub fn jammed(&self) -> bool {
        self.console.cpu().is_jammed()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.console.total_cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Names of the memory regions, in display order.
    pub fn region_names(&self) -> js_sys::Array {
        self.console
            .enum_memory()
            .iter()
            .map(|region| JsValue::from_str(region.name))
            .collect()
    }

    /// Contents of the named region, or an empty array for an unknown name.
    pub fn region_bytes(&self, name: &str) -> Vec<u8> {
        bus::find_memory(self.console.bus(), name)
            .map(|memory| memory.as_slice().to_vec())
            .unwrap_or_default()
    }
}

impl Default for Atari2600Emulator {
    fn default() -> Self {
        Self::new()
    }
}
