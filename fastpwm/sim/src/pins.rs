//! Simulated pin service

use fastpwm_core::OutputPins;

/// Records which pins were switched to output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimPins {
    outputs: Vec<u8>,
}

impl SimPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_output(&self, pin: u8) -> bool {
        self.outputs.contains(&pin)
    }

    /// Output pins in the order they were first configured
    pub fn outputs(&self) -> &[u8] {
        &self.outputs
    }
}

impl OutputPins for SimPins {
    fn set_output(&mut self, pin: u8) {
        if !self.is_output(pin) {
            self.outputs.push(pin);
        }
    }
}
