//! Simulated timer register file

use std::fmt;

use fastpwm_core::{Reg, RegisterAccess};

/// Register file in which every register reads back what was last written.
///
/// All registers start at 0. Writes are logged in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRegisters {
    values: [u16; Reg::COUNT],
    log: Vec<(Reg, u16)>,
}

impl SimRegisters {
    pub fn new() -> Self {
        Self {
            values: [0; Reg::COUNT],
            log: Vec::new(),
        }
    }

    /// Every write since creation or the last [`clear_log`](Self::clear_log)
    pub fn writes(&self) -> &[(Reg, u16)] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Registers holding a non-zero value, in [`Reg::ALL`] order
    pub fn nonzero(&self) -> impl Iterator<Item = (Reg, u16)> + '_ {
        Reg::ALL
            .iter()
            .map(|&reg| (reg, self.values[reg.index()]))
            .filter(|&(_, value)| value != 0)
    }

    /// Register values without the write log, for state comparisons
    pub fn values(&self) -> &[u16; Reg::COUNT] {
        &self.values
    }
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterAccess for SimRegisters {
    fn read(&self, reg: Reg) -> u16 {
        self.values[reg.index()]
    }

    fn write(&mut self, reg: Reg, value: u16) {
        self.values[reg.index()] = value;
        self.log.push((reg, value));
    }
}

impl fmt::Display for SimRegisters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (reg, value) in self.nonzero() {
            writeln!(f, "{:<7}= {:#06x} ({:#018b})", reg.name(), value, value)?;
        }
        Ok(())
    }
}
