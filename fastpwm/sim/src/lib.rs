//! Host port for fastpwm
//!
//! Stands in for the hardware collaborators of the controller: a register
//! file that records every write, a pin service that records output pins and
//! an interrupt runtime that only dispatches vectors whose enable bit is set.

pub mod interrupt;
pub mod pins;
pub mod registers;

pub use interrupt::fire;
pub use pins::SimPins;
pub use registers::SimRegisters;

/// Controller wired to the simulated collaborators
pub type SimController<'d> = fastpwm_ctl::Controller<'d, SimRegisters, SimPins>;

/// Build a controller on a fresh register file and pin service
pub fn controller(
    config: fastpwm_ctl::ControllerConfig,
    dispatch: &fastpwm_ctl::DispatchTable,
) -> SimController<'_> {
    fastpwm_ctl::Controller::new(config, SimRegisters::new(), SimPins::new(), dispatch)
}
