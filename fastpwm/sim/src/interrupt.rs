//! Simulated interrupt runtime

use fastpwm_core::{InterruptSource, OutputPins, RegisterAccess, TimerId};
use fastpwm_ctl::Controller;

/// Raise a timer interrupt the way the hardware would.
///
/// The vector's dispatch slot runs only while its enable bit is set.
/// Returns whether the slot was dispatched; unknown vectors never fire.
pub fn fire<R, G>(
    controller: &Controller<'_, R, G>,
    timer: TimerId,
    source: InterruptSource,
) -> bool
where
    R: RegisterAccess,
    G: OutputPins,
{
    let Some(vector) = controller
        .timer(timer)
        .ok()
        .and_then(|cap| cap.vector(source))
    else {
        return false;
    };

    if controller.registers().read_field(vector.enable) == 0 {
        return false;
    }
    controller.dispatch_table().dispatch(vector.slot);
    true
}
