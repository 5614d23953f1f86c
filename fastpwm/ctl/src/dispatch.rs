//! Interrupt dispatch table
//!
//! One [`Handler`] per physical interrupt vector. The table is meant to be a
//! `static` so that the target's interrupt vectors can forward to it:
//!
//! ```ignore
//! static DISPATCH: DispatchTable = DispatchTable::new();
//!
//! #[avr_device::interrupt(atmega328p)]
//! fn TIMER1_COMPA() {
//!     DISPATCH.dispatch(VectorSlot(4));
//! }
//! ```
//!
//! Every slot starts as [`Handler::Empty`], so vectors may dispatch
//! unconditionally.

use core::cell::RefCell;
use critical_section::Mutex;
use fastpwm_core::Handler;

use crate::{VectorSlot, MAX_VECTORS};

/// Handler slots shared between the controller and interrupt context
pub struct DispatchTable {
    slots: Mutex<RefCell<[Handler; MAX_VECTORS]>>,
}

impl DispatchTable {
    /// Create a table with every slot empty
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new([Handler::Empty; MAX_VECTORS])),
        }
    }

    /// Run the handler bound to `slot`.
    ///
    /// The reference is copied out under a critical section and invoked
    /// after it is released, so a handler may itself attach or detach.
    pub fn dispatch(&self, slot: VectorSlot) {
        self.handler(slot).invoke();
    }

    /// Current handler of `slot`; out-of-range slots read as empty
    pub fn handler(&self, slot: VectorSlot) -> Handler {
        critical_section::with(|cs| {
            self.slots
                .borrow_ref(cs)
                .get(slot.index())
                .copied()
                .unwrap_or_default()
        })
    }

    pub fn is_attached(&self, slot: VectorSlot) -> bool {
        self.handler(slot).is_attached()
    }

    /// Swap the handler of `slot`, returning the previous one.
    ///
    /// Callers must have cleared the vector's enable bit first.
    pub(crate) fn replace(&self, slot: VectorSlot, handler: Handler) -> Handler {
        critical_section::with(|cs| {
            let mut slots = self.slots.borrow_ref_mut(cs);
            match slots.get_mut(slot.index()) {
                Some(entry) => core::mem::replace(entry, handler),
                None => Handler::Empty,
            }
        })
    }

    /// Reset every slot to [`Handler::Empty`]
    pub fn clear(&self) {
        critical_section::with(|cs| {
            *self.slots.borrow_ref_mut(cs) = [Handler::Empty; MAX_VECTORS];
        })
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}
