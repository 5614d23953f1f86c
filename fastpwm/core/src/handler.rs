//! Interrupt handler references

use core::fmt;

/// Handler bound to one interrupt dispatch slot.
///
/// `Empty` is a valid no-op, so the interrupt runtime may invoke a slot
/// unconditionally.
#[derive(Clone, Copy, Default)]
pub enum Handler {
    #[default]
    Empty,
    Call(fn()),
}

impl Handler {
    pub const fn new(f: fn()) -> Self {
        Self::Call(f)
    }

    /// Run the handler; `Empty` does nothing
    #[inline]
    pub fn invoke(&self) {
        if let Self::Call(f) = self {
            f();
        }
    }

    pub const fn is_attached(&self) -> bool {
        matches!(self, Self::Call(_))
    }

    fn address(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Call(f) => *f as usize,
        }
    }
}

impl From<fn()> for Handler {
    fn from(f: fn()) -> Self {
        Self::Call(f)
    }
}

/// Identity comparison: two handlers are equal when they call the same
/// function.
impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Handler::Empty"),
            Self::Call(_) => write!(f, "Handler::Call({:#x})", self.address()),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Handler {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Empty => defmt::write!(fmt, "Empty"),
            Self::Call(_) => defmt::write!(fmt, "Call({=usize:#x})", self.address()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    static CALLS: AtomicU32 = AtomicU32::new(0);

    fn bump() {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn other() {}

    #[test]
    fn test_invoke() {
        let before = CALLS.load(Ordering::SeqCst);
        Handler::Empty.invoke();
        Handler::new(bump).invoke();
        assert_eq!(CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_identity() {
        assert_eq!(Handler::new(bump), Handler::new(bump));
        assert_ne!(Handler::new(bump), Handler::new(other));
        assert_ne!(Handler::new(bump), Handler::Empty);
        assert!(!Handler::default().is_attached());
    }
}
