//! Chip capability tables
//!
//! A chip is described entirely by data: which timers it has, how wide
//! their counters are, which prescaler table their clock-select field uses,
//! where each output-compare unit is pinned out and which bits enable each
//! interrupt vector. The controller is generic over this description.

use fastpwm_core::{
    CounterWidth, Field, FieldValue, InterruptSource, PrescalerTable, Reg, SubChannel, TimerId,
};

/// Index into the [`DispatchTable`](crate::DispatchTable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorSlot(pub u8);

impl VectorSlot {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for VectorSlot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "slot{=u8}", self.0);
    }
}

/// One physical interrupt vector of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    pub source: InterruptSource,
    pub slot: VectorSlot,
    /// Interrupt-enable bit in the timer's mask register
    pub enable: Field,
}

/// How an output-compare unit drives its pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The compare register doubles as top, so the pin can only toggle on
    /// match: half the programmed frequency at a fixed 50% duty.
    Toggle { com: Field },
    /// Compare-match PWM with selectable polarity. Some timers also need a
    /// per-output PWM enable bit.
    Pwm { com: Field, enable: Option<Field> },
}

impl OutputMode {
    pub const fn is_toggle(&self) -> bool {
        matches!(self, Self::Toggle { .. })
    }

    /// Compare-output-mode field
    pub const fn com(&self) -> Field {
        match self {
            Self::Toggle { com } | Self::Pwm { com, .. } => *com,
        }
    }
}

/// Output-compare sub-channel of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCapability {
    pub sub: SubChannel,
    /// Board pin number handed to the pin service
    pub pin: u8,
    pub compare: Reg,
    pub mode: OutputMode,
}

/// One timer/counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerCapability {
    pub id: TimerId,
    pub width: CounterWidth,
    pub table: PrescalerTable,
    /// Register holding the counter's top value
    pub top: Reg,
    pub clock_select: Field,
    /// Field values selecting fast-PWM with `top` as TOP
    pub waveform: &'static [FieldValue],
    pub outputs: &'static [OutputCapability],
    pub vectors: &'static [Vector],
}

impl TimerCapability {
    pub fn output(&self, sub: SubChannel) -> Option<&'static OutputCapability> {
        self.outputs.iter().find(|output| output.sub == sub)
    }

    pub fn vector(&self, source: InterruptSource) -> Option<&'static Vector> {
        self.vectors.iter().find(|vector| vector.source == source)
    }
}

/// Everything the controller needs to know about one chip variant
#[derive(Debug)]
pub struct ChipCapabilities {
    pub name: &'static str,
    pub timers: &'static [TimerCapability],
}

impl ChipCapabilities {
    pub fn timer(&self, id: TimerId) -> Option<&'static TimerCapability> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    /// Position of a timer in declaration order
    pub fn position(&self, id: TimerId) -> Option<usize> {
        self.timers.iter().position(|timer| timer.id == id)
    }

    /// Number of dispatch slots the chip uses
    pub fn vector_count(&self) -> usize {
        self.timers
            .iter()
            .flat_map(|timer| timer.vectors.iter())
            .map(|vector| vector.slot.index() + 1)
            .max()
            .unwrap_or(0)
    }
}
