//! Timer, sub-channel and interrupt-source identifiers

use core::fmt;

/// Timer/counter number as named in the datasheet (Timer0, Timer1, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u8);

impl TimerId {
    pub const T0: TimerId = TimerId(0);
    pub const T1: TimerId = TimerId(1);
    pub const T2: TimerId = TimerId(2);
    pub const T3: TimerId = TimerId(3);
    pub const T4: TimerId = TimerId(4);

    /// Get the raw timer number
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timer{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Timer{=u8}", self.0);
    }
}

/// Output-compare unit of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubChannel {
    A,
    B,
    C,
    D,
}

impl SubChannel {
    /// All sub-channels in register order
    pub const ALL: [SubChannel; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Parse a sub-channel letter, either case
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a' | 'A' => Some(Self::A),
            'b' | 'B' => Some(Self::B),
            'c' | 'C' => Some(Self::C),
            'd' | 'D' => Some(Self::D),
            _ => None,
        }
    }

    /// Upper-case letter
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// Position in [`SubChannel::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SubChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SubChannel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=char}", self.letter());
    }
}

/// Output polarity of a compare-match PWM pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Set at bottom, clear on compare match
    #[default]
    NonInverting,
    /// Clear at bottom, set on compare match
    Inverting,
}

impl Polarity {
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Self::Inverting
        } else {
            Self::NonInverting
        }
    }

    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::Inverting)
    }

    /// Compare-output-mode field value (`COMnx1:0`)
    pub const fn com_bits(self) -> u16 {
        2 + self.is_inverted() as u16
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Polarity {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NonInverting => defmt::write!(fmt, "non-inverting"),
            Self::Inverting => defmt::write!(fmt, "inverting"),
        }
    }
}

/// What raises a timer interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptSource {
    /// Counter wrapped past top
    Overflow,
    /// Counter matched a sub-channel's compare register
    Compare(SubChannel),
}

impl fmt::Display for InterruptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "overflow"),
            Self::Compare(sub) => write!(f, "compare {}", sub),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterruptSource {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Overflow => defmt::write!(fmt, "overflow"),
            Self::Compare(sub) => defmt::write!(fmt, "compare {}", sub),
        }
    }
}

/// Timers addressed by `start`/`stop`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Every timer of the active chip, in declaration order
    #[default]
    All,
    Timer(TimerId),
}

impl Target {
    pub fn includes(self, timer: TimerId) -> bool {
        match self {
            Self::All => true,
            Self::Timer(id) => id == timer,
        }
    }
}

impl From<TimerId> for Target {
    fn from(timer: TimerId) -> Self {
        Self::Timer(timer)
    }
}

/// Requested waveform for one sub-channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub frequency_hz: u32,
    /// Duty cycle is `1 / duty_divisor`; ignored by toggle outputs
    pub duty_divisor: u16,
    pub polarity: Polarity,
}

impl ChannelConfig {
    /// Default duty divisor, giving a 50% duty cycle
    pub const DEFAULT_DUTY_DIVISOR: u16 = 2;

    pub const fn new(frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            duty_divisor: Self::DEFAULT_DUTY_DIVISOR,
            polarity: Polarity::NonInverting,
        }
    }

    pub const fn duty_divisor(mut self, duty_divisor: u16) -> Self {
        self.duty_divisor = duty_divisor;
        self
    }

    pub const fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub const fn inverted(self) -> Self {
        self.polarity(Polarity::Inverting)
    }
}
