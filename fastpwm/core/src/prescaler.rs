//! Prescaler tables and the frequency-to-register resolver
//!
//! In fast-PWM mode the counter runs from 0 to a "top" value and wraps, so
//! the output frequency is
//!
//! ```text
//! f_out = f_clk / (prescaler * (top + 1))
//! ```
//!
//! [`resolve`] picks the smallest prescaler whose divided clock still lets
//! the requested period fit the counter, then derives `top`.

use core::fmt;

/// Divisors selectable through a 3-bit clock-select field.
pub const LINEAR_DIVISORS: [u16; 6] = [0, 1, 8, 64, 256, 1024];

/// Divisors selectable through a 4-bit clock-select field.
pub const EXTENDED_DIVISORS: [u16; 16] = [
    0, 1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384,
];

/// Index 0 of every table halts the counter.
pub const HALTED: u8 = 0;

/// Width of the counter register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterWidth {
    Bits8,
    Bits16,
}

impl CounterWidth {
    /// Largest value the counter can hold
    pub const fn max_count(self) -> u32 {
        match self {
            Self::Bits8 => 0xFF,
            Self::Bits16 => 0xFFFF,
        }
    }

    /// Number of bits in the counter
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
        }
    }
}

impl fmt::Display for CounterWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CounterWidth {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8}-bit", self.bits());
    }
}

/// Shape of the prescaler table behind a timer's clock-select field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrescalerTable {
    /// `{0, 1, 8, 64, 256, 1024}`
    Linear,
    /// `{0, 1, 2, 4, ..., 16384}`
    Extended,
}

impl PrescalerTable {
    /// All divisors, indexed by clock-select value
    pub const fn divisors(self) -> &'static [u16] {
        match self {
            Self::Linear => &LINEAR_DIVISORS,
            Self::Extended => &EXTENDED_DIVISORS,
        }
    }

    /// Divisor for a clock-select value, `None` past the end of the table
    pub fn divisor(self, index: u8) -> Option<u16> {
        self.divisors().get(index as usize).copied()
    }

    /// Highest valid clock-select value
    pub const fn last_index(self) -> u8 {
        (self.divisors().len() - 1) as u8
    }
}

impl fmt::Display for PrescalerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PrescalerTable {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Linear => defmt::write!(fmt, "linear"),
            Self::Extended => defmt::write!(fmt, "extended"),
        }
    }
}

/// Register values computed for one requested frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Clock-select value to write when the timer starts
    pub index: u8,
    /// Divisor selected by `index`
    pub prescaler: u16,
    /// `base_clock / target`, truncated
    pub frequency_count: u32,
    /// Counter top value
    pub period: u32,
}

impl Resolution {
    /// Compare value for a duty cycle of `1 / duty_divisor`.
    ///
    /// # Panics
    ///
    /// Panics if `duty_divisor` is 0.
    pub const fn pulse_width(&self, duty_divisor: u16) -> u32 {
        self.period / duty_divisor as u32
    }

    /// Whether `period` can be programmed without truncation
    pub const fn fits(&self, width: CounterWidth) -> bool {
        self.period <= width.max_count()
    }

    /// Frequency the counter actually produces.
    ///
    /// Divides in two steps so a large prescaler does not quantise the
    /// product before the division.
    pub const fn output_frequency(&self, base_clock_hz: u32) -> u32 {
        output_frequency(base_clock_hz, self.prescaler, self.period)
    }
}

/// Frequency produced by a running counter with the given prescaler and top.
///
/// Returns 0 for a halted counter.
pub const fn output_frequency(base_clock_hz: u32, prescaler: u16, top: u32) -> u32 {
    if prescaler == 0 {
        return 0;
    }
    (base_clock_hz / prescaler as u32) / top.saturating_add(1)
}

/// Picks the prescaler and period register for `target_hz`.
///
/// The search walks the table upward from the smallest usable divisor and
/// stops at the first entry satisfying
/// `frequency_count <= 1 + divisor * max_count`. When no entry satisfies
/// it, the last entry is used and the period is allowed to overflow the
/// counter; callers decide what to do with [`Resolution::fits`].
///
/// # Panics
///
/// Panics if `target_hz` is 0.
pub fn resolve(
    base_clock_hz: u32,
    target_hz: u32,
    width: CounterWidth,
    table: PrescalerTable,
) -> Resolution {
    let frequency_count = base_clock_hz / target_hz;
    let max_count = width.max_count();
    let divisors = table.divisors();
    let last = table.last_index();

    let mut index = HALTED + 1;
    while index < last && frequency_count > 1 + divisors[index as usize] as u32 * max_count {
        index += 1;
    }

    let prescaler = divisors[index as usize];
    let period = (frequency_count / prescaler as u32).wrapping_sub(1);

    Resolution {
        index,
        prescaler,
        frequency_count,
        period,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F_CPU: u32 = 16_000_000;

    #[test]
    fn test_tables_strictly_increasing() {
        for table in [PrescalerTable::Linear, PrescalerTable::Extended] {
            let divisors = table.divisors();
            assert_eq!(divisors[0], 0);
            for pair in divisors[1..].windows(2) {
                assert!(pair[0] < pair[1]);
            }
        }
        assert_eq!(PrescalerTable::Linear.last_index(), 5);
        assert_eq!(PrescalerTable::Extended.last_index(), 15);
    }

    #[test]
    fn test_linear_1khz_8bit() {
        let r = resolve(F_CPU, 1000, CounterWidth::Bits8, PrescalerTable::Linear);
        assert_eq!(r.frequency_count, 16_000);
        assert_eq!(r.index, 3);
        assert_eq!(r.prescaler, 64);
        assert_eq!(r.period, 249);
        assert_eq!(r.pulse_width(2), 124);
        assert_eq!(r.output_frequency(F_CPU), 1000);
    }

    #[test]
    fn test_extended_50hz_8bit() {
        let r = resolve(F_CPU, 50, CounterWidth::Bits8, PrescalerTable::Extended);
        assert_eq!(r.frequency_count, 320_000);
        assert_eq!(r.prescaler, 2048);
        assert_eq!(r.index, 12);
        assert_eq!(r.period, 155);
        // 1024 is one step too small
        assert!(320_000 > 1 + 1024 * 0xFF);
    }

    #[test]
    fn test_16bit_uses_smallest_divisor() {
        let r = resolve(F_CPU, 1000, CounterWidth::Bits16, PrescalerTable::Linear);
        assert_eq!(r.index, 1);
        assert_eq!(r.prescaler, 1);
        assert_eq!(r.period, 15_999);
        assert!(r.fits(CounterWidth::Bits16));
    }

    #[test]
    fn test_clamps_to_last_entry() {
        let r = resolve(F_CPU, 1, CounterWidth::Bits8, PrescalerTable::Linear);
        assert_eq!(r.index, 5);
        assert_eq!(r.prescaler, 1024);
        assert_eq!(r.period, 15_624);
        assert!(!r.fits(CounterWidth::Bits8));
    }

    #[test]
    fn test_never_selects_halted_index() {
        let r = resolve(F_CPU, F_CPU, CounterWidth::Bits8, PrescalerTable::Linear);
        assert_eq!(r.index, 1);
        assert_eq!(r.period, 0);
    }

    #[test]
    fn test_output_frequency_halted() {
        assert_eq!(output_frequency(F_CPU, 0, 249), 0);
    }
}
