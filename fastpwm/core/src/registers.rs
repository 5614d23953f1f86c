//! Symbolic register access
//!
//! The controller never touches addresses. It names a register with [`Reg`],
//! a bit-field inside it with [`Field`], and goes through
//! [`RegisterAccess`], so the same logic runs against a PAC wrapper on the
//! target or a simulated register file on the host.

use core::fmt;

/// Timer/counter registers of the supported chips.
///
/// Names follow the datasheets; not every chip has every register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reg {
    // Timer0 (all chips)
    Tccr0a,
    Tccr0b,
    Ocr0a,
    Ocr0b,
    // Timer1
    Tccr1,
    Gtccr,
    Tccr1a,
    Tccr1b,
    Icr1,
    Ocr1a,
    Ocr1b,
    Ocr1c,
    // Timer2
    Tccr2a,
    Tccr2b,
    Ocr2a,
    Ocr2b,
    // Timer3
    Tccr3a,
    Tccr3b,
    Icr3,
    Ocr3a,
    // Timer4
    Tccr4a,
    Tccr4b,
    Tccr4c,
    Tccr4d,
    Ocr4a,
    Ocr4b,
    Ocr4c,
    Ocr4d,
    // Interrupt masks
    Timsk,
    Timsk0,
    Timsk1,
    Timsk2,
    Timsk3,
    Timsk4,
}

impl Reg {
    pub const COUNT: usize = 34;

    pub const ALL: [Reg; Reg::COUNT] = [
        Reg::Tccr0a,
        Reg::Tccr0b,
        Reg::Ocr0a,
        Reg::Ocr0b,
        Reg::Tccr1,
        Reg::Gtccr,
        Reg::Tccr1a,
        Reg::Tccr1b,
        Reg::Icr1,
        Reg::Ocr1a,
        Reg::Ocr1b,
        Reg::Ocr1c,
        Reg::Tccr2a,
        Reg::Tccr2b,
        Reg::Ocr2a,
        Reg::Ocr2b,
        Reg::Tccr3a,
        Reg::Tccr3b,
        Reg::Icr3,
        Reg::Ocr3a,
        Reg::Tccr4a,
        Reg::Tccr4b,
        Reg::Tccr4c,
        Reg::Tccr4d,
        Reg::Ocr4a,
        Reg::Ocr4b,
        Reg::Ocr4c,
        Reg::Ocr4d,
        Reg::Timsk,
        Reg::Timsk0,
        Reg::Timsk1,
        Reg::Timsk2,
        Reg::Timsk3,
        Reg::Timsk4,
    ];

    /// Position in [`Reg::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Datasheet name
    pub const fn name(self) -> &'static str {
        match self {
            Reg::Tccr0a => "TCCR0A",
            Reg::Tccr0b => "TCCR0B",
            Reg::Ocr0a => "OCR0A",
            Reg::Ocr0b => "OCR0B",
            Reg::Tccr1 => "TCCR1",
            Reg::Gtccr => "GTCCR",
            Reg::Tccr1a => "TCCR1A",
            Reg::Tccr1b => "TCCR1B",
            Reg::Icr1 => "ICR1",
            Reg::Ocr1a => "OCR1A",
            Reg::Ocr1b => "OCR1B",
            Reg::Ocr1c => "OCR1C",
            Reg::Tccr2a => "TCCR2A",
            Reg::Tccr2b => "TCCR2B",
            Reg::Ocr2a => "OCR2A",
            Reg::Ocr2b => "OCR2B",
            Reg::Tccr3a => "TCCR3A",
            Reg::Tccr3b => "TCCR3B",
            Reg::Icr3 => "ICR3",
            Reg::Ocr3a => "OCR3A",
            Reg::Tccr4a => "TCCR4A",
            Reg::Tccr4b => "TCCR4B",
            Reg::Tccr4c => "TCCR4C",
            Reg::Tccr4d => "TCCR4D",
            Reg::Ocr4a => "OCR4A",
            Reg::Ocr4b => "OCR4B",
            Reg::Ocr4c => "OCR4C",
            Reg::Ocr4d => "OCR4D",
            Reg::Timsk => "TIMSK",
            Reg::Timsk0 => "TIMSK0",
            Reg::Timsk1 => "TIMSK1",
            Reg::Timsk2 => "TIMSK2",
            Reg::Timsk3 => "TIMSK3",
            Reg::Timsk4 => "TIMSK4",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reg {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}

/// Contiguous bit-field inside a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub reg: Reg,
    pub shift: u8,
    pub width: u8,
}

impl Field {
    pub const fn new(reg: Reg, shift: u8, width: u8) -> Self {
        Self { reg, shift, width }
    }

    /// Single-bit field
    pub const fn bit(reg: Reg, bit: u8) -> Self {
        Self::new(reg, bit, 1)
    }

    /// Mask of the field's value, before shifting
    pub const fn mask(self) -> u16 {
        ((1u32 << self.width) - 1) as u16
    }

    /// Mask of the field in register position
    pub const fn mask_in_place(self) -> u16 {
        self.mask() << self.shift
    }

    /// Extract this field from a full register value
    pub const fn extract(self, register: u16) -> u16 {
        (register >> self.shift) & self.mask()
    }

    /// Replace this field inside a full register value
    pub const fn insert(self, register: u16, value: u16) -> u16 {
        (register & !self.mask_in_place()) | ((value & self.mask()) << self.shift)
    }
}

/// A field together with the value it must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValue {
    pub field: Field,
    pub value: u16,
}

impl FieldValue {
    pub const fn new(field: Field, value: u16) -> Self {
        Self { field, value }
    }
}

/// Read/write capability over the timer register file
pub trait RegisterAccess {
    /// Read a whole register
    fn read(&self, reg: Reg) -> u16;

    /// Write a whole register
    fn write(&mut self, reg: Reg, value: u16);

    /// Read one bit-field
    fn read_field(&self, field: Field) -> u16 {
        field.extract(self.read(field.reg))
    }

    /// Read-modify-write one bit-field, leaving the other bits untouched
    fn write_field(&mut self, field: Field, value: u16) {
        let current = self.read(field.reg);
        self.write(field.reg, field.insert(current, value));
    }
}

impl<R: RegisterAccess + ?Sized> RegisterAccess for &mut R {
    fn read(&self, reg: Reg) -> u16 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Reg, value: u16) {
        (**self).write(reg, value)
    }
}

/// Pin service: switches a pin to push-pull output
pub trait OutputPins {
    fn set_output(&mut self, pin: u8);
}

impl<P: OutputPins + ?Sized> OutputPins for &mut P {
    fn set_output(&mut self, pin: u8) {
        (**self).set_output(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_insert_keeps_neighbours() {
        let com = Field::new(Reg::Tccr0a, 4, 2);
        let value = com.insert(0b1100_0011, 0b10);
        assert_eq!(value, 0b1110_0011);
        assert_eq!(com.extract(value), 0b10);
        assert_eq!(com.insert(value, 0), 0b1100_0011);
    }

    #[test]
    fn test_field_value_masked() {
        let cs = Field::new(Reg::Tccr0b, 0, 3);
        assert_eq!(cs.mask(), 0b111);
        assert_eq!(cs.insert(0b0000_1000, 0xFF), 0b0000_1111);
    }

    #[test]
    fn test_reg_table_order() {
        for (i, reg) in Reg::ALL.iter().enumerate() {
            assert_eq!(reg.index(), i);
        }
        assert_eq!(Reg::Ocr4c.name(), "OCR4C");
    }
}
