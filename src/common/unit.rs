// src/common/unit.rs

use arrayvec::{ArrayString, ArrayVec};
use core::fmt;

/// SI-style magnitude prefix the meter can attach to a unit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UnitPrefix {
    Nano,
    Micro,
    Milli,
    Kilo,
    Mega,
}

impl UnitPrefix {
    /// Symbol as printed on the meter display ("u", not "µ").
    pub const fn symbol(self) -> &'static str {
        match self {
            UnitPrefix::Nano => "n",
            UnitPrefix::Micro => "u",
            UnitPrefix::Milli => "m",
            UnitPrefix::Kilo => "k",
            UnitPrefix::Mega => "M",
        }
    }
}

/// Base measurement unit, one bit each on the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BaseUnit {
    Ohm,
    Percent,
    Farad,
    Fahrenheit,
    Celsius,
    Ampere,
    Volt,
    Hertz,
}

impl BaseUnit {
    /// Token as printed by the meter's own software ("degC", not "°C").
    pub const fn symbol(self) -> &'static str {
        match self {
            BaseUnit::Ohm => "Ohm",
            BaseUnit::Percent => "%",
            BaseUnit::Farad => "F",
            BaseUnit::Fahrenheit => "degF",
            BaseUnit::Celsius => "degC",
            BaseUnit::Ampere => "A",
            BaseUnit::Volt => "V",
            BaseUnit::Hertz => "Hz",
        }
    }
}

/// Upper bound on rendered unit text: five prefix characters plus "degF".
pub const UNIT_TEXT_MAX: usize = 9;

/// The unit field of a decoded reading: magnitude prefixes in wire evaluation
/// order (n, u, m, k, M) followed by the base unit, if any.
///
/// Real hardware sets at most one prefix bit, but the wire format does not
/// forbid several; they are passed through in evaluation order, not clamped.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Unit {
    prefixes: ArrayVec<UnitPrefix, 5>,
    base: Option<BaseUnit>,
}

impl Unit {
    /// An empty unit (no prefix, no base).
    pub fn new() -> Self {
        Unit::default()
    }

    /// Appends a magnitude prefix.
    ///
    /// Each of the five prefix bits is evaluated once per frame, so the
    /// backing vector cannot overflow.
    pub(crate) fn push_prefix(&mut self, prefix: UnitPrefix) {
        let _ = self.prefixes.try_push(prefix);
    }

    /// Sets the base unit; the last write wins, matching the wire's override
    /// chain.
    pub(crate) fn set_base(&mut self, base: BaseUnit) {
        self.base = Some(base);
    }

    /// The magnitude prefixes, in wire evaluation order.
    pub fn prefixes(&self) -> &[UnitPrefix] {
        &self.prefixes
    }

    /// The base unit, if any bit matched.
    pub fn base(&self) -> Option<BaseUnit> {
        self.base
    }

    /// True when neither a prefix nor a base unit is present.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.base.is_none()
    }

    /// Renders the unit into a fixed-capacity string.
    ///
    /// [`UNIT_TEXT_MAX`] bounds the worst case, so the pushes cannot fail.
    pub fn render(&self) -> ArrayString<UNIT_TEXT_MAX> {
        let mut out = ArrayString::new();
        for prefix in &self.prefixes {
            let _ = out.try_push_str(prefix.symbol());
        }
        if let Some(base) = self.base {
            let _ = out.try_push_str(base.symbol());
        }
        out
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prefix in &self.prefixes {
            f.write_str(prefix.symbol())?;
        }
        if let Some(base) = self.base {
            f.write_str(base.symbol())?;
        }
        Ok(())
    }
}
