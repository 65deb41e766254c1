//! A numeric value paired with a unit

use crate::{ConversionError, Dimension, Unit};
use std::fmt;
use std::sync::Arc;

/// A value with an associated unit
#[derive(Debug, Clone)]
pub struct Quantity {
    /// The numeric magnitude, expressed in `unit`
    pub value: f64,
    /// The unit of measurement
    pub unit: Arc<Unit>,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, unit: Arc<Unit>) -> Self {
        Quantity { value, unit }
    }

    /// The dimensional signature of this quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Check whether all dimension exponents are zero
    pub fn is_dimensionless(&self) -> bool {
        self.unit.dimension.is_dimensionless()
    }

    /// Check if this quantity can be converted to the other's unit
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// The magnitude expressed in SI base units
    pub fn si_value(&self) -> f64 {
        self.unit.to_si(self.value)
    }

    /// Convert this quantity to another unit
    pub fn convert_to(&self, target: &Arc<Unit>) -> Result<Quantity, ConversionError> {
        let converted = self.unit.convert_to(self.value, target)?;
        Ok(Quantity::new(converted, Arc::clone(target)))
    }

    /// Add another quantity, keeping this quantity's unit
    ///
    /// The right operand is converted into the left operand's unit first,
    /// so `1 km + 500 m` yields `1.5 km`.
    pub fn add(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let other_converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value + other_converted.value, Arc::clone(&self.unit)))
    }

    /// Subtract another quantity, keeping this quantity's unit
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let other_converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value - other_converted.value, Arc::clone(&self.unit)))
    }

    /// Multiply by another quantity, composing the units
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.value * other.value, Arc::new(self.unit.multiply(&other.unit)))
    }

    /// Divide by another quantity, composing the units
    pub fn div(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.value / other.value, Arc::new(self.unit.divide(&other.unit)))
    }

    /// Raise to an integer power, scaling the unit's dimension
    pub fn powi(&self, exp: i32) -> Quantity {
        Quantity::new(self.value.powi(exp), Arc::new(self.unit.power(exp)))
    }

    /// Scale the magnitude by a dimensionless factor
    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::new(self.value * factor, Arc::clone(&self.unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension() && self.si_value() == other.si_value()
    }
}
