//! Unit representation with conversion factors

use crate::Dimension;
use reckon_core::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Represents a physical unit with its dimension and conversion factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "s")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "second")
    pub name: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to SI base unit (value_si = value * to_si_factor + to_si_offset)
    pub to_si_factor: f64,
    /// Offset for non-proportional units like temperature (Celsius, Fahrenheit)
    pub to_si_offset: f64,
    /// Category for organization (e.g., "length", "mass", "time")
    pub category: String,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimension, to_si_factor: f64, category: &str) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset: 0.0,
            category: category.to_string(),
        }
    }

    /// The unit of pure numbers, all dimension exponents zero
    pub fn dimensionless() -> Self {
        Unit::new("1", "dimensionless", Dimension::DIMENSIONLESS, 1.0, "dimensionless")
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: f64,
        to_si_offset: f64,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset,
            category: category.to_string(),
        }
    }

    /// Check if this is a base SI unit
    pub fn is_si_base(&self) -> bool {
        self.to_si_factor == 1.0 && self.to_si_offset == 0.0
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.to_si_offset != 0.0
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI base unit
    pub fn to_si(&self, value: f64) -> f64 {
        // value_si = value * factor + offset
        value * self.to_si_factor + self.to_si_offset
    }

    /// Convert a value from SI base unit to this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        // value = (value_si - offset) / factor
        (value_si - self.to_si_offset) / self.to_si_factor
    }

    /// Convert a value from this unit to another unit
    ///
    /// Always goes through the SI base representation so that affine
    /// (offset-bearing) units convert correctly.
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, ConversionError> {
        if !self.is_compatible(target) {
            return Err(ConversionError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        Ok(target.from_si(self.to_si(value)))
    }

    /// Multiply two units (e.g., m * m -> m·m)
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit {
            symbol: format!("{}·{}", self.symbol, other.symbol),
            name: format!("{} {}", self.name, other.name),
            dimension: self.dimension.multiply(&other.dimension),
            to_si_factor: self.to_si_factor * other.to_si_factor,
            to_si_offset: 0.0, // Product of offset units loses meaning
            category: "derived".to_string(),
        }
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Unit {
        Unit {
            symbol: format!("{}/{}", self.symbol, other.symbol),
            name: format!("{} per {}", self.name, other.name),
            dimension: self.dimension.divide(&other.dimension),
            to_si_factor: self.to_si_factor / other.to_si_factor,
            to_si_offset: 0.0,
            category: "derived".to_string(),
        }
    }

    /// Raise unit to an integer power (e.g., m^2, s^-1)
    pub fn power(&self, exp: i32) -> Unit {
        let symbol = if exp == 1 {
            self.symbol.clone()
        } else {
            format!("{}^{}", self.symbol, exp)
        };

        Unit {
            symbol,
            name: format!("{} to the {}", self.name, exp),
            dimension: self.dimension.power(exp),
            to_si_factor: self.to_si_factor.powi(exp),
            to_si_offset: 0.0,
            category: self.category.clone(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors that can occur during unit lookup and conversion
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// Units have incompatible dimensions
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },
    /// Unknown unit symbol
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

impl From<ConversionError> for CalcError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::IncompatibleDimensions { from, to, from_dim, to_dim } => {
                CalcError::dimensionality(format!(
                    "Cannot convert {} ({}) to {} ({}): incompatible dimensions",
                    from, from_dim, to, to_dim
                ))
                .expecting(from_dim.to_string())
                .with_found(to_dim.to_string())
                .with_suggestion("Choose units that measure the same physical dimension")
            }
            ConversionError::UnknownUnit(name) => CalcError::unknown_unit(&name),
        }
    }
}
