//! Unit string parsing - parse expressions like "km/h" or "m^2"

use crate::unit::ConversionError;
use crate::{Unit, UnitRegistry};
use std::sync::Arc;

/// Parse a unit string into a Unit
///
/// Supported formats:
/// - Simple: "m", "kg", "s"
/// - Powers: "m^2", "s^-1"
/// - Products: "m*s", "kg*m"
/// - Quotients: "m/s", "kg/m^2"
/// - Combined: "kg*m/s^2"
pub fn parse_unit(registry: &UnitRegistry, s: &str) -> Result<Arc<Unit>, ConversionError> {
    let s = s.trim();

    if s.is_empty() {
        return Err(ConversionError::UnknownUnit("(empty)".to_string()));
    }

    // Try simple lookup first
    if let Some(unit) = registry.get(s) {
        return Ok(unit);
    }

    // Parse complex expression
    parse_unit_expression(registry, s).map(Arc::new)
}

/// Parse a complex unit expression like "kg*m/s^2"
fn parse_unit_expression(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    // Split by '/' to handle quotients
    let parts: Vec<&str> = s.splitn(2, '/').collect();

    let numerator = parse_product(registry, parts[0])?;

    if parts.len() == 1 {
        return Ok(numerator);
    }

    let denominator = parse_product(registry, parts[1])?;

    Ok(numerator.divide(&denominator))
}

/// Parse a product of units like "kg*m" or "m^2*s"
fn parse_product(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    // Split by '*' or '·' or ' '
    let factors: Vec<&str> = s
        .split(|c| c == '*' || c == '·' || c == ' ')
        .filter(|p| !p.is_empty())
        .collect();

    if factors.is_empty() {
        return Ok(Unit::dimensionless());
    }

    let mut result = parse_power(registry, factors[0])?;

    for factor in &factors[1..] {
        let unit = parse_power(registry, factor)?;
        result = result.multiply(&unit);
    }

    Ok(result)
}

/// Parse a unit with optional power like "m^2" or "s^-1"
fn parse_power(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    if let Some(caret_pos) = s.find('^') {
        let base = &s[..caret_pos];
        let exp_str = &s[caret_pos + 1..];

        let base_unit = lookup_base_unit(registry, base)?;
        let exponent: i32 = exp_str
            .parse()
            .map_err(|_| ConversionError::UnknownUnit(format!("invalid exponent: {}", exp_str)))?;

        return Ok(base_unit.power(exponent));
    }

    lookup_base_unit(registry, s)
}

/// Look up a base unit by symbol or alias
fn lookup_base_unit(registry: &UnitRegistry, s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();

    if s == "1" || s.is_empty() {
        return Ok(Unit::dimensionless());
    }

    registry
        .get(s)
        .map(|arc| (*arc).clone())
        .ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
}

/// Parse a quantity string like "5 m" or "100 kg"
///
/// Returns the numeric value and the unit, if one follows the number.
pub fn parse_quantity_string(
    registry: &UnitRegistry,
    s: &str,
) -> Result<(f64, Option<Arc<Unit>>), ConversionError> {
    let s = s.trim();

    // Find where the number ends and unit begins
    let mut split_pos = 0;
    let mut found_digit = false;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e' || c == 'E' {
            found_digit = true;
            split_pos = i + c.len_utf8();
        } else if found_digit {
            split_pos = i;
            break;
        } else {
            return Err(ConversionError::UnknownUnit(format!("no number found in: {}", s)));
        }
    }

    if !found_digit {
        return Err(ConversionError::UnknownUnit(format!("no number found in: {}", s)));
    }

    let num_str = s[..split_pos].trim();
    let unit_str = s[split_pos..].trim();

    let value: f64 = num_str
        .parse()
        .map_err(|_| ConversionError::UnknownUnit(format!("invalid number: {}", num_str)))?;

    let unit = if unit_str.is_empty() {
        None
    } else {
        Some(parse_unit(registry, unit_str)?)
    };

    Ok((value, unit))
}
