//! Reckon Units - Physical Quantity and Unit Conversion
//!
//! Provides unit-aware quantities with dimensional analysis over five
//! base dimensions: length, mass, time, temperature, and current.
//! Supports SI, imperial, and derived units with automatic conversion.
//!
//! Categories:
//! - Length (m, km, ft, mi, etc.)
//! - Mass (kg, g, lb, oz, etc.)
//! - Time (s, min, h, d)
//! - Temperature (K, degC, degF)
//! - Current (A, mA)
//! - Volume (L, mL, gal, qt)
//! - Velocity (m/s, km/h, mph, kn)
//! - Force (N, lbf)
//! - Pressure (Pa, bar, psi, etc.)
//! - Energy (J, cal, kWh, etc.)
//! - Power (W, kW, hp, etc.)
//! - Magnetic flux (Wb, Mx)

mod dimension;
mod parse;
mod quantity;
mod registry;
mod unit;

pub use dimension::Dimension;
pub use parse::{parse_quantity_string, parse_unit};
pub use quantity::Quantity;
pub use registry::UnitRegistry;
pub use unit::{ConversionError, Unit};
