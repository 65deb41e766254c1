//! Unit catalog organized by category

use crate::parse::parse_unit;
use crate::{Dimension, Unit};
use reckon_core::CalcError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Registry of all known units
///
/// Lookup is case-sensitive: `m` is meter, `mm` is millimeter. Full
/// names and plural forms resolve through the alias table.
pub struct UnitRegistry {
    units: HashMap<String, Arc<Unit>>,
    aliases: HashMap<String, String>,
    /// Symbols in registration order, for stable listings
    order: Vec<String>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
            order: Vec::new(),
        };
        registry.register_all_units();
        tracing::debug!("unit registry initialized with {} units", registry.order.len());
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<Arc<Unit>> {
        // Try direct lookup first
        if let Some(unit) = self.units.get(symbol) {
            return Some(Arc::clone(unit));
        }
        // Try alias lookup
        if let Some(canonical) = self.aliases.get(symbol) {
            return self.units.get(canonical).map(Arc::clone);
        }
        None
    }

    /// Get all unit symbols in registration order
    pub fn symbols(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Group unit symbols by category
    ///
    /// Categories come back in alphabetical order; symbols within a
    /// category keep their registration order.
    pub fn categories(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for symbol in &self.order {
            if let Some(unit) = self.units.get(symbol) {
                grouped.entry(unit.category.clone()).or_default().push(symbol.clone());
            }
        }
        grouped
    }

    /// Convert a value between two units named by string
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, CalcError> {
        let from_unit = self.resolve(from)?;
        let to_unit = self.resolve(to)?;
        let converted = from_unit.convert_to(value, &to_unit)?;
        Ok(converted)
    }

    /// Check whether two unit names are dimensionally compatible
    ///
    /// Unknown names are simply incompatible with everything.
    pub fn compatible(&self, a: &str, b: &str) -> bool {
        match (parse_unit(self, a), parse_unit(self, b)) {
            (Ok(ua), Ok(ub)) => ua.is_compatible(&ub),
            _ => false,
        }
    }

    /// Resolve a unit name, attaching a "similar units" suggestion on failure
    pub fn resolve(&self, name: &str) -> Result<Arc<Unit>, CalcError> {
        match parse_unit(self, name) {
            Ok(unit) => Ok(unit),
            Err(err) => {
                let mut calc_err: CalcError = err.into();
                if let Some(suggestion) = self.suggest(name) {
                    calc_err = calc_err.with_suggestion(suggestion);
                }
                Err(calc_err)
            }
        }
    }

    /// Find unit names similar to the given name (for error suggestions)
    pub fn suggest(&self, name: &str) -> Option<String> {
        let candidates = self
            .order
            .iter()
            .map(|s| s.as_str())
            .chain(self.aliases.keys().map(|s| s.as_str()));
        let matches = reckon_core::similar::find_similar(name, candidates);

        if matches.is_empty() {
            return None;
        }

        let best: Vec<&str> = matches.iter().take(3).map(|s| s.as_str()).collect();
        Some(format!("Similar: {}. Use list_units() for the full catalog.", best.join(", ")))
    }

    fn register(&mut self, unit: Unit) {
        self.order.push(unit.symbol.clone());
        self.units.insert(unit.symbol.clone(), Arc::new(unit));
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_current_units();
        self.register_volume_units();
        self.register_velocity_units();
        self.register_force_units();
        self.register_pressure_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_magnetic_flux_units();
    }

    fn register_length_units(&mut self) {
        // SI length units
        self.register(Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length"));
        self.register(Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length"));
        self.register(Unit::new("cm", "centimeter", Dimension::LENGTH, 0.01, "length"));
        self.register(Unit::new("mm", "millimeter", Dimension::LENGTH, 0.001, "length"));

        // Imperial/US length units
        self.register(Unit::new("in", "inch", Dimension::LENGTH, 0.0254, "length"));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, 0.3048, "length"));
        self.register(Unit::new("yd", "yard", Dimension::LENGTH, 0.9144, "length"));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, 1609.344, "length"));

        // Aliases
        self.alias("meter", "m");
        self.alias("meters", "m");
        self.alias("metre", "m");
        self.alias("metres", "m");
        self.alias("kilometer", "km");
        self.alias("kilometers", "km");
        self.alias("kilometre", "km");
        self.alias("kilometres", "km");
        self.alias("centimeter", "cm");
        self.alias("centimeters", "cm");
        self.alias("millimeter", "mm");
        self.alias("millimeters", "mm");
        self.alias("inch", "in");
        self.alias("inches", "in");
        self.alias("foot", "ft");
        self.alias("feet", "ft");
        self.alias("yard", "yd");
        self.alias("yards", "yd");
        self.alias("mile", "mi");
        self.alias("miles", "mi");
    }

    fn register_mass_units(&mut self) {
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, 1.0, "mass"));
        self.register(Unit::new("g", "gram", Dimension::MASS, 0.001, "mass"));
        self.register(Unit::new("mg", "milligram", Dimension::MASS, 0.000001, "mass"));
        self.register(Unit::new("t", "tonne", Dimension::MASS, 1000.0, "mass"));
        self.register(Unit::new("lb", "pound", Dimension::MASS, 0.45359237, "mass"));
        self.register(Unit::new("oz", "ounce", Dimension::MASS, 0.028349523125, "mass"));

        self.alias("kilogram", "kg");
        self.alias("kilograms", "kg");
        self.alias("gram", "g");
        self.alias("grams", "g");
        self.alias("milligram", "mg");
        self.alias("milligrams", "mg");
        self.alias("tonne", "t");
        self.alias("tonnes", "t");
        self.alias("ton", "t");
        self.alias("pound", "lb");
        self.alias("pounds", "lb");
        self.alias("lbs", "lb");
        self.alias("ounce", "oz");
        self.alias("ounces", "oz");
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("s", "second", Dimension::TIME, 1.0, "time"));
        self.register(Unit::new("ms", "millisecond", Dimension::TIME, 0.001, "time"));
        self.register(Unit::new("min", "minute", Dimension::TIME, 60.0, "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, 3600.0, "time"));
        self.register(Unit::new("d", "day", Dimension::TIME, 86400.0, "time"));

        self.alias("second", "s");
        self.alias("seconds", "s");
        self.alias("sec", "s");
        self.alias("millisecond", "ms");
        self.alias("milliseconds", "ms");
        self.alias("minute", "min");
        self.alias("minutes", "min");
        self.alias("hour", "h");
        self.alias("hours", "h");
        self.alias("hr", "h");
        self.alias("day", "d");
        self.alias("days", "d");
    }

    fn register_temperature_units(&mut self) {
        self.register(Unit::new("K", "kelvin", Dimension::TEMPERATURE, 1.0, "temperature"));
        // degC -> K: K = C + 273.15
        self.register(Unit::with_offset(
            "degC",
            "celsius",
            Dimension::TEMPERATURE,
            1.0,
            273.15,
            "temperature",
        ));
        // degF -> K: K = (F + 459.67) * 5/9
        self.register(Unit::with_offset(
            "degF",
            "fahrenheit",
            Dimension::TEMPERATURE,
            5.0 / 9.0,
            255.3722222222222, // 459.67 * 5/9
            "temperature",
        ));

        self.alias("kelvin", "K");
        self.alias("C", "degC");
        self.alias("celsius", "degC");
        self.alias("F", "degF");
        self.alias("fahrenheit", "degF");
    }

    fn register_current_units(&mut self) {
        self.register(Unit::new("A", "ampere", Dimension::CURRENT, 1.0, "current"));
        self.register(Unit::new("mA", "milliampere", Dimension::CURRENT, 0.001, "current"));

        self.alias("ampere", "A");
        self.alias("amperes", "A");
        self.alias("amp", "A");
        self.alias("amps", "A");
        self.alias("milliampere", "mA");
        self.alias("milliamp", "mA");
    }

    fn register_volume_units(&mut self) {
        // SI base for volume is the cubic meter; liters are 1/1000 of that
        self.register(Unit::new("L", "liter", Dimension::VOLUME, 0.001, "volume"));
        self.register(Unit::new("mL", "milliliter", Dimension::VOLUME, 0.000001, "volume"));
        self.register(Unit::new("gal", "gallon", Dimension::VOLUME, 0.003785411784, "volume"));
        self.register(Unit::new("qt", "quart", Dimension::VOLUME, 0.000946352946, "volume"));

        self.alias("liter", "L");
        self.alias("liters", "L");
        self.alias("litre", "L");
        self.alias("litres", "L");
        self.alias("milliliter", "mL");
        self.alias("milliliters", "mL");
        self.alias("ml", "mL");
        self.alias("gallon", "gal");
        self.alias("gallons", "gal");
        self.alias("quart", "qt");
        self.alias("quarts", "qt");
    }

    fn register_velocity_units(&mut self) {
        self.register(Unit::new("m/s", "meter per second", Dimension::VELOCITY, 1.0, "velocity"));
        self.register(Unit::new(
            "km/h",
            "kilometer per hour",
            Dimension::VELOCITY,
            0.2777777777777778,
            "velocity",
        ));
        self.register(Unit::new("mph", "mile per hour", Dimension::VELOCITY, 0.44704, "velocity"));
        self.register(Unit::new("kn", "knot", Dimension::VELOCITY, 0.5144444444444444, "velocity"));

        self.alias("mps", "m/s");
        self.alias("kph", "km/h");
        self.alias("knot", "kn");
        self.alias("knots", "kn");
    }

    fn register_force_units(&mut self) {
        self.register(Unit::new("N", "newton", Dimension::FORCE, 1.0, "force"));
        self.register(Unit::new("lbf", "pound-force", Dimension::FORCE, 4.4482216152605, "force"));

        self.alias("newton", "N");
        self.alias("newtons", "N");
    }

    fn register_pressure_units(&mut self) {
        self.register(Unit::new("Pa", "pascal", Dimension::PRESSURE, 1.0, "pressure"));
        self.register(Unit::new("kPa", "kilopascal", Dimension::PRESSURE, 1000.0, "pressure"));
        self.register(Unit::new("bar", "bar", Dimension::PRESSURE, 100000.0, "pressure"));
        self.register(Unit::new("psi", "pound per square inch", Dimension::PRESSURE, 6894.757293168361, "pressure"));
        self.register(Unit::new("atm", "atmosphere", Dimension::PRESSURE, 101325.0, "pressure"));

        self.alias("pascal", "Pa");
        self.alias("pascals", "Pa");
        self.alias("atmosphere", "atm");
        self.alias("atmospheres", "atm");
    }

    fn register_energy_units(&mut self) {
        self.register(Unit::new("J", "joule", Dimension::ENERGY, 1.0, "energy"));
        self.register(Unit::new("kJ", "kilojoule", Dimension::ENERGY, 1000.0, "energy"));
        self.register(Unit::new("cal", "calorie", Dimension::ENERGY, 4.184, "energy"));
        self.register(Unit::new("kcal", "kilocalorie", Dimension::ENERGY, 4184.0, "energy"));
        self.register(Unit::new("kWh", "kilowatt hour", Dimension::ENERGY, 3600000.0, "energy"));

        self.alias("joule", "J");
        self.alias("joules", "J");
        self.alias("calorie", "cal");
        self.alias("calories", "cal");
        self.alias("kilocalorie", "kcal");
        self.alias("kilocalories", "kcal");
        self.alias("kwh", "kWh");
    }

    fn register_power_units(&mut self) {
        self.register(Unit::new("W", "watt", Dimension::POWER, 1.0, "power"));
        self.register(Unit::new("kW", "kilowatt", Dimension::POWER, 1000.0, "power"));
        self.register(Unit::new("MW", "megawatt", Dimension::POWER, 1000000.0, "power"));
        self.register(Unit::new("hp", "horsepower", Dimension::POWER, 745.6998715822702, "power"));

        self.alias("watt", "W");
        self.alias("watts", "W");
        self.alias("kilowatt", "kW");
        self.alias("kilowatts", "kW");
        self.alias("megawatt", "MW");
        self.alias("megawatts", "MW");
        self.alias("horsepower", "hp");
    }

    fn register_magnetic_flux_units(&mut self) {
        self.register(Unit::new("Wb", "weber", Dimension::MAGNETIC_FLUX, 1.0, "magnetic flux"));
        self.register(Unit::new("Mx", "maxwell", Dimension::MAGNETIC_FLUX, 0.00000001, "magnetic flux"));

        self.alias("weber", "Wb");
        self.alias("webers", "Wb");
        self.alias("maxwell", "Mx");
        self.alias("maxwells", "Mx");
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
