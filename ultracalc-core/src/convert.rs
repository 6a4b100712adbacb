use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("unknown conversion type `{0}`")]
    UnknownCategory(String),
    #[error("`{unit}` is not a {category} unit")]
    UnknownUnit { category: Category, unit: String },
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

/// A kind of quantity that the converter knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Data,
}

// Units per base unit: meter, kilogram and byte.
const LENGTH: &[(&str, f64)] = &[
    ("meter", 1.0),
    ("kilometer", 0.001),
    ("mile", 0.000621371),
    ("foot", 3.28084),
    ("centimeter", 100.0),
    ("inch", 39.3701),
    ("yard", 1.09361),
];
const WEIGHT: &[(&str, f64)] = &[
    ("kilogram", 1.0),
    ("gram", 1000.0),
    ("pound", 2.20462),
    ("ounce", 35.274),
];
const DATA: &[(&str, f64)] = &[
    ("bit", 8.0),
    ("byte", 1.0),
    ("kilobyte", 1.0 / 1024.0),
    ("megabyte", 1.0 / (1024.0 * 1024.0)),
    ("gigabyte", 1.0 / (1024.0 * 1024.0 * 1024.0)),
];
const TEMPERATURE: &[&str] = &["celsius", "fahrenheit", "kelvin"];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Data,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
            Category::Data => "data",
        }
    }

    fn factors(self) -> Option<&'static [(&'static str, f64)]> {
        match self {
            Category::Length => Some(LENGTH),
            Category::Weight => Some(WEIGHT),
            Category::Data => Some(DATA),
            Category::Temperature => None,
        }
    }

    /// Names of the units, in the order a unit picker shows them.
    pub fn units(self) -> Vec<&'static str> {
        match self.factors() {
            Some(factors) => factors.iter().map(|(name, _)| *name).collect(),
            None => TEMPERATURE.to_vec(),
        }
    }

    fn factor(self, unit: &str) -> Result<f64, ConvertError> {
        self.factors()
            .and_then(|factors| factors.iter().find(|(name, _)| *name == unit))
            .map(|(_, factor)| *factor)
            .ok_or_else(|| self.unknown_unit(unit))
    }

    fn unknown_unit(self, unit: &str) -> ConvertError {
        ConvertError::UnknownUnit {
            category: self,
            unit: unit.to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConvertError::UnknownCategory(s.to_string()))
    }
}

fn to_kelvin(value: f64, unit: &str) -> Result<f64, ConvertError> {
    Ok(match unit {
        "celsius" => value + 273.15,
        "fahrenheit" => (value - 32.0) * 5.0 / 9.0 + 273.15,
        "kelvin" => value,
        _ => return Err(Category::Temperature.unknown_unit(unit)),
    })
}

fn from_kelvin(kelvin: f64, unit: &str) -> Result<f64, ConvertError> {
    Ok(match unit {
        "celsius" => kelvin - 273.15,
        "fahrenheit" => (kelvin - 273.15) * 9.0 / 5.0 + 32.0,
        "kelvin" => kelvin,
        _ => return Err(Category::Temperature.unknown_unit(unit)),
    })
}

/// Converts `value` from one unit to another of the same category.
pub fn convert(category: Category, value: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
    let result = if category == Category::Temperature {
        from_kelvin(to_kelvin(value, from)?, to)?
    } else {
        let base = value / category.factor(from)?;
        base * category.factor(to)?
    };
    debug!("{} {} = {} {}", value, from, result, to);
    Ok(result)
}

/// Formats a conversion result the way the converter shows it.
pub fn format_conversion(value: f64) -> String {
    format!("{:.4}", value)
}

/// Converts the text typed in the input field and formats the result.
pub fn convert_text(category: Category, input: &str, from: &str, to: &str) -> Result<String, ConvertError> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidNumber(input.to_string()))?;
    convert(category, value, from, to).map(format_conversion)
}
