// src/models/grid_spec.rs
//
// The per-instance grid configuration and the three-tier resolution
// that builds it: explicit option > host attribute > fallback.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::GridOptions;

pub const DEFAULT_COLUMNS: u32 = 12;
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_EXTEND: bool = true;

// host attribute names
pub const ATTR_VARIANT: &str = "data-grid";
pub const ATTR_COLUMNS: &str = "data-grid-columns";
pub const ATTR_COLOR: &str = "data-grid-color";
pub const ATTR_LINE_WIDTH: &str = "data-grid-line-width";
pub const ATTR_UNITS: &str = "data-grid-units";
pub const ATTR_EXTEND: &str = "data-grid-extend";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/************************** Variant ****************************************/

// Which line pattern a grid draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Variant {
    #[default]
    Columns,
    Rows,
    Squared,
    Baseline,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Columns => "columns",
            Variant::Rows => "rows",
            Variant::Squared => "squared",
            Variant::Baseline => "baseline",
        }
    }
}

impl FromStr for Variant {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "columns" => Ok(Variant::Columns),
            "rows" => Ok(Variant::Rows),
            "squared" => Ok(Variant::Squared),
            "baseline" => Ok(Variant::Baseline),
            _ => Err(UnknownValue {
                kind: "grid type",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Variant {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.as_str().to_string()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/************************** Units ******************************************/

// How the nominal line width is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Units {
    // layout pixels: divided by the device pixel ratio to get raster pixels
    #[default]
    LogicalPixel,
    // already raster pixels
    DevicePixel,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::LogicalPixel => "layoutPixel",
            Units::DevicePixel => "devicePixel",
        }
    }
}

impl FromStr for Units {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "layoutpixel" | "logicalpixel" | "css" | "px" => Ok(Units::LogicalPixel),
            "devicepixel" | "device" => Ok(Units::DevicePixel),
            _ => Err(UnknownValue {
                kind: "units",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Units> for String {
    fn from(units: Units) -> Self {
        units.as_str().to_string()
    }
}

/************************** Attribute source *******************************/

// Anything that can answer `getAttribute`-style lookups
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/************************** GridSpec ***************************************/

#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub columns: u32,
    pub line_width: f64,
    pub units: Units,
    pub variant: Variant,
    pub extend: bool,
    pub color: String,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            line_width: DEFAULT_LINE_WIDTH,
            units: Units::default(),
            variant: Variant::default(),
            extend: DEFAULT_EXTEND,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl GridSpec {
    // Evaluated once when a controller is constructed. Only `columns`
    // changes afterwards, through the explicit update operation.
    pub fn resolve<A: AttributeSource + ?Sized>(options: &GridOptions, attributes: &A) -> Self {
        let columns = options
            .columns
            .filter(|&c| {
                if c == 0 {
                    warn!("Ignoring explicit column count 0");
                }
                c >= 1
            })
            .or_else(|| parse_attribute(attributes, ATTR_COLUMNS, parse_columns))
            .unwrap_or(DEFAULT_COLUMNS);

        let line_width = options
            .line_width
            .filter(|&w| {
                let valid = is_valid_line_width(w);
                if !valid {
                    warn!("Ignoring explicit line width {}", w);
                }
                valid
            })
            .or_else(|| parse_attribute(attributes, ATTR_LINE_WIDTH, parse_line_width))
            .unwrap_or(DEFAULT_LINE_WIDTH);

        let units = options
            .units
            .or_else(|| parse_attribute(attributes, ATTR_UNITS, |s| s.parse().ok()))
            .unwrap_or_default();

        let variant = options
            .grid_type
            .or_else(|| parse_attribute(attributes, ATTR_VARIANT, |s| s.parse().ok()))
            .unwrap_or_else(|| {
                if attributes.attribute(ATTR_VARIANT).is_none() {
                    warn!(
                        "Element has no {} attribute and no grid type was provided in options. Falling back to \"columns\".",
                        ATTR_VARIANT
                    );
                }
                Variant::Columns
            });

        let extend = options
            .extend
            .or_else(|| parse_attribute(attributes, ATTR_EXTEND, parse_flag))
            .unwrap_or(DEFAULT_EXTEND);

        let color = options
            .color
            .clone()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| {
                attributes
                    .attribute(ATTR_COLOR)
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
            })
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        Self {
            columns,
            line_width,
            units,
            variant,
            extend,
            color,
        }
    }
}

// Reads one attribute and parses it, warning when present but unusable
fn parse_attribute<A, T, F>(attributes: &A, name: &str, parse: F) -> Option<T>
where
    A: AttributeSource + ?Sized,
    F: Fn(&str) -> Option<T>,
{
    let raw = attributes.attribute(name)?;
    let parsed = parse(raw);
    if parsed.is_none() {
        warn!("Ignoring unparseable attribute {}=\"{}\"", name, raw);
    }
    parsed
}

// Leading integer, like parseInt: "12", " 8 ", "10px"
pub fn parse_columns(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<u32>().ok().filter(|&c| c >= 1)
}

pub fn parse_line_width(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|&w| is_valid_line_width(w))
}

// A bare attribute (empty value) counts as set
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn is_valid_line_width(width: f64) -> bool {
    width.is_finite() && width >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_variant_from_str() {
            assert_eq!("columns".parse::<Variant>(), Ok(Variant::Columns));
            assert_eq!(" Squared ".parse::<Variant>(), Ok(Variant::Squared));
            assert_eq!("BASELINE".parse::<Variant>(), Ok(Variant::Baseline));
            assert!("diagonal".parse::<Variant>().is_err());
        }

        #[test]
        fn test_units_from_str() {
            assert_eq!("devicepixel".parse::<Units>(), Ok(Units::DevicePixel));
            assert_eq!("layoutPixel".parse::<Units>(), Ok(Units::LogicalPixel));
            assert_eq!("logicalPixel".parse::<Units>(), Ok(Units::LogicalPixel));
            assert!("em".parse::<Units>().is_err());
        }

        #[test]
        fn test_parse_columns() {
            assert_eq!(parse_columns("12"), Some(12));
            assert_eq!(parse_columns(" 8 "), Some(8));
            assert_eq!(parse_columns("10px"), Some(10));
            assert_eq!(parse_columns("0"), None);
            assert_eq!(parse_columns("abc"), None);
            assert_eq!(parse_columns("-3"), None);
        }

        #[test]
        fn test_parse_line_width() {
            assert_eq!(parse_line_width("0.5"), Some(0.5));
            assert_eq!(parse_line_width("4px"), Some(4.0));
            assert_eq!(parse_line_width("-1"), None);
            assert_eq!(parse_line_width("NaN"), None);
        }

        #[test]
        fn test_parse_flag() {
            assert_eq!(parse_flag(""), Some(true));
            assert_eq!(parse_flag("False"), Some(false));
            assert_eq!(parse_flag("maybe"), None);
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_fallbacks_without_options_or_attributes() {
            let spec = GridSpec::resolve(&GridOptions::default(), &attrs(&[]));
            assert_eq!(spec, GridSpec::default());
            assert_eq!(spec.columns, 12);
            assert_eq!(spec.line_width, 1.0);
            assert_eq!(spec.units, Units::LogicalPixel);
            assert_eq!(spec.variant, Variant::Columns);
            assert_eq!(spec.color, "#000000");
            assert!(spec.extend);
        }

        #[test]
        fn test_attributes_override_fallbacks() {
            let source = attrs(&[
                ("data-grid", "rows"),
                ("data-grid-columns", "6"),
                ("data-grid-color", "#ff0000"),
                ("data-grid-line-width", "2"),
                ("data-grid-units", "devicePixel"),
                ("data-grid-extend", "false"),
            ]);
            let spec = GridSpec::resolve(&GridOptions::default(), &source);
            assert_eq!(spec.variant, Variant::Rows);
            assert_eq!(spec.columns, 6);
            assert_eq!(spec.color, "#ff0000");
            assert_eq!(spec.line_width, 2.0);
            assert_eq!(spec.units, Units::DevicePixel);
            assert!(!spec.extend);
        }

        #[test]
        fn test_options_override_attributes() {
            let source = attrs(&[
                ("data-grid", "rows"),
                ("data-grid-columns", "6"),
                ("data-grid-color", "#ff0000"),
            ]);
            let options = GridOptions {
                columns: Some(20),
                grid_type: Some(Variant::Squared),
                color: Some("blue".to_string()),
                ..GridOptions::default()
            };
            let spec = GridSpec::resolve(&options, &source);
            assert_eq!(spec.columns, 20);
            assert_eq!(spec.variant, Variant::Squared);
            assert_eq!(spec.color, "blue");
        }

        #[test]
        fn test_invalid_values_fall_through() {
            let source = attrs(&[("data-grid-columns", "zero"), ("data-grid", "hexagon")]);
            let options = GridOptions {
                columns: Some(0),
                line_width: Some(-2.0),
                ..GridOptions::default()
            };
            let spec = GridSpec::resolve(&options, &source);
            assert_eq!(spec.columns, DEFAULT_COLUMNS);
            assert_eq!(spec.line_width, DEFAULT_LINE_WIDTH);
            assert_eq!(spec.variant, Variant::Columns);
        }

        #[test]
        fn test_explicit_zero_columns_uses_attribute() {
            let source = attrs(&[("data-grid-columns", "9")]);
            let options = GridOptions {
                columns: Some(0),
                ..GridOptions::default()
            };
            assert_eq!(GridSpec::resolve(&options, &source).columns, 9);
        }
    }
}
