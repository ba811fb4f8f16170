// src/models/data_model.rs
// the JSON-based grid options model

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Units, Variant};
use crate::services::ElementId;

#[derive(Debug, Error)]
#[error("invalid grid options: {0}")]
pub struct OptionsError(#[from] serde_json::Error);

// Which host surfaces a grid should be attached to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Selector(String),
    Element(ElementId),
    Elements(Vec<ElementId>),
}

impl Default for Target {
    fn default() -> Self {
        Target::Selector(String::new())
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<ElementId> for Target {
    fn from(element: ElementId) -> Self {
        Target::Element(element)
    }
}

impl From<Vec<ElementId>> for Target {
    fn from(elements: Vec<ElementId>) -> Self {
        Target::Elements(elements)
    }
}

// Explicit options; anything left as None is read from the host
// attributes, then from the built-in fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    #[serde(default)]
    pub targets: Target,
    #[serde(default)]
    pub columns: Option<u32>,
    #[serde(default)]
    pub line_width: Option<f64>,
    #[serde(default)]
    pub units: Option<Units>,
    #[serde(default)]
    pub extend: Option<bool>,
    #[serde(default)]
    pub grid_type: Option<Variant>,
    #[serde(default)]
    pub color: Option<String>,
}

impl GridOptions {
    pub fn new(targets: impl Into<Target>) -> Self {
        Self {
            targets: targets.into(),
            ..Self::default()
        }
    }

    pub fn from_json(content: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn extend(mut self, extend: bool) -> Self {
        self.extend = Some(extend);
        self
    }

    pub fn grid_type(mut self, variant: Variant) -> Self {
        self.grid_type = Some(variant);
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_options() {
        let options = GridOptions::from_json(
            r#"{
                "targets": "[data-grid-type]",
                "columns": 20,
                "lineWidth": 4,
                "units": "devicepixel",
                "extend": true
            }"#,
        )
        .unwrap();

        assert_eq!(options.targets, Target::Selector("[data-grid-type]".to_string()));
        assert_eq!(options.columns, Some(20));
        assert_eq!(options.line_width, Some(4.0));
        assert_eq!(options.units, Some(Units::DevicePixel));
        assert_eq!(options.extend, Some(true));
        assert_eq!(options.grid_type, None);
    }

    #[test]
    fn test_parse_element_targets() {
        let single = GridOptions::from_json(r#"{ "targets": 3, "gridType": "rows" }"#).unwrap();
        assert_eq!(single.targets, Target::Element(ElementId(3)));
        assert_eq!(single.grid_type, Some(Variant::Rows));

        let list = GridOptions::from_json(r#"{ "targets": [1, 2] }"#).unwrap();
        assert_eq!(
            list.targets,
            Target::Elements(vec![ElementId(1), ElementId(2)])
        );
    }

    #[test]
    fn test_missing_targets_defaults_to_empty_selector() {
        let options = GridOptions::from_json(r#"{ "columns": 4 }"#).unwrap();
        assert_eq!(options.targets, Target::Selector(String::new()));
    }

    #[test]
    fn test_unknown_grid_type_is_rejected() {
        assert!(GridOptions::from_json(r#"{ "targets": "a", "gridType": "zigzag" }"#).is_err());
    }

    #[test]
    fn test_builder() {
        let options = GridOptions::new(".panel")
            .columns(8)
            .grid_type(Variant::Baseline)
            .color("#336699");
        assert_eq!(options.targets, Target::Selector(".panel".to_string()));
        assert_eq!(options.columns, Some(8));
        assert_eq!(options.grid_type, Some(Variant::Baseline));
        assert_eq!(options.color.as_deref(), Some("#336699"));
    }
}
