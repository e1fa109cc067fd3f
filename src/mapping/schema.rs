//! Declarative field mappings: which record field drives which control.

use super::kind::{ControlKind, RadioExclusiveSpec, RadioIndexedSpec};
use super::template::{INDEX_PLACEHOLDER, VALUE_PLACEHOLDER};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// One entry of a mapping table: record field name, control locator, and the
/// interaction strategy. Group and radio selectors are templates, see
/// [`template`](super::template).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldSpec {
    /// Record field name, e.g. `Make`.
    pub field: String,
    /// CSS or XPath locator (a template for group/radio kinds).
    pub selector: String,
    /// Interaction strategy.
    pub kind: ControlKind,
}

impl FieldSpec {
    pub fn text(field: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            selector: selector.into(),
            kind: ControlKind::Text,
        }
    }

    pub fn select_by_value(field: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            selector: selector.into(),
            kind: ControlKind::SelectByValue,
        }
    }

    pub fn select_by_label(field: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            selector: selector.into(),
            kind: ControlKind::SelectByLabel,
        }
    }

    pub fn checkbox_group(field: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            selector: selector.into(),
            kind: ControlKind::CheckboxGroup,
        }
    }

    pub fn radio_exclusive(
        field: impl Into<String>,
        selector: impl Into<String>,
        primary: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            selector: selector.into(),
            kind: ControlKind::RadioExclusive(RadioExclusiveSpec::new(primary, fallback)),
        }
    }

    pub fn radio_indexed<K: Into<String>>(
        field: impl Into<String>,
        selector: impl Into<String>,
        options: impl IntoIterator<Item = (K, usize)>,
    ) -> Self {
        Self {
            field: field.into(),
            selector: selector.into(),
            kind: ControlKind::RadioIndexed(RadioIndexedSpec::new(options)),
        }
    }
}

/// A per-page mapping table, applied in declared order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldMapping {
    /// Logical page name, used in logs.
    pub page: String,
    /// Field entries in application order.
    pub fields: Vec<FieldSpec>,
}

impl FieldMapping {
    /// Build a mapping in code.
    pub fn new(page: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            page: page.into(),
            fields,
        }
    }

    /// Load a mapping from a YAML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a mapping from a YAML string and validate it.
    pub fn parse(yaml: &str) -> Result<Self> {
        let mapping: FieldMapping = serde_yaml::from_str(yaml)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Reject malformed tables at configuration time rather than mid-fill.
    pub fn validate(&self) -> Result<()> {
        if self.page.is_empty() {
            return Err(Error::Config("mapping page name is required".into()));
        }
        if self.fields.is_empty() {
            return Err(Error::Config(format!(
                "mapping '{}' has no fields",
                self.page
            )));
        }

        let mut seen = HashSet::new();
        for spec in &self.fields {
            if spec.field.is_empty() {
                return Err(Error::Config(format!(
                    "mapping '{}': field name is required",
                    self.page
                )));
            }
            if spec.selector.is_empty() {
                return Err(Error::Config(format!(
                    "mapping '{}': field '{}' has an empty selector",
                    self.page, spec.field
                )));
            }
            if !seen.insert(spec.field.as_str()) {
                return Err(Error::Config(format!(
                    "mapping '{}': duplicate field '{}'",
                    self.page, spec.field
                )));
            }
            match &spec.kind {
                ControlKind::CheckboxGroup | ControlKind::RadioExclusive(_) => {
                    if !spec.selector.contains(VALUE_PLACEHOLDER) {
                        return Err(Error::Config(format!(
                            "mapping '{}': field '{}' ({}) needs a '{}' placeholder in its selector",
                            self.page,
                            spec.field,
                            spec.kind,
                            VALUE_PLACEHOLDER
                        )));
                    }
                }
                ControlKind::RadioIndexed(indexed) => {
                    if !spec.selector.contains(INDEX_PLACEHOLDER) {
                        return Err(Error::Config(format!(
                            "mapping '{}': field '{}' (radio_indexed) needs a '{}' placeholder in its selector",
                            self.page, spec.field, INDEX_PLACEHOLDER
                        )));
                    }
                    if indexed.options.is_empty() {
                        return Err(Error::Config(format!(
                            "mapping '{}': field '{}' (radio_indexed) has no options",
                            self.page, spec.field
                        )));
                    }
                    if indexed.options.values().any(|&p| p == 0) {
                        return Err(Error::Config(format!(
                            "mapping '{}': field '{}' (radio_indexed) positions are 1-based",
                            self.page, spec.field
                        )));
                    }
                }
                ControlKind::Text | ControlKind::SelectByValue | ControlKind::SelectByLabel => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_mapping() {
        let yaml = r##"
page: vehicle
fields:
  - field: Make
    selector: "#make"
    kind: select_by_value
  - field: CylinderCapacity
    selector: "#cylindercapacity"
    kind: text
"##;
        let mapping = FieldMapping::parse(yaml).unwrap();
        assert_eq!(mapping.page, "vehicle");
        assert_eq!(mapping.fields.len(), 2);
        assert_eq!(mapping.fields[0].kind, ControlKind::SelectByValue);
        assert_eq!(mapping.fields[1].kind, ControlKind::Text);
    }

    #[test]
    fn test_parse_group_and_radio_kinds() {
        let yaml = r##"
page: insurant
fields:
  - field: Hobbies
    selector: "//label[normalize-space()='${value}']"
    kind: checkbox_group
  - field: Gender
    selector: "//label[normalize-space()='${value}']"
    kind:
      radio_exclusive:
        primary: "Male"
        fallback: "Female"
  - field: PriceOption
    selector: "(//span[@class='ideal-radio'])[${index}]"
    kind:
      radio_indexed:
        options:
          silver: 2
          gold: 3
"##;
        let mapping = FieldMapping::parse(yaml).unwrap();
        assert_eq!(mapping.fields.len(), 3);
        assert!(matches!(mapping.fields[1].kind, ControlKind::RadioExclusive(_)));
        assert!(matches!(mapping.fields[2].kind, ControlKind::RadioIndexed(_)));
    }

    #[test]
    fn test_validation_empty_page_name() {
        let result = FieldMapping::new("", vec![FieldSpec::text("A", "#a")]).validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_no_fields() {
        let result = FieldMapping::new("vehicle", vec![]).validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_duplicate_field() {
        let mapping = FieldMapping::new(
            "vehicle",
            vec![FieldSpec::text("Make", "#make"), FieldSpec::text("Make", "#m2")],
        );
        let err = mapping.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_validation_group_requires_value_placeholder() {
        let mapping = FieldMapping::new(
            "insurant",
            vec![FieldSpec::checkbox_group("Hobbies", "//label")],
        );
        let err = mapping.validate().unwrap_err();
        assert!(err.to_string().contains("${value}"));
    }

    #[test]
    fn test_validation_indexed_requires_index_placeholder() {
        let mapping = FieldMapping::new(
            "price",
            vec![FieldSpec::radio_indexed("PriceOption", "//span", [("silver", 2)])],
        );
        let err = mapping.validate().unwrap_err();
        assert!(err.to_string().contains("${index}"));
    }

    #[test]
    fn test_validation_indexed_rejects_zero_position() {
        let mapping = FieldMapping::new(
            "price",
            vec![FieldSpec::radio_indexed(
                "PriceOption",
                "(//span)[${index}]",
                [("silver", 0)],
            )],
        );
        let err = mapping.validate().unwrap_err();
        assert!(err.to_string().contains("1-based"));
    }

    #[test]
    fn test_parse_unknown_kind_fails() {
        let yaml = r##"
page: vehicle
fields:
  - field: Make
    selector: "#make"
    kind: dropdown
"##;
        assert!(FieldMapping::parse(yaml).is_err());
    }

    #[test]
    fn test_load_example_mapping() {
        let mapping = FieldMapping::load("mappings/vehicle.yaml").unwrap();
        assert_eq!(mapping.page, "vehicle");
        assert!(mapping.fields.iter().any(|f| f.field == "RightHand"));
    }
}
