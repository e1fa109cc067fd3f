//! The closed set of control-interaction strategies.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// How a field value is applied to its control. The set is closed: unknown
/// kinds are rejected when a mapping is deserialized, not when it is used.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Set the control's textual value to the raw string.
    Text,
    /// Choose the option whose underlying value equals the field value.
    SelectByValue,
    /// Choose the option whose display label equals the field value.
    SelectByLabel,
    /// Comma-separated multi-value; one checkbox per trimmed token.
    CheckboxGroup,
    /// Two labeled options; anything not matching the first selects the second.
    RadioExclusive(RadioExclusiveSpec),
    /// Fixed name-to-position lookup; a miss is a non-fatal skip.
    RadioIndexed(RadioIndexedSpec),
}

impl ControlKind {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SelectByValue => "select_by_value",
            Self::SelectByLabel => "select_by_label",
            Self::CheckboxGroup => "checkbox_group",
            Self::RadioExclusive(_) => "radio_exclusive",
            Self::RadioIndexed(_) => "radio_indexed",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An exclusive two-option radio pair, e.g. yes/no or male/female.
///
/// Resolution is a catch-all by design: any value that does not match
/// `primary` (trimmed, case-insensitive) selects `fallback`. A typo in test
/// data therefore silently lands on the fallback option.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RadioExclusiveSpec {
    pub primary: String,
    pub fallback: String,
}

impl RadioExclusiveSpec {
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// Canonical label for a raw field value.
    pub fn resolve(&self, value: &str) -> &str {
        if value.trim().eq_ignore_ascii_case(&self.primary) {
            &self.primary
        } else {
            &self.fallback
        }
    }
}

/// A fixed name-to-position table for indexed radio sets, e.g. price tier
/// name to the nth radio in the group. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RadioIndexedSpec {
    pub options: HashMap<String, usize>,
}

impl RadioIndexedSpec {
    pub fn new<K: Into<String>>(options: impl IntoIterator<Item = (K, usize)>) -> Self {
        Self {
            options: options.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Position for a raw field value (trimmed, case-insensitive), if mapped.
    pub fn position_of(&self, value: &str) -> Option<usize> {
        let wanted = value.trim();
        self.options
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, position)| *position)
    }
}

const KIND_NAMES: &[&str] = &[
    "text",
    "select_by_value",
    "select_by_label",
    "checkbox_group",
    "radio_exclusive",
    "radio_indexed",
];

impl<'de> Deserialize<'de> for ControlKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(KindVisitor)
    }
}

struct KindVisitor;

impl<'de> Visitor<'de> for KindVisitor {
    type Value = ControlKind;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a control kind (string for simple kinds, or map with single key)")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match value {
            "text" => Ok(ControlKind::Text),
            "select_by_value" => Ok(ControlKind::SelectByValue),
            "select_by_label" => Ok(ControlKind::SelectByLabel),
            "checkbox_group" => Ok(ControlKind::CheckboxGroup),
            "radio_exclusive" | "radio_indexed" => Err(de::Error::custom(format!(
                "kind '{value}' requires a configuration map"
            ))),
            other => Err(de::Error::unknown_variant(other, KIND_NAMES)),
        }
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let key: String = map
            .next_key()?
            .ok_or_else(|| de::Error::custom("expected control kind key"))?;

        let kind = match key.as_str() {
            "text" => {
                let _: serde_yaml::Value = map.next_value()?;
                ControlKind::Text
            }
            "select_by_value" => {
                let _: serde_yaml::Value = map.next_value()?;
                ControlKind::SelectByValue
            }
            "select_by_label" => {
                let _: serde_yaml::Value = map.next_value()?;
                ControlKind::SelectByLabel
            }
            "checkbox_group" => {
                let _: serde_yaml::Value = map.next_value()?;
                ControlKind::CheckboxGroup
            }
            "radio_exclusive" => ControlKind::RadioExclusive(map.next_value()?),
            "radio_indexed" => ControlKind::RadioIndexed(map.next_value()?),
            other => return Err(de::Error::unknown_variant(other, KIND_NAMES)),
        };

        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_kind_from_string() {
        let kind: ControlKind = serde_yaml::from_str("text").unwrap();
        assert_eq!(kind, ControlKind::Text);
        let kind: ControlKind = serde_yaml::from_str("select_by_label").unwrap();
        assert_eq!(kind, ControlKind::SelectByLabel);
    }

    #[test]
    fn test_parse_radio_exclusive() {
        let yaml = r#"
radio_exclusive:
  primary: "Yes"
  fallback: "No"
"#;
        let kind: ControlKind = serde_yaml::from_str(yaml).unwrap();
        let ControlKind::RadioExclusive(spec) = kind else {
            panic!("expected radio_exclusive");
        };
        assert_eq!(spec.primary, "Yes");
        assert_eq!(spec.fallback, "No");
    }

    #[test]
    fn test_parse_radio_indexed() {
        let yaml = r#"
radio_indexed:
  options:
    silver: 2
    gold: 3
"#;
        let kind: ControlKind = serde_yaml::from_str(yaml).unwrap();
        let ControlKind::RadioIndexed(spec) = kind else {
            panic!("expected radio_indexed");
        };
        assert_eq!(spec.position_of("gold"), Some(3));
    }

    #[test]
    fn test_unknown_kind_rejected_at_parse_time() {
        let result: Result<ControlKind, _> = serde_yaml::from_str("toggle_switch");
        assert!(result.is_err());
    }

    #[test]
    fn test_radio_kind_as_bare_string_rejected() {
        let result: Result<ControlKind, _> = serde_yaml::from_str("radio_exclusive");
        assert!(result.is_err());
    }

    #[test]
    fn test_exclusive_resolution_is_catch_all() {
        let spec = RadioExclusiveSpec::new("Yes", "No");
        assert_eq!(spec.resolve("yes"), "Yes");
        assert_eq!(spec.resolve(" YES "), "Yes");
        assert_eq!(spec.resolve("no"), "No");
        // Anything unrecognized lands on the fallback.
        assert_eq!(spec.resolve("maybe"), "No");
        assert_eq!(spec.resolve(""), "No");
    }

    #[test]
    fn test_indexed_lookup_normalizes() {
        let spec = RadioIndexedSpec::new([("silver", 2), ("gold", 3)]);
        assert_eq!(spec.position_of("Gold"), Some(3));
        assert_eq!(spec.position_of("  SILVER  "), Some(2));
        assert_eq!(spec.position_of("bronze"), None);
    }
}
