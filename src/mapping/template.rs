//! Selector templates for group and radio controls.
//!
//! Group-style controls address one element per value, so their selectors
//! carry a placeholder that is expanded at interaction time, e.g.
//! `//label[normalize-space()='${value}']` or
//! `(//span[@class='ideal-radio'])[${index}]`.

/// Expanded with the trimmed token (checkbox groups) or the resolved
/// canonical label (exclusive radios).
pub const VALUE_PLACEHOLDER: &str = "${value}";

/// Expanded with the 1-based position from a radio-indexed lookup table.
pub const INDEX_PLACEHOLDER: &str = "${index}";

/// Substitute the `${value}` placeholder.
pub fn expand_value(template: &str, value: &str) -> String {
    template.replace(VALUE_PLACEHOLDER, value)
}

/// Substitute the `${index}` placeholder.
pub fn expand_index(template: &str, index: usize) -> String {
    template.replace(INDEX_PLACEHOLDER, &index.to_string())
}
