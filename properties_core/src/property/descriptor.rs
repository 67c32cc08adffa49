// properties_core/src/property/descriptor.rs
use serde::{Deserialize, Serialize};
use crate::constants::TYPE_STRING;

/// Metadata describing one editable property of an object, behavior or
/// instance. The value is always stored as a string whatever the declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(rename = "type", default = "default_type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extra_info: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    label: String,
    #[serde(default)]
    value: String,
}

fn default_type() -> String {
    TYPE_STRING.to_string()
}

impl Default for PropertyDescriptor {
    fn default() -> Self {
        Self::new("")
    }
}

impl PropertyDescriptor {
    /// A `String` property holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            kind: default_type(),
            extra_info: Vec::new(),
            label: String::new(),
            value: value.into(),
        }
    }

    pub fn set_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn set_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Appends one choice value. Only meaningful for `Choice` properties.
    pub fn add_extra_info(mut self, info: impl Into<String>) -> Self {
        self.extra_info.push(info.into());
        self
    }

    pub fn set_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Replaces the raw value in place.
    pub fn update_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Declared type as written by the owner. Case is not normalized.
    pub fn get_type(&self) -> &str {
        &self.kind
    }

    pub fn get_extra_info(&self) -> &[String] {
        &self.extra_info
    }

    /// Display label. Empty when the owner did not provide one.
    pub fn get_label(&self) -> &str {
        &self.label
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_extra_info_order() {
        let descriptor = PropertyDescriptor::new("easy")
            .set_type("Choice")
            .add_extra_info("easy")
            .add_extra_info("normal")
            .add_extra_info("hard");

        assert_eq!(descriptor.get_type(), "Choice");
        assert_eq!(descriptor.get_extra_info(), ["easy", "normal", "hard"]);
        assert_eq!(descriptor.get_value(), "easy");
        assert!(descriptor.get_label().is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let descriptor: PropertyDescriptor = ron::from_str("(value: \"12\")").unwrap();
        assert_eq!(descriptor.get_type(), "String");
        assert_eq!(descriptor.get_value(), "12");
        assert!(descriptor.get_extra_info().is_empty());
    }
}
