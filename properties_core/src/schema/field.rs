// properties_core/src/schema/field.rs
use std::fmt;
use std::sync::Arc;
use log::trace;
use crate::error::{PropertyError, Result};
use crate::property::descriptor::PropertyDescriptor;
use crate::property::host::PropertySource;
use crate::schema::label::resolve_label;
use crate::schema::value::{BooleanEncoding, FieldValue, ValueKind};
use crate::storage::grid_config::GridConfig;

/// Shared handle to the accessors of the instances being edited.
pub type SharedSource<I> = Arc<dyn PropertySource<I> + Send + Sync>;

/// One entry of a choice list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// What the property grid needs to show and edit one property.
///
/// Values are never cached: every call reads the instance properties again
/// through the source.
pub struct FieldDescriptor<I: ?Sized> {
    name: String,
    value_type: String,
    kind: ValueKind,
    choices: Option<Vec<Choice>>,
    source: SharedSource<I>,
    config: GridConfig,
}

impl<I: ?Sized> FieldDescriptor<I> {
    pub(crate) fn new(
        name: &str,
        descriptor: &PropertyDescriptor,
        source: SharedSource<I>,
        config: GridConfig,
    ) -> Self {
        let value_type = descriptor.get_type().to_lowercase();
        let kind = ValueKind::from_type_name(&value_type);
        let choices = (kind == ValueKind::Choice).then(|| {
            descriptor
                .get_extra_info()
                .iter()
                .map(|v| Choice { value: v.clone(), label: v.clone() })
                .collect()
        });

        Self {
            name: name.to_string(),
            value_type,
            kind,
            choices,
            source,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type, lower-cased.
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Choices for `choice` properties, `None` for every other type.
    pub fn get_choices(&self) -> Option<&[Choice]> {
        self.choices.as_deref()
    }

    pub fn boolean_encoding(&self) -> BooleanEncoding {
        self.config.boolean_encoding
    }

    /// Reads the live raw value and coerces it according to the declared type.
    pub fn get_value(&self, instance: &I) -> Result<FieldValue> {
        let properties = self.source.properties(instance);
        let property = properties
            .get(&self.name)
            .ok_or_else(|| PropertyError::missing(&self.name))?;

        let value = self.kind.coerce(property.get_value());
        trace!("get `{}` = {:?}", self.name, value);
        Ok(value)
    }

    /// Converts `value` to the stored string form and commits it.
    pub fn set_value(&self, instance: &mut I, value: impl Into<FieldValue>) {
        let raw = value.into().to_raw(self.config.boolean_encoding);
        trace!("set `{}` to {:?}", self.name, raw);
        self.source.update_property(instance, &self.name, &raw);
    }

    /// The live label if the owner set one, otherwise one derived from the name.
    pub fn get_label(&self, instance: &I) -> Result<String> {
        let properties = self.source.properties(instance);
        let property = properties
            .get(&self.name)
            .ok_or_else(|| PropertyError::missing(&self.name))?;

        Ok(resolve_label(property.get_label(), &self.name, self.config.derive_labels))
    }
}

impl<I: ?Sized> Clone for FieldDescriptor<I> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value_type: self.value_type.clone(),
            kind: self.kind,
            choices: self.choices.clone(),
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl<I: ?Sized> fmt::Debug for FieldDescriptor<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("choices", &self.choices)
            .finish_non_exhaustive()
    }
}
