// properties_core/src/property/host.rs
use std::marker::PhantomData;
use crate::constants::*;
use crate::property::descriptor::PropertyDescriptor;
use crate::property::property_map::PropertyMap;
use crate::schema::value::{number_to_string, parse_float};
use crate::status_warn;

/// The two accessors a schema needs from whoever owns the instances.
pub trait PropertySource<I: ?Sized> {
    /// Reads the live properties of `instance`.
    fn properties(&self, instance: &I) -> PropertyMap;

    /// Commits a new raw value for `name` on `instance`.
    fn update_property(&self, instance: &mut I, name: &str, value: &str);
}

/// `PropertySource` made of two closures.
pub struct FnSource<I: ?Sized, G, U> {
    get_properties: G,
    on_update_property: U,
    _instance: PhantomData<fn(&I)>,
}

impl<I: ?Sized, G, U> FnSource<I, G, U>
where
    G: Fn(&I) -> PropertyMap,
    U: Fn(&mut I, &str, &str),
{
    pub fn new(get_properties: G, on_update_property: U) -> Self {
        Self {
            get_properties,
            on_update_property,
            _instance: PhantomData,
        }
    }
}

impl<I: ?Sized, G, U> PropertySource<I> for FnSource<I, G, U>
where
    G: Fn(&I) -> PropertyMap,
    U: Fn(&mut I, &str, &str),
{
    fn properties(&self, instance: &I) -> PropertyMap {
        (self.get_properties)(instance)
    }

    fn update_property(&self, instance: &mut I, name: &str, value: &str) {
        (self.on_update_property)(instance, name, value)
    }
}

/// Anything that exposes editable properties of its own, like an object
/// or a behavior.
pub trait PropertyHost {
    /// Returns the properties, keyed by name.
    fn properties(&self) -> PropertyMap {
        PropertyMap::new()
    }

    /// Updates one property from its raw string value.
    /// Returns false if the new value cannot be set.
    fn update_property(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}

/// Adapts any `PropertyHost` so a schema can read and write it.
pub struct HostSource<H: ?Sized>(PhantomData<fn(&H)>);

impl<H: ?Sized> HostSource<H> {
    pub fn new() -> Self {
        HostSource(PhantomData)
    }
}

impl<H: ?Sized> Default for HostSource<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: PropertyHost + ?Sized> PropertySource<H> for HostSource<H> {
    fn properties(&self, instance: &H) -> PropertyMap {
        instance.properties()
    }

    fn update_property(&self, instance: &mut H, name: &str, value: &str) {
        if !instance.update_property(name, value) {
            status_warn!("Property `{name}` rejected value {value:?}.");
        }
    }
}

/// A struct field that can be exposed as a property.
/// Used by `#[derive(Properties)]`.
pub trait PropertyField {
    /// Describes the field with its current value.
    fn to_property(&self) -> PropertyDescriptor;

    /// Applies a raw value. Returns false when it cannot be parsed.
    fn update_from(&mut self, raw: &str) -> bool;
}

impl PropertyField for bool {
    fn to_property(&self) -> PropertyDescriptor {
        let raw = if *self { LITERAL_TRUE } else { LITERAL_FALSE };
        PropertyDescriptor::new(raw).set_type(TYPE_BOOLEAN)
    }

    fn update_from(&mut self, raw: &str) -> bool {
        *self = raw == LEGACY_TRUE || raw == LITERAL_TRUE;
        true
    }
}

impl PropertyField for String {
    fn to_property(&self) -> PropertyDescriptor {
        PropertyDescriptor::new(self.as_str())
    }

    fn update_from(&mut self, raw: &str) -> bool {
        raw.clone_into(self);
        true
    }
}

macro_rules! impl_property_field_for_floats {
    ( $( $ty:ty ),* ) => {
        $(
            impl PropertyField for $ty {
                fn to_property(&self) -> PropertyDescriptor {
                    PropertyDescriptor::new(number_to_string(*self)).set_type(TYPE_NUMBER)
                }

                fn update_from(&mut self, raw: &str) -> bool {
                    let n = parse_float(raw);
                    if n.is_nan() {
                        return false;
                    }
                    *self = n as $ty;
                    true
                }
            }
        )*
    };
}

impl_property_field_for_floats!(f32, f64);

macro_rules! impl_property_field_for_ints {
    ( $( $ty:ty ),* ) => {
        $(
            impl PropertyField for $ty {
                fn to_property(&self) -> PropertyDescriptor {
                    PropertyDescriptor::new(self.to_string()).set_type(TYPE_NUMBER)
                }

                // Fractions are truncated, out of range values saturate.
                fn update_from(&mut self, raw: &str) -> bool {
                    let n = parse_float(raw);
                    if n.is_nan() {
                        return false;
                    }
                    *self = n as $ty;
                    true
                }
            }
        )*
    };
}

impl_property_field_for_ints!(i32, i64, u32, u64, usize);
