// properties_core/src/schema/builder.rs
use std::sync::Arc;
use log::debug;
use crate::property::host::{FnSource, HostSource, PropertyHost, PropertySource};
use crate::property::property_map::PropertyMap;
use crate::schema::field::{FieldDescriptor, SharedSource};
use crate::storage::grid_config::{GridConfig, current_config};

/// Ordered list of fields handed to the property grid.
pub type Schema<I> = Vec<FieldDescriptor<I>>;

/// Turns property maps into property grid schemas.
#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    config: GridConfig,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GridConfig) -> Self {
        Self { config }
    }

    /// Uses the config loaded from the app directory.
    pub fn from_current_config() -> Self {
        Self::with_config(current_config())
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Builds one field per property, in the order of `properties`.
    pub fn build<I: ?Sized>(&self, properties: &PropertyMap, source: SharedSource<I>) -> Schema<I> {
        let schema: Schema<I> = properties
            .iter()
            .map(|(name, descriptor)| {
                FieldDescriptor::new(name, descriptor, Arc::clone(&source), self.config.clone())
            })
            .collect();

        debug!("Built property schema with {} fields.", schema.len());
        schema
    }

    /// Same as `build` with the accessors given as two closures.
    pub fn build_with<I, G, U>(
        &self,
        properties: &PropertyMap,
        get_properties: G,
        on_update_property: U,
    ) -> Schema<I>
    where
        I: ?Sized + 'static,
        G: Fn(&I) -> PropertyMap + Send + Sync + 'static,
        U: Fn(&mut I, &str, &str) + Send + Sync + 'static,
    {
        let source: SharedSource<I> = Arc::new(FnSource::new(get_properties, on_update_property));
        self.build(properties, source)
    }

    /// Builds the schema of a host from its current properties. The fields
    /// read and write any instance of the same host type.
    pub fn build_for_host<H: PropertyHost + ?Sized + 'static>(&self, host: &H) -> Schema<H> {
        let source: SharedSource<H> = Arc::new(HostSource::<H>::new());
        self.build(&source.properties(host), source)
    }
}

/// Builds a schema with the default config.
///
/// `get_properties` reads the live properties of an instance and
/// `on_update_property` commits a new raw value for one of them.
pub fn build_schema<I, G, U>(
    properties: &PropertyMap,
    get_properties: G,
    on_update_property: U,
) -> Schema<I>
where
    I: ?Sized + 'static,
    G: Fn(&I) -> PropertyMap + Send + Sync + 'static,
    U: Fn(&mut I, &str, &str) + Send + Sync + 'static,
{
    SchemaBuilder::new().build_with(properties, get_properties, on_update_property)
}

/// Builds the schema of a `PropertyHost` with the default config.
pub fn build_host_schema<H: PropertyHost + ?Sized + 'static>(host: &H) -> Schema<H> {
    SchemaBuilder::new().build_for_host(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropertyError;
    use crate::property::descriptor::PropertyDescriptor;
    use crate::schema::field::Choice;
    use crate::schema::value::{BooleanEncoding, FieldValue, ValueKind};

    /// Instance whose properties live in a plain map.
    #[derive(Default)]
    struct Stored {
        properties: PropertyMap,
    }

    impl Stored {
        fn with(name: &str, descriptor: PropertyDescriptor) -> Self {
            Stored { properties: PropertyMap::new().with(name, descriptor) }
        }

        fn raw(&self, name: &str) -> &str {
            self.properties.get(name).unwrap().get_value()
        }
    }

    fn schema_for(properties: &PropertyMap) -> Schema<Stored> {
        build_schema(
            properties,
            |s: &Stored| s.properties.clone(),
            |s: &mut Stored, name: &str, value: &str| {
                if let Some(p) = s.properties.get_mut(name) {
                    p.update_value(value);
                }
            },
        )
    }

    #[test]
    fn preserves_input_order_and_names() {
        let properties = PropertyMap::new()
            .with("zIndex", PropertyDescriptor::new("1").set_type("Number"))
            .with("angle", PropertyDescriptor::new("0").set_type("Number"))
            .with("Visible", PropertyDescriptor::new("true").set_type("Boolean"));

        let names: Vec<_> = schema_for(&properties).iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, ["zIndex", "angle", "Visible"]);
    }

    #[test]
    fn empty_map_gives_empty_schema() {
        assert!(schema_for(&PropertyMap::new()).is_empty());
    }

    #[test]
    fn choices_only_for_choice_type() {
        let properties = PropertyMap::new()
            .with(
                "mode",
                PropertyDescriptor::new("a")
                    .set_type("choice")
                    .add_extra_info("a")
                    .add_extra_info("b")
                    .add_extra_info("c"),
            )
            // Extra info on a non-choice property is ignored.
            .with("name", PropertyDescriptor::new("x").add_extra_info("ignored"));

        let schema = schema_for(&properties);
        let expected: Vec<Choice> = ["a", "b", "c"]
            .iter()
            .map(|v| Choice { value: v.to_string(), label: v.to_string() })
            .collect();
        assert_eq!(schema[0].get_choices(), Some(expected.as_slice()));
        assert_eq!(schema[1].get_choices(), None);
    }

    #[test]
    fn boolean_round_trip_is_asymmetric() {
        let properties = PropertyMap::new()
            .with("enabled", PropertyDescriptor::new("true").set_type("Boolean"));
        let schema = schema_for(&properties);
        let field = &schema[0];
        let mut instance = Stored { properties: properties.clone() };

        assert_eq!(field.get_value(&instance).unwrap(), FieldValue::Bool(true));
        field.set_value(&mut instance, true);
        assert_eq!(instance.raw("enabled"), "1");
        // "1" is not "true": reads back as false.
        assert_eq!(field.get_value(&instance).unwrap(), FieldValue::Bool(false));

        field.set_value(&mut instance, false);
        assert_eq!(instance.raw("enabled"), "0");
    }

    #[test]
    fn literal_encoding_round_trips() {
        let properties = PropertyMap::new()
            .with("enabled", PropertyDescriptor::new("false").set_type("Boolean"));
        let builder = SchemaBuilder::with_config(GridConfig {
            boolean_encoding: BooleanEncoding::Literal,
            ..GridConfig::default()
        });
        let schema = builder.build_with(
            &properties,
            |s: &Stored| s.properties.clone(),
            |s: &mut Stored, name: &str, value: &str| {
                s.properties.get_mut(name).unwrap().update_value(value);
            },
        );
        let mut instance = Stored { properties };

        schema[0].set_value(&mut instance, true);
        assert_eq!(instance.raw("enabled"), "true");
        assert_eq!(schema[0].get_value(&instance).unwrap(), FieldValue::Bool(true));
    }

    #[test]
    fn number_coercion_boundaries() {
        let properties = PropertyMap::new()
            .with("speed", PropertyDescriptor::new("3.5").set_type("Number"));
        let schema = schema_for(&properties);
        let field = &schema[0];

        let read = |raw: &str| {
            let instance = Stored::with("speed", PropertyDescriptor::new(raw).set_type("Number"));
            field.get_value(&instance).unwrap().as_number().unwrap()
        };

        assert_eq!(read("3.5"), 3.5);
        assert_eq!(read("3abc"), 3.0);
        assert!(read("abc").is_nan());
    }

    #[test]
    fn numbers_are_stringified_on_write() {
        let properties = PropertyMap::new()
            .with("count", PropertyDescriptor::new("0").set_type("Number"));
        let schema = schema_for(&properties);
        let field = &schema[0];
        let mut instance = Stored { properties };

        field.set_value(&mut instance, 7.0);
        assert_eq!(instance.raw("count"), "7");
        field.set_value(&mut instance, 2.25);
        assert_eq!(instance.raw("count"), "2.25");
        field.set_value(&mut instance, f64::NAN);
        assert_eq!(instance.raw("count"), "NaN");
    }

    #[test]
    fn labels_are_explicit_or_derived() {
        let properties = PropertyMap::new()
            .with("maxSpeed", PropertyDescriptor::new("1").set_type("Number"))
            .with("speed", PropertyDescriptor::new("1").set_type("Number"));
        let schema = schema_for(&properties);
        let mut instance = Stored { properties: properties.clone() };

        assert_eq!(schema[0].get_label(&instance).unwrap(), "Max Speed");
        assert_eq!(schema[1].get_label(&instance).unwrap(), "Speed");

        // The label is read live, not from the map the schema was built with.
        instance.properties.insert(
            "maxSpeed",
            PropertyDescriptor::new("1").set_type("Number").set_label("Velocity"),
        );
        assert_eq!(schema[0].get_label(&instance).unwrap(), "Velocity");
    }

    #[test]
    fn raw_name_label_when_derivation_is_off() {
        let properties = PropertyMap::new().with("maxSpeed", PropertyDescriptor::new("1"));
        let builder = SchemaBuilder::with_config(GridConfig {
            derive_labels: false,
            ..GridConfig::default()
        });
        let schema = builder.build_with(
            &properties,
            |s: &Stored| s.properties.clone(),
            |_: &mut Stored, _: &str, _: &str| {},
        );
        let instance = Stored { properties };

        assert_eq!(schema[0].get_label(&instance).unwrap(), "maxSpeed");
    }

    #[test]
    fn unknown_types_pass_through() {
        let properties = PropertyMap::new()
            .with("title", PropertyDescriptor::new("hello").set_type("String"))
            .with("sprite", PropertyDescriptor::new("hero.png").set_type("ResourceImage"));
        let schema = schema_for(&properties);
        let mut instance = Stored { properties: properties.clone() };

        assert_eq!(schema[0].kind(), ValueKind::Text);
        assert_eq!(schema[0].get_value(&instance).unwrap(), FieldValue::from("hello"));
        assert_eq!(schema[1].value_type(), "resourceimage");
        assert_eq!(schema[1].get_value(&instance).unwrap(), FieldValue::from("hero.png"));

        schema[0].set_value(&mut instance, "world");
        assert_eq!(instance.raw("title"), "world");
    }

    #[test]
    fn missing_live_property_is_lookup_error() {
        let properties = PropertyMap::new().with("gone", PropertyDescriptor::new("x"));
        let schema = schema_for(&properties);
        let instance = Stored::default();

        let err = schema[0].get_value(&instance).unwrap_err();
        assert!(matches!(err, PropertyError::MissingProperty { ref name } if name == "gone"));
        assert!(schema[0].get_label(&instance).is_err());
    }

    #[test]
    fn fields_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldDescriptor<Stored>>();
    }
}
