// Lets `#[derive(Properties)]` name this crate from inside it too.
extern crate self as properties_core;

pub mod constants;
pub mod error;
pub mod logging;
pub mod property;
pub mod schema;
pub mod storage;

pub use error::{PropertyError, Result};
pub use property::descriptor::PropertyDescriptor;
pub use property::host::{FnSource, HostSource, PropertyField, PropertyHost, PropertySource};
pub use property::property_map::PropertyMap;
pub use properties_derive::Properties;
pub use schema::builder::{Schema, SchemaBuilder, build_host_schema, build_schema};
pub use schema::field::{Choice, FieldDescriptor};
pub use schema::value::{BooleanEncoding, FieldValue, ValueKind};
pub use storage::grid_config::GridConfig;
