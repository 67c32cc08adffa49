// properties_core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the property schema layer.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// The live property map of an instance no longer contains a property
    /// the schema was built with.
    #[error("property `{name}` is missing from the instance properties")]
    MissingProperty { name: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse ron: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    #[error("could not write ron: {0}")]
    RonWrite(#[from] ron::Error),
}

impl PropertyError {
    pub fn missing(name: impl Into<String>) -> Self {
        PropertyError::MissingProperty { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, PropertyError>;
