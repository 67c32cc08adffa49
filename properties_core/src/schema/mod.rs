pub mod builder;
pub mod field;
pub mod label;
pub mod value;
