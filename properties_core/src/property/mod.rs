pub mod descriptor;
pub mod host;
pub mod property_map;
