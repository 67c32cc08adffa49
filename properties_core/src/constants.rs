// properties_core/src/constants.rs

/// Raw value the read path treats as a true boolean.
pub const LITERAL_TRUE: &str = "true";
pub const LITERAL_FALSE: &str = "false";

/// Raw values written for booleans under `BooleanEncoding::Legacy`.
/// These do not read back as `true`, see `BooleanEncoding`.
pub const LEGACY_TRUE: &str = "1";
pub const LEGACY_FALSE: &str = "0";

/// Declared type names understood by the engine descriptors.
pub const TYPE_BOOLEAN: &str = "Boolean";
pub const TYPE_NUMBER: &str = "Number";
pub const TYPE_CHOICE: &str = "Choice";
pub const TYPE_STRING: &str = "String";

/// Name of the grid config .ron file.
pub const GRID_CONFIG_RON: &str = "grid_config.ron";

/// Basename of the rotating log files.
pub const LOG_BASENAME: &str = "property_grid";

/// Rotate log files once they reach this many bytes.
pub const LOG_ROTATE_BYTES: u64 = 5_000_000;
pub const LOG_FILES_KEPT: usize = 5;
