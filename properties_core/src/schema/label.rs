// properties_core/src/schema/label.rs

/// Builds a display label from a camelCase property name.
///
/// The first character is upper-cased and the rest of the name is split
/// right before each ASCII upper-case letter, e.g. `maxSpeed` becomes
/// `Max Speed`. An upper-case letter directly after the first character
/// does not start a new word.
pub fn derive_label(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut label = String::with_capacity(name.len() + 4);
    label.extend(first.to_uppercase());
    for (i, c) in chars.enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }
    label
}

/// Picks the explicit label when there is one, otherwise derives it from
/// the name. With `derive` off the raw name is used as the fallback.
pub fn resolve_label(explicit: &str, name: &str, derive: bool) -> String {
    if !explicit.is_empty() {
        explicit.to_string()
    } else if derive {
        derive_label(name)
    } else {
        name.to_string()
    }
}
