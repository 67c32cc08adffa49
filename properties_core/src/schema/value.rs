// properties_core/src/schema/value.rs
use std::fmt::LowerExp;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use crate::constants::*;

/// Closed set of value kinds the grid knows how to coerce.
/// Any declared type that is not recognized is treated as `Text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ValueKind {
    Boolean,
    Number,
    Choice,
    #[strum(serialize = "string")]
    Text,
}

impl ValueKind {
    /// Maps a declared type name to its kind. Never fails.
    pub fn from_type_name(type_name: &str) -> Self {
        ValueKind::from_str(type_name).unwrap_or(ValueKind::Text)
    }

    /// Reads a raw stored string as the value the grid displays.
    pub fn coerce(self, raw: &str) -> FieldValue {
        match self {
            ValueKind::Boolean => FieldValue::Bool(raw == LITERAL_TRUE),
            ValueKind::Number => FieldValue::Number(parse_float(raw)),
            ValueKind::Choice | ValueKind::Text => FieldValue::Text(raw.to_string()),
        }
    }
}

/// A typed value exchanged with the property grid.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the value back to the string stored on the instance.
    pub fn to_raw(&self, encoding: BooleanEncoding) -> String {
        match self {
            FieldValue::Bool(b) => encoding.encode(*b).to_string(),
            FieldValue::Number(n) => number_to_string(*n),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<f32> for FieldValue {
    fn from(n: f32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// How booleans are written back to the instance.
///
/// The read path only accepts `"true"`, while `Legacy` writes `"1"`/`"0"`
/// as the engine hosts expect on update. A value written under `Legacy`
/// therefore reads back as `false` until the host refreshes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanEncoding {
    /// `"1"` / `"0"`.
    #[default]
    Legacy,
    /// `"true"` / `"false"`, symmetric with the read path.
    Literal,
}

impl BooleanEncoding {
    pub fn encode(self, value: bool) -> &'static str {
        match (self, value) {
            (BooleanEncoding::Legacy, true) => LEGACY_TRUE,
            (BooleanEncoding::Legacy, false) => LEGACY_FALSE,
            (BooleanEncoding::Literal, true) => LITERAL_TRUE,
            (BooleanEncoding::Literal, false) => LITERAL_FALSE,
        }
    }
}

/// Parses the longest numeric prefix of `raw`, the way the editor front-end
/// parses stored numbers. Returns NaN when there is no numeric prefix.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start_matches(is_js_whitespace);
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'+') => {
            i += 1;
            false
        }
        Some(b'-') => {
            i += 1;
            true
        }
        _ => false,
    };

    if s[i..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// Formats a number the way the editor front-end stringifies it: shortest
/// digits for the value's own type, exponent form from 1e21 up and below 1e-6.
pub fn number_to_string<T: Copy + Into<f64> + LowerExp>(n: T) -> String {
    let wide: f64 = n.into();
    if wide.is_nan() {
        return "NaN".to_string();
    } else if wide.is_infinite() {
        return if wide > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    } else if wide == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{n:e}");
    let (sign, sci) = match sci.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", sci.as_str()),
    };
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    // Position of the decimal point relative to the first digit.
    let k = digits.len() as i32;
    let point = exponent + 1;

    let body = if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(-point as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let frac = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        let exp_sign = if point - 1 < 0 { "-" } else { "+" };
        format!("{first}{frac}e{exp_sign}{}", (point - 1).abs())
    };
    format!("{sign}{body}")
}

/// Leading whitespace skipped by the front-end number parser.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{B}' | '\u{C}' | '\u{D}' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}
