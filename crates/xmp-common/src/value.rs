//! Typed XMP property values and their canonical text encoding.

use serde::{Deserialize, Serialize};

/// A typed XMP property value.
///
/// XMP stores every property as text on the wire; this enum keeps the
/// source type so the canonical encoding can be chosen per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum XmpValue {
    Str(String),
    Int(i64),
    Real(f64),
    Bool(bool),
}

impl XmpValue {
    /// Canonical XMP text form of this value.
    ///
    /// Integers are decimal ASCII, reals are plain decimal with at most
    /// seven fractional digits and no exponent, booleans are the schema
    /// tokens `True`/`False`. Strings pass through verbatim; XML escaping
    /// is the packet serializer's concern.
    pub fn to_xmp_string(&self) -> String {
        match self {
            XmpValue::Str(s) => s.clone(),
            XmpValue::Int(i) => i.to_string(),
            XmpValue::Real(r) => format_real(*r),
            XmpValue::Bool(true) => "True".to_string(),
            XmpValue::Bool(false) => "False".to_string(),
        }
    }

    /// Parse the canonical text form back into a real, if possible.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            XmpValue::Real(r) => Some(*r),
            XmpValue::Int(i) => Some(*i as f64),
            XmpValue::Str(s) => s.parse().ok(),
            XmpValue::Bool(_) => None,
        }
    }
}

impl std::fmt::Display for XmpValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_xmp_string())
    }
}

/// Fixed-decimal formatting: at most 7 fractional digits, trailing zeros
/// trimmed, always at least one fractional digit, never exponential.
fn format_real(v: f64) -> String {
    let mut s = format!("{:.7}", v);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.push('0');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_encoding() {
        assert_eq!(XmpValue::Int(4000).to_xmp_string(), "4000");
        assert_eq!(XmpValue::Int(0).to_xmp_string(), "0");
    }

    #[test]
    fn test_bool_encoding() {
        assert_eq!(XmpValue::Bool(true).to_xmp_string(), "True");
        assert_eq!(XmpValue::Bool(false).to_xmp_string(), "False");
    }

    #[test]
    fn test_real_encoding_trims_zeros() {
        assert_eq!(XmpValue::Real(180.0).to_xmp_string(), "180.0");
        assert_eq!(XmpValue::Real(-5.25).to_xmp_string(), "-5.25");
        assert_eq!(XmpValue::Real(0.5).to_xmp_string(), "0.5");
    }

    #[test]
    fn test_real_encoding_no_exponent() {
        let s = XmpValue::Real(12345678.0).to_xmp_string();
        assert!(!s.contains('e') && !s.contains('E'));
        assert_eq!(s, "12345678.0");
    }

    #[test]
    fn test_real_encoding_deterministic() {
        let a = XmpValue::Real(123.456).to_xmp_string();
        let b = XmpValue::Real(123.456).to_xmp_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_as_real_from_text() {
        assert_eq!(XmpValue::Str("180.0".to_string()).as_real(), Some(180.0));
        assert_eq!(XmpValue::Str("abc".to_string()).as_real(), None);
    }
}
