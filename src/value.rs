/// TableView Column Values
///
/// A ColumnValue is a single scalar cell of a record: a number, a string,
/// a boolean, or the absence of a value (`Null`).
///
/// Values carry their own natural ordering (numeric for numbers, lexicographic
/// for strings) and a lower-cased text form used by substring filters.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;

/// Column value enum to support multiple scalar types
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Int64(i64),
    Float64(f64),
    String(String),
    Bool(bool),
    Null,
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ColumnValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Lower-cased text used for substring matching. Absent values have no text
    /// and therefore never match a non-empty filter.
    pub fn filter_text(&self) -> Option<String> {
        match self {
            ColumnValue::Null => None,
            ColumnValue::String(s) => Some(s.to_lowercase()),
            other => Some(other.to_string().to_lowercase()),
        }
    }

    /// Three-way comparison by the value's natural ordering.
    ///
    /// Integers and floats compare by exact numeric value, with NaN above
    /// every number and `-0.0` equal to `0.0`. Values of different kinds are
    /// ordered number < string < bool so the comparator stays total. Null
    /// handling is left to the caller.
    pub fn compare(&self, other: &ColumnValue) -> Ordering {
        match (self, other) {
            (ColumnValue::Int64(a), ColumnValue::Int64(b)) => a.cmp(b),
            (ColumnValue::Float64(a), ColumnValue::Float64(b)) => compare_floats(*a, *b),
            (ColumnValue::Int64(i), ColumnValue::Float64(f)) => compare_int_float(*i, *f),
            (ColumnValue::Float64(f), ColumnValue::Int64(i)) => compare_int_float(*i, *f).reverse(),
            (ColumnValue::String(a), ColumnValue::String(b)) => a.cmp(b),
            (ColumnValue::Bool(a), ColumnValue::Bool(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            ColumnValue::Int64(_) | ColumnValue::Float64(_) => 0,
            ColumnValue::String(_) => 1,
            ColumnValue::Bool(_) => 2,
            ColumnValue::Null => 3,
        }
    }

    /// Convert a JSON scalar into a column value.
    ///
    /// Arrays and objects have no scalar form and become `Null`.
    pub fn from_json(value: &JsonValue) -> ColumnValue {
        match value {
            JsonValue::Bool(b) => ColumnValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ColumnValue::Int64(i)
                } else if let Some(f) = n.as_f64() {
                    ColumnValue::Float64(f)
                } else {
                    ColumnValue::Null
                }
            }
            JsonValue::String(s) => ColumnValue::String(s.clone()),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => ColumnValue::Null,
        }
    }

}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, exactly representable
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return Ordering::Less;
    }

    let whole = f.floor();
    if whole >= I64_BOUND {
        return Ordering::Less;
    }
    if whole < -I64_BOUND {
        return Ordering::Greater;
    }

    // `whole` is integral and within i64 range here, so the cast is exact
    match (i as i128).cmp(&(whole as i128)) {
        Ordering::Equal if f > whole => Ordering::Less,
        ordering => ordering,
    }
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ColumnValue::Int64(v) => serializer.serialize_i64(*v),
            // Non-finite floats have no JSON form
            ColumnValue::Float64(v) if !v.is_finite() => serializer.serialize_none(),
            ColumnValue::Float64(v) => serializer.serialize_f64(*v),
            ColumnValue::String(v) => serializer.serialize_str(v),
            ColumnValue::Bool(v) => serializer.serialize_bool(*v),
            ColumnValue::Null => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Int64(v) => write!(f, "{}", v),
            ColumnValue::Float64(v) => write!(f, "{}", v),
            ColumnValue::String(v) => f.write_str(v),
            ColumnValue::Bool(v) => write!(f, "{}", v),
            ColumnValue::Null => f.write_str("--"),
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(s: &str) -> Self {
        ColumnValue::String(s.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(s: String) -> Self {
        ColumnValue::String(s)
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Int64(v)
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Float64(v)
    }
}

impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        ColumnValue::Bool(v)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ColumnValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compare_numbers() {
        let a = ColumnValue::Int64(10);
        let b = ColumnValue::Float64(9.5);
        assert_eq!(a.compare(&b), Ordering::Greater);
        assert_eq!(b.compare(&a), Ordering::Less);
        assert_eq!(ColumnValue::Int64(3).compare(&ColumnValue::Float64(3.0)), Ordering::Equal);
    }

    #[test]
    fn test_compare_ints_and_floats_past_f64_precision() {
        let two_53 = 1i64 << 53;
        let low = ColumnValue::Int64(two_53);
        let high = ColumnValue::Int64(two_53 + 1);
        let float = ColumnValue::Float64(two_53 as f64);

        assert_eq!(low.compare(&float), Ordering::Equal);
        assert_eq!(high.compare(&float), Ordering::Greater);
        assert_eq!(float.compare(&high), Ordering::Less);
        assert_eq!(ColumnValue::Int64(i64::MAX).compare(&ColumnValue::Float64(i64::MAX as f64)), Ordering::Less);
        assert_eq!(ColumnValue::Int64(i64::MIN).compare(&ColumnValue::Float64(i64::MIN as f64)), Ordering::Equal);
        assert_eq!(ColumnValue::Int64(2).compare(&ColumnValue::Float64(2.5)), Ordering::Less);
        assert_eq!(ColumnValue::Int64(-3).compare(&ColumnValue::Float64(-2.5)), Ordering::Less);
        assert_eq!(ColumnValue::Int64(-2).compare(&ColumnValue::Float64(-2.5)), Ordering::Greater);
    }

    #[test]
    fn test_numeric_compare_is_transitive() {
        let two_53 = 1i64 << 53;
        let values = vec![
            ColumnValue::Int64(two_53),
            ColumnValue::Int64(two_53 + 1),
            ColumnValue::Int64(two_53 - 1),
            ColumnValue::Float64(two_53 as f64),
            ColumnValue::Float64(two_53 as f64 + 2.0),
            ColumnValue::Int64(0),
            ColumnValue::Float64(0.0),
            ColumnValue::Float64(-0.0),
            ColumnValue::Float64(0.5),
            ColumnValue::Int64(i64::MAX),
            ColumnValue::Int64(i64::MIN),
            ColumnValue::Float64(f64::INFINITY),
            ColumnValue::Float64(f64::NEG_INFINITY),
            ColumnValue::Float64(f64::NAN),
        ];

        for a in &values {
            assert_eq!(a.compare(a), Ordering::Equal);
            for b in &values {
                assert_eq!(a.compare(b), b.compare(a).reverse());
                for c in &values {
                    if a.compare(b) != Ordering::Greater && b.compare(c) != Ordering::Greater {
                        assert_ne!(a.compare(c), Ordering::Greater, "{:?} <= {:?} <= {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_compare_nan_above_numbers() {
        let nan = ColumnValue::Float64(f64::NAN);
        assert_eq!(nan.compare(&ColumnValue::Float64(f64::INFINITY)), Ordering::Greater);
        assert_eq!(ColumnValue::Int64(i64::MAX).compare(&nan), Ordering::Less);
        assert_eq!(nan.compare(&ColumnValue::from("a")), Ordering::Less);
    }

    #[test]
    fn test_compare_strings_bytewise() {
        let upper = ColumnValue::from("Dave");
        let lower = ColumnValue::from("alice");
        // Uppercase letters sort before lowercase ones
        assert_eq!(upper.compare(&lower), Ordering::Less);
        assert_eq!(lower.compare(&lower.clone()), Ordering::Equal);
    }

    #[test]
    fn test_compare_mixed_kinds_is_total() {
        let n = ColumnValue::Int64(1);
        let s = ColumnValue::from("1");
        let b = ColumnValue::Bool(false);
        assert_eq!(n.compare(&s), Ordering::Less);
        assert_eq!(s.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&n), Ordering::Greater);
    }

    #[test]
    fn test_filter_text() {
        assert_eq!(ColumnValue::from("Europe").filter_text().as_deref(), Some("europe"));
        assert_eq!(ColumnValue::Int64(38928346).filter_text().as_deref(), Some("38928346"));
        assert_eq!(ColumnValue::Bool(true).filter_text().as_deref(), Some("true"));
        assert_eq!(ColumnValue::Null.filter_text(), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(ColumnValue::from_json(&json!(42)), ColumnValue::Int64(42));
        assert_eq!(ColumnValue::from_json(&json!(1.5)), ColumnValue::Float64(1.5));
        assert_eq!(ColumnValue::from_json(&json!("Asia")), ColumnValue::from("Asia"));
        assert_eq!(ColumnValue::from_json(&json!(null)), ColumnValue::Null);
        assert_eq!(ColumnValue::from_json(&json!(["a"])), ColumnValue::Null);
        assert_eq!(ColumnValue::from_json(&json!({"k": 1})), ColumnValue::Null);
    }

    #[test]
    fn test_serialize() {
        let out = serde_json::to_string(&vec![
            ColumnValue::Int64(7),
            ColumnValue::from("x"),
            ColumnValue::Null,
            ColumnValue::Float64(f64::NAN),
        ])
        .unwrap();
        assert_eq!(out, r#"[7,"x",null,null]"#);
    }

    #[test]
    fn test_display_null_placeholder() {
        assert_eq!(ColumnValue::Null.to_string(), "--");
        assert_eq!(ColumnValue::from(Some(5i64)).to_string(), "5");
        assert_eq!(ColumnValue::from(None::<i64>), ColumnValue::Null);
    }
}
