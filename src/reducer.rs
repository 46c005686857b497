//! First-present-wins field reduction.
//!
//! Every display field in the view model is produced by picking the first
//! candidate that is present. A candidate is absent when it is missing
//! (`None`, which also covers JSON `null`) or an empty string. Numeric zero
//! and boolean `false` are present values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Placeholder shown for any display field with no present candidate.
pub const UNKNOWN: &str = "unknown";

/// Loosely-typed scalar as delivered by an upstream provider.
///
/// Providers disagree on whether a value such as a seat count or a heading is
/// a number or a string, so raw payload fields keep whatever arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Objects and arrays where a scalar was expected. Kept rather than
    /// rejected so one odd field cannot fail a whole payload.
    Other(Value),
}

impl Scalar {
    /// Converts a JSON value; `null` maps to `None`.
    pub fn from_value(value: &Value) -> Option<Scalar> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(
                n.as_i64()
                    .map(Scalar::Int)
                    .unwrap_or_else(|| Scalar::Float(n.as_f64().unwrap_or_default())),
            ),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            other => Some(Scalar::Other(other.clone())),
        }
    }

    /// Numeric view of the value. Numeric strings count as numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) | Scalar::Other(_) => None,
        }
    }

    /// Integer view of the value; floats are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            Scalar::Float(f) if f.is_finite() => Some(*f as i64),
            Scalar::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// A value the reducer can test for presence and render.
pub trait FieldValue {
    fn is_present(&self) -> bool;
    fn display(&self) -> String;
}

impl FieldValue for Scalar {
    fn is_present(&self) -> bool {
        !matches!(self, Scalar::Text(s) if s.is_empty())
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }

    fn display(&self) -> String {
        self.clone()
    }
}

impl FieldValue for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for i64 {
    fn is_present(&self) -> bool {
        true
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for bool {
    fn is_present(&self) -> bool {
        true
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }

    fn display(&self) -> String {
        (**self).display()
    }
}

/// Returns the first present candidate.
pub fn first_present<T, I>(candidates: I) -> Option<T>
where
    T: FieldValue,
    I: IntoIterator<Item = Option<T>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.is_present())
}

/// Renders the first present candidate, or [`UNKNOWN`].
pub fn reduce<T, I>(candidates: I) -> String
where
    T: FieldValue,
    I: IntoIterator<Item = Option<T>>,
{
    first_present(candidates)
        .map(|value| value.display())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Joins every present candidate with `separator`; `None` when none are present.
pub fn join_present<T, I>(candidates: I, separator: &str) -> Option<String>
where
    T: FieldValue,
    I: IntoIterator<Item = Option<T>>,
{
    let parts: Vec<String> = candidates
        .into_iter()
        .flatten()
        .filter(|candidate| candidate.is_present())
        .map(|candidate| candidate.display())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}

/// [`join_present`], falling back to [`UNKNOWN`].
pub fn reduce_join<T, I>(candidates: I, separator: &str) -> String
where
    T: FieldValue,
    I: IntoIterator<Item = Option<T>>,
{
    join_present(candidates, separator).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Looks up an ordered list of synonymous keys in a raw record and returns
/// the first present value.
pub fn first_present_key(record: &Map<String, Value>, keys: &[&str]) -> Option<Scalar> {
    first_present(
        keys.iter()
            .map(|key| record.get(*key).and_then(Scalar::from_value)),
    )
}
