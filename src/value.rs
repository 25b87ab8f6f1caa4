//! Property values and live attribute values.
//!
//! `PropValue` is what the workspace stores per active property and what
//! documents carry. `AttrValue` is what a property pushes onto a live widget
//! or cell when applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored value of one active property.
///
/// Enum properties store the member label as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Numbers(Vec<f64>),
    Text(String),
}

impl PropValue {
    /// Try to get as str
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as a number slice
    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            PropValue::Numbers(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Number(n) => f.write_str(&format_number(*n)),
            PropValue::Numbers(v) => f.write_str(&format_numbers(v)),
            PropValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<Vec<f64>> for PropValue {
    fn from(v: Vec<f64>) -> Self {
        PropValue::Numbers(v)
    }
}

/// Value held by a live widget attribute or recorded by a cell call.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Resolved enumeration constant
    Ordinal(i32),
    Numbers(Vec<f64>),
}

/// Format a number the way the engine's script language prints it.
///
/// Integral values drop the fractional part (`50`, not `50.0`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Format a number list as comma separated call arguments.
pub fn format_numbers(values: &[f64]) -> String {
    values.iter().map(|n| format_number(*n)).collect::<Vec<_>>().join(", ")
}

/// Parse interactive numeric input.
///
/// Returns `None` for empty, non-numeric or non-finite text.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
