//! Cell values and the row contract consumed by the table engine.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A single field value read from a row.
///
/// Missing fields are represented as [`CellValue::Null`] and are never an
/// error: search skips them and sort ranks them as the empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateTime<Utc>),
}

impl CellValue {
    /// Returns `true` for the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String form used when matching a search term.
    ///
    /// Returns `None` for null values. Dates use their ISO-8601 timestamp
    /// with millisecond precision.
    pub fn search_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Normalized key used for ordering rows.
    ///
    /// Dates become millisecond timestamps, booleans become `0`/`1` and
    /// null becomes the empty string.
    pub fn sort_key(&self) -> SortKey {
        match self {
            CellValue::Null => SortKey::Text(String::new()),
            CellValue::Bool(b) => SortKey::Number(if *b { 1.0 } else { 0.0 }),
            CellValue::Int(i) => SortKey::Number(*i as f64),
            CellValue::Float(f) => SortKey::Number(*f),
            CellValue::Text(s) => SortKey::Text(s.clone()),
            CellValue::Date(d) => SortKey::Number(d.timestamp_millis() as f64),
        }
    }

    /// Equality used by filters: numbers compare across integer/float.
    pub fn loosely_equals(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Int(a), CellValue::Float(b)) | (CellValue::Float(b), CellValue::Int(a)) => {
                (*a as f64) == *b
            }
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => f.write_str(&format_number(*x)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

/// Formats a float the way a dashboard user expects to read it:
/// integral values without a fractional part.
pub(crate) fn format_number(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        let sign = if x > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{:.0}", x)
    } else {
        format!("{}", x)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Null),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

// =============================================================================
// SortKey
// =============================================================================

/// A normalized sort value: either numeric or textual.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Compares two keys.
    ///
    /// Two numbers compare numerically. Any other pairing compares the
    /// string forms with [`text_cmp`], so `"item2"` sorts before `"item10"`
    /// and `"Álvaro"` sorts next to `"alvaro"`.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (a, b) => text_cmp(&a.text(), &b.text()),
        }
    }

    fn text(&self) -> String {
        match self {
            SortKey::Number(n) => format_number(*n),
            SortKey::Text(s) => s.clone(),
        }
    }
}

/// Locale-style text ordering.
///
/// Compares in three passes, each only reached on a tie: accent- and
/// case-folded text, then case-folded text with accents kept, then the raw
/// text. Every pass is numeric-aware.
pub fn text_cmp(a: &str, b: &str) -> Ordering {
    let (a_lower, b_lower) = (a.to_lowercase(), b.to_lowercase());
    natural_cmp(&fold_accents(&a_lower), &fold_accents(&b_lower))
        .then_with(|| natural_cmp(&a_lower, &b_lower))
        .then_with(|| natural_cmp(a, b))
}

/// Strip combining marks after canonical decomposition (`é` becomes `e`).
fn fold_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Numeric-aware string comparison.
///
/// Runs of ASCII digits compare by numeric value; everything else compares
/// character by character. Equal-valued digit runs with different leading
/// zeros fall back to their length so the ordering stays total.
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let l_trimmed = l_run.trim_start_matches('0');
                let r_trimmed = r_run.trim_start_matches('0');
                let ord = l_trimmed
                    .len()
                    .cmp(&r_trimmed.len())
                    .then_with(|| l_trimmed.cmp(r_trimmed))
                    .then_with(|| l_run.len().cmp(&r_run.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

// =============================================================================
// Rows
// =============================================================================

/// Row identity: text or number, unique within a row collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId::Number(value)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Text(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId::Text(value)
    }
}

/// Trait for records that can be displayed as rows in a table.
///
/// # Example
///
/// ```
/// use dashboard_lib::value::{CellValue, RowId, TableRow};
///
/// struct Order {
///     id: i64,
///     customer: String,
/// }
///
/// impl TableRow for Order {
///     fn id(&self) -> RowId {
///         RowId::Number(self.id)
///     }
///
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "id" => self.id.into(),
///             "customer" => self.customer.as_str().into(),
///             _ => CellValue::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Unique identifier for this row.
    fn id(&self) -> RowId;

    /// Raw value of the named field; unknown keys return [`CellValue::Null`].
    fn field(&self, key: &str) -> CellValue;
}

/// A row backed by a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRow(pub Map<String, Value>);

impl JsonRow {
    /// Wraps a JSON value; returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }
}

impl TableRow for JsonRow {
    fn id(&self) -> RowId {
        match self.0.get("id") {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => RowId::Number(i),
                None => RowId::Text(n.to_string()),
            },
            Some(Value::String(s)) => RowId::Text(s.clone()),
            Some(other) => RowId::Text(other.to_string()),
            None => RowId::Text(String::new()),
        }
    }

    fn field(&self, key: &str) -> CellValue {
        self.0.get(key).map(CellValue::from).unwrap_or_default()
    }
}
