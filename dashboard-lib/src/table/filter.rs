//! Named filter values with reset-to-initial semantics.

use std::collections::{BTreeMap, BTreeSet};

use crate::value::{CellValue, TableRow};

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    /// No constraint.
    #[default]
    Empty,
    Value(CellValue),
    List(Vec<CellValue>),
}

impl FilterValue {
    /// Returns `true` if this value constrains nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Empty => true,
            FilterValue::Value(value) => value.is_null(),
            FilterValue::List(values) => values.is_empty(),
        }
    }

    fn accepts(&self, field: &CellValue) -> bool {
        match self {
            FilterValue::Empty => true,
            FilterValue::Value(value) => value.is_null() || value.loosely_equals(field),
            FilterValue::List(values) => {
                values.is_empty() || values.iter().any(|value| value.loosely_equals(field))
            }
        }
    }
}

impl From<CellValue> for FilterValue {
    fn from(value: CellValue) -> Self {
        FilterValue::Value(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Value(value.into())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Value(value.into())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Value(value.into())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Value(value.into())
    }
}

impl From<Vec<CellValue>> for FilterValue {
    fn from(values: Vec<CellValue>) -> Self {
        FilterValue::List(values)
    }
}

/// A set of named filters that remembers its initial values.
///
/// Removing or resetting a filter returns it to its initial value, not to
/// [`FilterValue::Empty`]. Keys absent from either side compare as empty.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    initial: BTreeMap<String, FilterValue>,
    current: BTreeMap<String, FilterValue>,
    revision: u64,
}

impl FilterSet {
    /// Create a filter set starting (and resetting) to `initial`.
    pub fn new<K: Into<String>>(initial: impl IntoIterator<Item = (K, FilterValue)>) -> Self {
        let initial: BTreeMap<String, FilterValue> =
            initial.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            current: initial.clone(),
            initial,
            revision: 0,
        }
    }

    /// Current value of a filter.
    pub fn get(&self, key: &str) -> &FilterValue {
        static EMPTY: FilterValue = FilterValue::Empty;
        self.current.get(key).unwrap_or(&EMPTY)
    }

    /// Iterate over current filter values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.current.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Incremented on every change; lets callers react to updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Set one filter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.current.insert(key.into(), value.into());
        self.revision += 1;
    }

    /// Set many filters at once.
    pub fn update<K: Into<String>>(&mut self, changes: impl IntoIterator<Item = (K, FilterValue)>) {
        for (key, value) in changes {
            self.current.insert(key.into(), value);
        }
        self.revision += 1;
    }

    /// Return one filter to its initial value.
    pub fn remove(&mut self, key: &str) {
        self.reset(Some(key));
    }

    /// Reset one filter, or all of them when `key` is `None`.
    pub fn reset(&mut self, key: Option<&str>) {
        match key {
            Some(key) => match self.initial.get(key) {
                Some(initial) => {
                    self.current.insert(key.to_string(), initial.clone());
                }
                None => {
                    self.current.remove(key);
                }
            },
            None => self.current = self.initial.clone(),
        }
        self.revision += 1;
    }

    /// Return every filter to its initial value.
    pub fn clear(&mut self) {
        self.reset(None);
    }

    /// Replace the initial snapshot.
    ///
    /// When it differs from the previous snapshot, current values are reset
    /// to it. Returns whether a reset happened.
    pub fn replace_initial<K: Into<String>>(
        &mut self,
        initial: impl IntoIterator<Item = (K, FilterValue)>,
    ) -> bool {
        let initial: BTreeMap<String, FilterValue> =
            initial.into_iter().map(|(k, v)| (k.into(), v)).collect();
        if same_filters(&initial, &self.initial) {
            return false;
        }
        self.current = initial.clone();
        self.initial = initial;
        self.revision += 1;
        true
    }

    /// `true` if any filter differs from its initial value.
    pub fn has_filters(&self) -> bool {
        !same_filters(&self.current, &self.initial)
    }

    /// `true` if `row` satisfies every non-empty filter.
    pub fn matches<T: TableRow>(&self, row: &T) -> bool {
        self.current
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .all(|(key, value)| value.accepts(&row.field(key)))
    }

    /// Rows that satisfy every filter, in source order.
    pub fn apply<'a, T: TableRow>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }
}

fn same_filters(a: &BTreeMap<String, FilterValue>, b: &BTreeMap<String, FilterValue>) -> bool {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    keys.into_iter().all(|key| {
        let left = a.get(key).unwrap_or(&FilterValue::Empty);
        let right = b.get(key).unwrap_or(&FilterValue::Empty);
        left == right
    })
}
