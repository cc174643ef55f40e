//! Ordered filter storage shared by every builder.
//!
//! Values are kept raw (unescaped). Serialization order is insertion order;
//! overwriting a key keeps the slot it was first inserted into.

use std::fmt;

/// The closed set of query parameter names the API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Query,
    Top,
    Skip,
    Format,
    Adult,
    Latitude,
    Longitude,
    Market,
    Option,
    ImageFilters,
    VideoFilters,
    VideoSortBy,
}

impl FilterKey {
    /// Wire name, case-sensitive.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterKey::Query => "Query",
            FilterKey::Top => "$top",
            FilterKey::Skip => "$skip",
            FilterKey::Format => "$format",
            FilterKey::Adult => "Adult",
            FilterKey::Latitude => "Latitude",
            FilterKey::Longitude => "Longitude",
            FilterKey::Market => "Market",
            FilterKey::Option => "Option",
            FilterKey::ImageFilters => "ImageFilters",
            FilterKey::VideoFilters => "VideoFilters",
            FilterKey::VideoSortBy => "VideoSortBy",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Integer(n) => write!(f, "{n}"),
            // Whole coordinates keep a trailing ".0" (`47.0`, not `47`).
            FilterValue::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            FilterValue::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Integer(n)
    }
}

impl From<f64> for FilterValue {
    fn from(x: f64) -> Self {
        FilterValue::Float(x)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    entries: Vec<(FilterKey, FilterValue)>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`.
    pub fn set(&mut self, key: FilterKey, value: impl Into<FilterValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Add `token` to a cumulative entry, `+`-joined when one already exists.
    pub fn append(&mut self, key: FilterKey, token: &str) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = FilterValue::Text(format!("{slot}+{token}")),
            None => self.entries.push((key, FilterValue::Text(token.to_string()))),
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&FilterValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Render `key=value` pairs in insertion order, unescaped.
    ///
    /// The first pair is prefixed with `first`, the rest with `&`. An empty
    /// store renders as an empty string.
    pub fn serialize(&self, first: char) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.entries.iter().enumerate() {
            out.push(if i == 0 { first } else { '&' });
            out.push_str(key.as_str());
            out.push('=');
            out.push_str(&value.to_string());
        }
        out
    }
}
