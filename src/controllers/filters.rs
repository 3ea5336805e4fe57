use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

use super::FieldName;

/// Value held by a single filter field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
    Date(DateTime<Utc>),
    List(Vec<String>),
    Null,
}

impl FilterValue {
    /// A filter is active unless it is an empty string, null or an empty list.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Text(s) => !s.is_empty(),
            FilterValue::List(items) => !items.is_empty(),
            FilterValue::Null => false,
            FilterValue::Flag(_) | FilterValue::Date(_) => true,
        }
    }

    /// Empty value of the same kind: `""` for text, `[]` for lists, null otherwise.
    pub fn cleared(&self) -> FilterValue {
        match self {
            FilterValue::Text(_) => FilterValue::Text(String::new()),
            FilterValue::List(_) => FilterValue::List(Vec::new()),
            _ => FilterValue::Null,
        }
    }

    /// Query-string form. Dates are ISO-8601 in UTC and parse back to the
    /// same instant.
    pub fn to_query_value(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Flag(b) => b.to_string(),
            FilterValue::Date(d) => d.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            FilterValue::List(items) => items.join(","),
            FilterValue::Null => "null".to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        FilterValue::Date(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::List(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

/// Filter state of one list, keyed by a declared field set.
///
/// Keys keep insertion order, which is also the order of the generated
/// query parameters. The snapshot passed at construction is kept verbatim
/// for [`Filters::reset_filters`].
#[derive(Debug, Clone, PartialEq)]
pub struct Filters<K: FieldName> {
    values: IndexMap<K, FilterValue>,
    initial: IndexMap<K, FilterValue>,
}

impl<K: FieldName> Default for Filters<K> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<K: FieldName> Filters<K> {
    pub fn new(initial: impl IntoIterator<Item = (K, FilterValue)>) -> Self {
        let initial: IndexMap<K, FilterValue> = initial.into_iter().collect();
        Self {
            values: initial.clone(),
            initial,
        }
    }

    pub fn values(&self) -> &IndexMap<K, FilterValue> {
        &self.values
    }

    pub fn initial(&self) -> &IndexMap<K, FilterValue> {
        &self.initial
    }

    pub fn get(&self, key: K) -> Option<&FilterValue> {
        self.values.get(&key)
    }

    pub fn update_filter(&mut self, key: K, value: impl Into<FilterValue>) {
        self.values.insert(key, value.into());
    }

    /// Shallow merge; keys not mentioned keep their value.
    pub fn update_filters(&mut self, partial: impl IntoIterator<Item = (K, FilterValue)>) {
        self.values.extend(partial);
    }

    pub fn reset_filters(&mut self) {
        self.values = self.initial.clone();
    }

    /// Resets one key to the empty value of its kind. An unknown key becomes null.
    pub fn clear_filter(&mut self, key: K) {
        let cleared = self
            .values
            .get(&key)
            .map(FilterValue::cleared)
            .unwrap_or(FilterValue::Null);
        self.values.insert(key, cleared);
    }

    pub fn handle_select_change(&mut self, key: K, value: &str) {
        self.update_filter(key, value);
    }

    pub fn handle_input_change(&mut self, key: K, value: &str) {
        self.update_filter(key, value);
    }

    pub fn handle_date_change(&mut self, key: K, date: Option<DateTime<Utc>>) {
        self.update_filter(key, date);
    }

    /// Handler bound to `key` for select inputs.
    pub fn select_handler(key: K) -> impl Fn(&mut Filters<K>, &str) {
        move |filters, value| filters.handle_select_change(key, value)
    }

    /// Handler bound to `key` for text inputs.
    pub fn input_handler(key: K) -> impl Fn(&mut Filters<K>, &str) {
        move |filters, value| filters.handle_input_change(key, value)
    }

    /// Handler bound to `key` for date pickers.
    pub fn date_handler(key: K) -> impl Fn(&mut Filters<K>, Option<DateTime<Utc>>) {
        move |filters, date| filters.handle_date_change(key, date)
    }

    pub fn active_filters(&self) -> Vec<(K, &FilterValue)> {
        self.values
            .iter()
            .filter(|(_, value)| value.is_active())
            .map(|(key, value)| (*key, value))
            .collect()
    }

    pub fn has_active_filters(&self) -> bool {
        self.values.values().any(FilterValue::is_active)
    }

    /// Query parameters for the active filters, in insertion order.
    pub fn build_query_params(&self) -> Vec<(String, String)> {
        self.active_filters()
            .into_iter()
            .map(|(key, value)| (key.name().to_string(), value.to_query_value()))
            .collect()
    }
}
