//! Form values, ordered validation rules and the resulting error state.

pub mod rules;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use super::FieldName;

/// A validation rule: the error message for a value, or `None` when it passes.
pub type Rule = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// State of one form.
///
/// `set_value` only schedules revalidation of the edited field; the
/// scheduled checks run on [`FormValidation::flush`], so `errors` catches up
/// with `values` eventually rather than on every keystroke.
pub struct FormValidation<F: FieldName> {
    values: IndexMap<F, String>,
    initial: IndexMap<F, String>,
    rules: IndexMap<F, Vec<Rule>>,
    errors: IndexMap<F, String>,
    pending: IndexSet<F>,
    is_dirty: bool,
}

impl<F: FieldName> FormValidation<F> {
    pub fn new<V: Into<String>>(initial: impl IntoIterator<Item = (F, V)>) -> Self {
        let initial: IndexMap<F, String> = initial
            .into_iter()
            .map(|(field, value)| (field, value.into()))
            .collect();
        Self {
            values: initial.clone(),
            initial,
            rules: IndexMap::new(),
            errors: IndexMap::new(),
            pending: IndexSet::new(),
            is_dirty: false,
        }
    }

    /// Declares the rules of `field`, checked in the given order.
    pub fn with_rules(mut self, field: F, rules: Vec<Rule>) -> Self {
        self.rules.insert(field, rules);
        self
    }

    pub fn values(&self) -> &IndexMap<F, String> {
        &self.values
    }

    /// Current value of `field`; an unset field reads as empty.
    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &IndexMap<F, String> {
        &self.errors
    }

    pub fn error(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Stores the value, marks the form dirty and schedules a check of
    /// this field only.
    pub fn set_value(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.is_dirty = true;
        self.pending.insert(field);
    }

    pub fn set_values<V: Into<String>>(&mut self, values: impl IntoIterator<Item = (F, V)>) {
        for (field, value) in values {
            self.set_value(field, value);
        }
    }

    /// Handler bound to `field` for an input's change event.
    pub fn change_handler(field: F) -> impl Fn(&mut FormValidation<F>, &str) {
        move |form, value| form.set_value(field, value)
    }

    /// Runs the checks scheduled by `set_value`.
    pub fn flush(&mut self) {
        let pending: Vec<F> = self.pending.drain(..).collect();
        for field in pending {
            self.validate_field(field);
        }
    }

    /// Checks one field and updates its error. Returns whether it passed.
    pub fn validate_field(&mut self, field: F) -> bool {
        match self.check(field) {
            Some(message) => {
                self.errors.insert(field, message);
                false
            }
            None => {
                self.errors.shift_remove(&field);
                true
            }
        }
    }

    /// Checks every field with rules and replaces the error map as a whole.
    pub fn validate_form(&mut self) -> bool {
        let errors: IndexMap<F, String> = self
            .rules
            .keys()
            .filter_map(|field| self.check(*field).map(|message| (*field, message)))
            .collect();
        self.errors = errors;
        self.pending.clear();
        self.is_valid()
    }

    pub fn set_field_error(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Back to the construction values, clean and without errors.
    pub fn reset(&mut self) {
        let initial = self.initial.clone();
        self.reset_to(initial);
    }

    pub fn reset_to<V: Into<String>>(&mut self, values: impl IntoIterator<Item = (F, V)>) {
        self.values = values
            .into_iter()
            .map(|(field, value)| (field, value.into()))
            .collect();
        self.errors.clear();
        self.pending.clear();
        self.is_dirty = false;
    }

    // First failing rule wins.
    fn check(&self, field: F) -> Option<String> {
        let value = self.value(field);
        self.rules
            .get(&field)?
            .iter()
            .find_map(|rule| rule(value))
    }
}
