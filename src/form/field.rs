use chrono::NaiveDate;

use crate::form::file::FileHandle;

/// Typed value slot for a single form control.
///
/// Each variant knows its own "empty" form so that disabling a field can
/// reset it without consulting the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Option<f64>),
    Bool(Option<bool>),
    Choice(Option<String>),
    Date(Option<NaiveDate>),
    File(Option<FileHandle>),
}

impl FieldValue {
    /// The empty form of the same variant.
    pub fn empty_like(&self) -> FieldValue {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::Number(_) => FieldValue::Number(None),
            FieldValue::Bool(_) => FieldValue::Bool(None),
            FieldValue::Choice(_) => FieldValue::Choice(None),
            FieldValue::Date(_) => FieldValue::Date(None),
            FieldValue::File(_) => FieldValue::File(None),
        }
    }

    /// Whether the slot currently holds an answer at all.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Number(number) => number.is_some(),
            FieldValue::Bool(flag) => flag.is_some(),
            FieldValue::Choice(choice) => choice.is_some(),
            FieldValue::Date(date) => date.is_some(),
            FieldValue::File(file) => file.is_some(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => *flag,
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            FieldValue::Choice(choice) => choice.as_deref(),
            _ => None,
        }
    }
}

/// Declarative validation rules attached to a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationRule {
    Required,
    Min(f64),
    Max(f64),
}

impl ValidationRule {
    fn satisfied_by(&self, value: &FieldValue) -> bool {
        match self {
            ValidationRule::Required => value.is_present(),
            // Range rules only constrain numbers that are actually present;
            // absence is Required's concern.
            ValidationRule::Min(min) => match value {
                FieldValue::Number(Some(n)) => n >= min,
                _ => true,
            },
            ValidationRule::Max(max) => match value {
                FieldValue::Number(Some(n)) => n <= max,
                _ => true,
            },
        }
    }
}

/// A single named control: value, enabled state, rules, interaction flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    code: &'static str,
    value: FieldValue,
    enabled: bool,
    rules: Vec<ValidationRule>,
    touched: bool,
    dirty: bool,
}

impl Field {
    pub fn new(code: &'static str, value: FieldValue, rules: Vec<ValidationRule>) -> Self {
        Self {
            code,
            value,
            enabled: true,
            rules,
            touched: false,
            dirty: false,
        }
    }

    /// A field that starts in the disabled-empty state (no rules attached).
    pub fn disabled(code: &'static str, value: FieldValue) -> Self {
        Self {
            code,
            value: value.empty_like(),
            enabled: false,
            rules: Vec::new(),
            touched: false,
            dirty: false,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Stores a new value and marks the field dirty.
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
        self.dirty = true;
    }

    /// Stores a value without altering interaction flags (programmatic writes).
    pub fn set_value_silent(&mut self, value: FieldValue) {
        self.value = value;
    }

    /// Enables or disables the field. Disabling resets the value to its
    /// type's empty form and detaches every rule; re-enabling never
    /// resurrects the previous value or rules.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.value = self.value.empty_like();
            self.rules.clear();
            self.clear_interaction();
        }
    }

    pub fn set_rules(&mut self, rules: Vec<ValidationRule>) {
        self.rules = rules;
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Back to pristine/untouched, keeping the value.
    pub fn clear_interaction(&mut self) {
        self.touched = false;
        self.dirty = false;
    }

    /// Resets to the empty value and pristine state, keeping enablement and rules.
    pub fn reset(&mut self) {
        self.value = self.value.empty_like();
        self.clear_interaction();
    }

    /// A disabled field never reports invalid, whatever it stores.
    pub fn is_valid(&self) -> bool {
        !self.enabled || self.rules.iter().all(|rule| rule.satisfied_by(&self.value))
    }

    pub fn is_invalid(&self) -> bool {
        self.enabled && !self.is_valid()
    }

    /// Display-level check: errors surface only after interaction, a step
    /// submit, or an explicit add attempt.
    pub fn show_invalid(&self, submitted: bool, attempt: bool) -> bool {
        self.is_invalid() && (self.touched || submitted || attempt)
    }
}
