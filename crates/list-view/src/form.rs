//! Form View-Models
//!
//! Schema-driven form state: populate from a fetched record, clear to
//! defaults, toggle disabled, and read values back for a write.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::query::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Date,
    DateTime,
    Number,
    TextArea,
    Checkbox,
    /// (value, label) pairs
    Select(&'static [(&'static str, &'static str)]),
}

impl FieldKind {
    /// HTML input type for single-line inputs
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Phone => "tel",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime-local",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Initial state of a checkbox in a cleared form
    pub checked: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true, checked: false }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false, checked: false }
    }

    pub const fn checked_by_default(self) -> Self {
        Self { checked: true, ..self }
    }

    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Checkbox => FieldValue::Checked(self.checked),
            FieldKind::Select(options) => {
                FieldValue::Text(options.first().map(|(value, _)| value.to_string()).unwrap_or_default())
            }
            _ => FieldValue::Text(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Checked(_) => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Checked(checked) => Value::Bool(*checked),
            FieldValue::Text(text) if text.trim().is_empty() => Value::Null,
            FieldValue::Text(text) => Value::String(text.clone()),
        }
    }
}

pub type FieldValues = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Values captured at submit time; `resource_id` decides create vs. update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub resource_id: Option<RecordId>,
    pub fields: FieldValues,
}

impl FormState {
    pub fn mode(&self) -> FormMode {
        if self.resource_id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }

    /// Request body; blank text becomes `null`.
    pub fn to_json(&self) -> Value {
        let body: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: FieldValue,
    pub disabled: bool,
}

/// What the form overlay renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub resource_id: Option<RecordId>,
    pub fields: Vec<FormField>,
}

impl FormView {
    /// A cleared form for `schema`.
    pub fn new(title: impl Into<String>, schema: &[FieldSpec], resource_id: Option<RecordId>) -> Self {
        Self {
            title: title.into(),
            resource_id,
            fields: schema
                .iter()
                .map(|spec| FormField { spec: *spec, value: spec.default_value(), disabled: false })
                .collect(),
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.resource_id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    /// Copy every known field out of `data`; unknown keys are skipped.
    pub fn populate(&mut self, data: &Value) {
        let Some(object) = data.as_object() else {
            return;
        };
        for field in &mut self.fields {
            let Some(value) = object.get(field.spec.name) else {
                continue;
            };
            match field.spec.kind {
                FieldKind::Checkbox => {
                    field.value = FieldValue::Checked(value.as_bool().unwrap_or(false));
                }
                FieldKind::Select(options) => {
                    // like a radio group: only a matching option is selected
                    let wanted = json_text(value);
                    if options.iter().any(|(option, _)| *option == wanted) {
                        field.value = FieldValue::Text(wanted);
                    }
                }
                FieldKind::DateTime => {
                    field.value = FieldValue::Text(datetime_input_value(&json_text(value)));
                }
                _ => {
                    field.value = FieldValue::Text(json_text(value));
                }
            }
        }
    }

    /// Reset every field to its default.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value = field.spec.default_value();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        for field in &mut self.fields {
            field.disabled = disabled;
        }
    }

    /// Returns false when `name` is not part of the form.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|field| field.spec.name == name) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }

    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|field| (field.spec.name.to_string(), field.value.clone()))
            .collect()
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `datetime-local` inputs take `YYYY-MM-DDTHH:MM`; drop seconds and zone.
fn datetime_input_value(raw: &str) -> String {
    match raw.get(..16) {
        Some(prefix) if prefix.as_bytes().get(10) == Some(&b'T') => prefix.to_string(),
        _ => raw.to_string(),
    }
}
