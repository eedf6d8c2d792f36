//! Submission serialization: the flat, ordered `{code, value}` payload
//! handed to the external submission sink. The engine builds the payload;
//! it never performs the network call.

use serde::Serialize;
use serde_json::{json, Value};

use crate::form::field::FieldValue;
use crate::form::model::FormModel;
use crate::form::record::{RecordField, RecordGroup};
use crate::form::registry::{EntityRef, STEP_MAP};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadEntry {
    pub code: String,
    pub value: Value,
}

/// Flat ordered collection of `{code, value}` pairs, in step-map order.
/// File fields serialize to their filename (or null); record collections
/// to arrays of plain objects; toggle sets to arrays of codes in catalog
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub entries: Vec<PayloadEntry>,
}

impl SubmissionPayload {
    pub fn from_model(model: &FormModel) -> Self {
        let mut entries = Vec::new();
        for step in STEP_MAP {
            for entity in step.iter().copied() {
                match entity {
                    EntityRef::Control(code) => {
                        let value = model
                            .control(code)
                            .map(|field| field_value_json(field.value()))
                            .unwrap_or(Value::Null);
                        entries.push(PayloadEntry {
                            code: code.to_string(),
                            value,
                        });
                    }
                    EntityRef::Collection(code) => {
                        let groups: Vec<Value> =
                            model.groups_of(code).iter().map(group_json).collect();
                        entries.push(PayloadEntry {
                            code: code.to_string(),
                            value: Value::Array(groups),
                        });
                    }
                    EntityRef::Toggle(code) => {
                        let codes: Vec<Value> = model
                            .toggle_set(code)
                            .map(|set| {
                                set.selected_in_catalog_order()
                                    .into_iter()
                                    .map(|tooth| Value::String(tooth.to_string()))
                                    .collect()
                            })
                            .unwrap_or_default();
                        entries.push(PayloadEntry {
                            code: code.to_string(),
                            value: Value::Array(codes),
                        });
                    }
                }
            }
        }
        Self { entries }
    }

    pub fn value_of(&self, code: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| &entry.value)
    }

    pub fn to_json_pretty(&self) -> Result<String, crate::errors::FormError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

fn field_value_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text.clone()),
        FieldValue::Number(Some(number)) => json!(number),
        FieldValue::Number(None) => Value::Null,
        FieldValue::Bool(Some(flag)) => Value::Bool(*flag),
        FieldValue::Bool(None) => Value::Null,
        FieldValue::Choice(Some(choice)) => Value::String(choice.clone()),
        FieldValue::Choice(None) => Value::Null,
        FieldValue::Date(Some(date)) => Value::String(date.format("%Y-%m-%d").to_string()),
        FieldValue::Date(None) => Value::Null,
        // The binary never enters the model; only the filename travels.
        FieldValue::File(Some(handle)) => Value::String(handle.name.clone()),
        FieldValue::File(None) => Value::Null,
    }
}

fn group_json(group: &RecordGroup) -> Value {
    let mut object = serde_json::Map::new();
    for record_field in RecordField::ALL {
        object.insert(
            record_field.code().to_string(),
            field_value_json(group.field(record_field).value()),
        );
    }
    Value::Object(object)
}
