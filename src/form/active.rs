use std::fmt;

use crate::form::record::RecordField;

/// Discriminated reference to the entity currently highlighted for user
/// attention: a plain control, one field of an indexed record group, or a
/// toggle chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    Control(&'static str),
    GroupField {
        collection: &'static str,
        index: usize,
        field: RecordField,
    },
    Toggle(&'static str),
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Control(code) => write!(f, "{}", code),
            FieldRef::GroupField {
                collection,
                index,
                field,
            } => write!(f, "{}.{}.{}", collection, index, field.code()),
            FieldRef::Toggle(code) => write!(f, "{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_refs_render_dotted_paths() {
        let field_ref = FieldRef::GroupField {
            collection: "illnessesMed",
            index: 2,
            field: RecordField::StartDate,
        };
        assert_eq!(field_ref.to_string(), "illnessesMed.2.startDate");
    }
}
