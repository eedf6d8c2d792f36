use crate::form::field::{Field, FieldValue, ValidationRule};

/// The ten named fields of one medical-event record, in highlight priority
/// order: description, dates, the two yes/no flags, then provider identity
/// before provider address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Desc,
    StartDate,
    EndDate,
    Operated,
    TreatmentDone,
    DocFirstName,
    DocLastName,
    DocStreet,
    DocNumber,
    DocZipCity,
}

impl RecordField {
    pub const ALL: [RecordField; 10] = [
        RecordField::Desc,
        RecordField::StartDate,
        RecordField::EndDate,
        RecordField::Operated,
        RecordField::TreatmentDone,
        RecordField::DocFirstName,
        RecordField::DocLastName,
        RecordField::DocStreet,
        RecordField::DocNumber,
        RecordField::DocZipCity,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RecordField::Desc => "desc",
            RecordField::StartDate => "startDate",
            RecordField::EndDate => "endDate",
            RecordField::Operated => "operated",
            RecordField::TreatmentDone => "treatmentDone",
            RecordField::DocFirstName => "docFirstName",
            RecordField::DocLastName => "docLastName",
            RecordField::DocStreet => "docStreet",
            RecordField::DocNumber => "docNr",
            RecordField::DocZipCity => "docZipCity",
        }
    }

    /// Provider-identity fields carry a required rule only while the owning
    /// section demands provider identification.
    pub fn is_provider(self) -> bool {
        matches!(
            self,
            RecordField::DocFirstName
                | RecordField::DocLastName
                | RecordField::DocStreet
                | RecordField::DocNumber
                | RecordField::DocZipCity
        )
    }

    fn index(self) -> usize {
        RecordField::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0)
    }

    fn empty_value(self) -> FieldValue {
        match self {
            RecordField::Desc => FieldValue::Text(String::new()),
            RecordField::StartDate | RecordField::EndDate => FieldValue::Date(None),
            RecordField::Operated | RecordField::TreatmentDone => FieldValue::Bool(None),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// One repeatable medical-event record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    fields: Vec<Field>,
}

impl RecordGroup {
    /// A fresh, enabled, pristine group. Core fields are required; provider
    /// fields are required only when the owning section says so.
    pub fn new(provider_required: bool) -> Self {
        let fields = RecordField::ALL
            .iter()
            .map(|record_field| {
                let rules = Self::rules_for(*record_field, provider_required);
                Field::new(record_field.code(), record_field.empty_value(), rules)
            })
            .collect();
        Self { fields }
    }

    fn rules_for(record_field: RecordField, provider_required: bool) -> Vec<ValidationRule> {
        if !record_field.is_provider() || provider_required {
            vec![ValidationRule::Required]
        } else {
            Vec::new()
        }
    }

    pub fn field(&self, record_field: RecordField) -> &Field {
        &self.fields[record_field.index()]
    }

    pub fn field_mut(&mut self, record_field: RecordField) -> &mut Field {
        &mut self.fields[record_field.index()]
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(Field::is_valid)
    }

    /// First invalid enabled field in the fixed priority order.
    pub fn first_invalid(&self) -> Option<RecordField> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|record_field| self.field(*record_field).is_invalid())
    }

    pub fn mark_enabled_touched(&mut self) {
        for field in &mut self.fields {
            if field.is_enabled() {
                field.touch();
            }
        }
    }

    pub fn clear_interaction(&mut self) {
        for field in &mut self.fields {
            field.clear_interaction();
        }
    }

    /// Empties every field and returns the group to pristine/untouched,
    /// keeping enablement and rules as they are.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }

    /// Attaches or detaches the required rule on the five provider fields.
    pub fn set_provider_required(&mut self, required: bool) {
        for record_field in RecordField::ALL {
            if record_field.is_provider() {
                let rules = if required {
                    vec![ValidationRule::Required]
                } else {
                    Vec::new()
                };
                self.field_mut(record_field).set_rules(rules);
            }
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        for field in &mut self.fields {
            field.set_enabled(enabled);
        }
    }

    /// Re-enables a group that was closed, restoring the rule set the open
    /// section demands (disabling stripped it per the field invariant).
    fn reopen(&mut self, provider_required: bool) {
        for record_field in RecordField::ALL {
            let rules = Self::rules_for(record_field, provider_required);
            let field = self.field_mut(record_field);
            field.set_enabled(true);
            field.set_rules(rules);
            field.clear_interaction();
        }
    }
}

/// Outcome of an [`RecordCollection::append`] attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A new pristine group exists at this index.
    Appended(usize),
    /// The last group was invalid; its enabled fields are now touched and
    /// this is the first offender in priority order.
    Blocked { index: usize, field: RecordField },
    /// The whole section is closed; nothing happened.
    Disabled,
}

/// Ordered, never-empty list of record groups with gated append/remove.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCollection {
    code: &'static str,
    groups: Vec<RecordGroup>,
    enabled: bool,
    provider_required: bool,
    add_attempted: bool,
}

impl RecordCollection {
    /// Created closed, with exactly one blank, disabled member.
    pub fn new(code: &'static str) -> Self {
        let mut group = RecordGroup::new(false);
        group.set_enabled(false);
        Self {
            code,
            groups: vec![group],
            enabled: false,
            provider_required: false,
            add_attempted: false,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        // Invariant: never empty.
        false
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn provider_required(&self) -> bool {
        self.provider_required
    }

    pub fn add_attempted(&self) -> bool {
        self.add_attempted
    }

    pub fn group(&self, index: usize) -> Option<&RecordGroup> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut RecordGroup> {
        self.groups.get_mut(index)
    }

    pub fn groups(&self) -> &[RecordGroup] {
        &self.groups
    }

    /// A closed collection never gates navigation.
    pub fn is_valid(&self) -> bool {
        !self.enabled || self.groups.iter().all(RecordGroup::is_valid)
    }

    /// First invalid field across groups, in group order then priority order.
    pub fn first_invalid(&self) -> Option<(usize, RecordField)> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(index, group)| group.first_invalid().map(|field| (index, field)))
    }

    pub fn mark_enabled_touched(&mut self) {
        for group in &mut self.groups {
            group.mark_enabled_touched();
        }
    }

    /// Opens the section: every group is enabled with fresh rules and a
    /// clean interaction slate, and the add-attempt flag is cleared.
    pub fn open(&mut self, provider_required: bool) {
        self.enabled = true;
        self.provider_required = provider_required;
        self.add_attempted = false;
        for group in &mut self.groups {
            group.reopen(provider_required);
        }
    }

    /// Collapses back to exactly one blank, disabled group.
    pub fn close(&mut self) {
        self.reset_to_one();
        self.groups[0].set_provider_required(false);
        self.groups[0].set_enabled(false);
        self.enabled = false;
        self.provider_required = false;
        self.add_attempted = false;
    }

    fn reset_to_one(&mut self) {
        self.groups.truncate(1);
        self.groups[0].reset();
    }

    /// True iff the "add" affordance should be offered: the section is open
    /// and the trailing group is valid. Querying this has no side effects.
    pub fn can_append(&self) -> bool {
        self.enabled
            && self
                .groups
                .last()
                .map(RecordGroup::is_valid)
                .unwrap_or(false)
    }

    /// An invalid trailing group blocks the append, touches its enabled
    /// fields, and reports the first offender; a valid one yields a new
    /// pristine group.
    pub fn append(&mut self) -> AppendOutcome {
        if !self.enabled {
            return AppendOutcome::Disabled;
        }
        self.add_attempted = true;
        let last_index = self.groups.len() - 1;
        if !self.groups[last_index].is_valid() {
            self.groups[last_index].mark_enabled_touched();
            let field = self.groups[last_index]
                .first_invalid()
                .unwrap_or(RecordField::Desc);
            return AppendOutcome::Blocked {
                index: last_index,
                field,
            };
        }

        let group = RecordGroup::new(self.provider_required);
        self.groups.push(group);
        AppendOutcome::Appended(self.groups.len() - 1)
    }

    /// Removes the targeted group, or resets the sole remaining one; the
    /// collection never reaches zero length. Clears the add-attempt flag.
    pub fn remove(&mut self, index: usize) -> Result<(), crate::errors::FormError> {
        if index >= self.groups.len() {
            return Err(crate::errors::FormError::InvalidRef(format!(
                "{}[{}]",
                self.code, index
            )));
        }
        if self.groups.len() == 1 {
            self.reset_to_one();
        } else {
            self.groups.remove(index);
        }
        self.add_attempted = false;
        Ok(())
    }
}
