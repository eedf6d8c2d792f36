use std::collections::BTreeMap;

use crate::errors::FormError;
use crate::form::active::FieldRef;
use crate::form::field::{Field, FieldValue, ValidationRule};
use crate::form::file::{FileGate, FileHandle};
use crate::form::record::{AppendOutcome, RecordCollection, RecordField, RecordGroup};
use crate::form::registry::{
    CollectionSpec, ControlKind, ControlSpec, EntityRef, ToggleSpec, COLLECTION_SPECS,
    CONTROL_SPECS, STEP_MAP, TOGGLE_SPECS,
};
use crate::form::toggle::ToggleSet;

/// Root aggregate owning every control, record collection, and toggle set,
/// plus the active pointer, the deferred-focus slot, and the step-submitted
/// flag. All readers query this live model; it never hands out snapshots.
#[derive(Debug, Clone)]
pub struct FormModel {
    controls: BTreeMap<&'static str, Field>,
    collections: BTreeMap<&'static str, RecordCollection>,
    toggles: BTreeMap<&'static str, ToggleSet>,
    active: Option<FieldRef>,
    pending_focus: Option<FieldRef>,
    submitted: bool,
}

impl FormModel {
    /// Builds the full questionnaire model from the registry, with every
    /// dependent entity in its initial disabled-empty state.
    pub fn standard() -> Self {
        let controls = CONTROL_SPECS
            .iter()
            .map(|spec| (spec.code, build_control(spec)))
            .collect();
        let collections = COLLECTION_SPECS
            .iter()
            .map(|spec: &CollectionSpec| (spec.code, RecordCollection::new(spec.code)))
            .collect();
        let toggles = TOGGLE_SPECS
            .iter()
            .map(|spec: &ToggleSpec| (spec.code, ToggleSet::new(spec.code)))
            .collect();
        Self {
            controls,
            collections,
            toggles,
            active: None,
            pending_focus: None,
            submitted: false,
        }
    }

    // ---- lookups ---------------------------------------------------------

    pub fn control(&self, code: &str) -> Option<&Field> {
        self.controls.get(code)
    }

    pub fn control_mut(&mut self, code: &str) -> Result<&mut Field, FormError> {
        self.controls
            .get_mut(code)
            .ok_or_else(|| FormError::InvalidRef(code.to_string()))
    }

    pub fn collection(&self, code: &str) -> Option<&RecordCollection> {
        self.collections.get(code)
    }

    pub fn collection_mut(&mut self, code: &str) -> Result<&mut RecordCollection, FormError> {
        self.collections
            .get_mut(code)
            .ok_or_else(|| FormError::InvalidRef(code.to_string()))
    }

    pub fn toggle_set(&self, code: &str) -> Option<&ToggleSet> {
        self.toggles.get(code)
    }

    pub fn toggle_set_mut(&mut self, code: &str) -> Result<&mut ToggleSet, FormError> {
        self.toggles
            .get_mut(code)
            .ok_or_else(|| FormError::InvalidRef(code.to_string()))
    }

    // ---- transient state -------------------------------------------------

    pub fn active(&self) -> Option<FieldRef> {
        self.active
    }

    pub fn set_active(&mut self, target: Option<FieldRef>) {
        self.active = target;
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn set_submitted(&mut self, submitted: bool) {
        self.submitted = submitted;
    }

    /// Drains the one deferred focus request scheduled by a successful
    /// append. The UI calls this after its next paint and promotes the
    /// target to the active pointer.
    pub fn take_pending_focus(&mut self) -> Option<FieldRef> {
        self.pending_focus.take()
    }

    pub(crate) fn schedule_focus(&mut self, target: FieldRef) {
        self.pending_focus = Some(target);
    }

    // ---- mutations -------------------------------------------------------

    /// Writes a control value, marking the field dirty and making it the
    /// active target. Gate recomputation is the caller's (wizard's) job.
    pub fn set_control_value(&mut self, code: &str, value: FieldValue) -> Result<(), FormError> {
        let field = self.control_mut(code)?;
        if !field.is_enabled() {
            return Ok(());
        }
        field.set_value(value);
        let code = field.code();
        self.active = Some(FieldRef::Control(code));
        Ok(())
    }

    pub fn touch_control(&mut self, code: &str) -> Result<(), FormError> {
        self.control_mut(code)?.touch();
        Ok(())
    }

    /// Runs the candidate through the content gate before assignment. A
    /// rejected candidate leaves the field untouched and returns false; an
    /// accepted one replaces the value and resets the field pristine.
    pub fn assign_file(
        &mut self,
        code: &str,
        gate: &dyn FileGate,
        candidate: FileHandle,
    ) -> Result<bool, FormError> {
        let field = self.control_mut(code)?;
        if !gate.accepts(&candidate.mime, &candidate.name) {
            return Ok(false);
        }
        field.set_value_silent(FieldValue::File(Some(candidate)));
        field.clear_interaction();
        Ok(true)
    }

    /// Flips a toggle-chart code and makes the chart the active target.
    pub fn toggle(&mut self, set_code: &str, code: &str) -> Result<(), FormError> {
        let set = self.toggle_set_mut(set_code)?;
        if !set.is_enabled() {
            return Ok(());
        }
        set.toggle(code);
        let set_code = set.code();
        self.active = Some(FieldRef::Toggle(set_code));
        Ok(())
    }

    /// Writes one field of a record group: no-op while the section is
    /// closed, marks the field dirty, and moves the active pointer there.
    pub fn set_group_value(
        &mut self,
        collection: &str,
        index: usize,
        record_field: RecordField,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let col = self.collection_mut(collection)?;
        if !col.is_enabled() {
            return Ok(());
        }
        let code = col.code();
        let group = col
            .group_mut(index)
            .ok_or_else(|| FormError::InvalidRef(format!("{}[{}]", code, index)))?;
        group.field_mut(record_field).set_value(value);
        self.active = Some(FieldRef::GroupField {
            collection: code,
            index,
            field: record_field,
        });
        Ok(())
    }

    pub fn touch_group_field(
        &mut self,
        collection: &str,
        index: usize,
        record_field: RecordField,
    ) -> Result<(), FormError> {
        let col = self.collection_mut(collection)?;
        let code = col.code();
        let group = col
            .group_mut(index)
            .ok_or_else(|| FormError::InvalidRef(format!("{}[{}]", code, index)))?;
        group.field_mut(record_field).touch();
        Ok(())
    }

    /// Appends a record to the collection, or blocks on an invalid trailing
    /// group. Blocking moves the active pointer to the first offender; a
    /// successful append schedules the deferred focus on the new group's
    /// description field as its very last action.
    pub fn append_record(&mut self, collection: &str) -> Result<AppendOutcome, FormError> {
        let col = self.collection_mut(collection)?;
        let code = col.code();
        let outcome = col.append();
        match outcome {
            AppendOutcome::Blocked { index, field } => {
                self.active = Some(FieldRef::GroupField {
                    collection: code,
                    index,
                    field,
                });
            }
            AppendOutcome::Appended(index) => {
                self.schedule_focus(FieldRef::GroupField {
                    collection: code,
                    index,
                    field: RecordField::Desc,
                });
            }
            AppendOutcome::Disabled => {}
        }
        Ok(outcome)
    }

    /// Removes (or resets, at length one) the targeted group and clears
    /// every transient submission/attempt flag plus the active pointer.
    pub fn remove_record(&mut self, collection: &str, index: usize) -> Result<(), FormError> {
        let col = self.collection_mut(collection)?;
        if !col.is_enabled() {
            return Ok(());
        }
        col.remove(index)?;
        self.submitted = false;
        self.active = None;
        Ok(())
    }

    // ---- step gating -----------------------------------------------------

    pub fn step_entities(step: u8) -> &'static [EntityRef] {
        STEP_MAP
            .get(step.saturating_sub(1) as usize)
            .copied()
            .unwrap_or(&[])
    }

    pub fn entity_is_valid(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Control(code) => {
                self.control(code).map(Field::is_valid).unwrap_or(true)
            }
            EntityRef::Collection(code) => self
                .collection(code)
                .map(RecordCollection::is_valid)
                .unwrap_or(true),
            // Toggle sets carry no intrinsic rule.
            EntityRef::Toggle(_) => true,
        }
    }

    /// Touches every enabled field belonging to the listed entities.
    pub fn touch_entities(&mut self, entities: &[EntityRef]) {
        for entity in entities.iter().copied() {
            match entity {
                EntityRef::Control(code) => {
                    if let Some(field) = self.controls.get_mut(code) {
                        if field.is_enabled() {
                            field.touch();
                        }
                    }
                }
                EntityRef::Collection(code) => {
                    if let Some(col) = self.collections.get_mut(code) {
                        col.mark_enabled_touched();
                    }
                }
                EntityRef::Toggle(_) => {}
            }
        }
    }

    /// First invalid entity in step-declared order, resolved down to a
    /// concrete field reference (collections delegate to their own
    /// first-invalid priority order).
    pub fn first_invalid_in(&self, entities: &[EntityRef]) -> Option<FieldRef> {
        for entity in entities.iter().copied() {
            match entity {
                EntityRef::Control(code) => {
                    if let Some(field) = self.control(code) {
                        if field.is_invalid() {
                            return Some(FieldRef::Control(code));
                        }
                    }
                }
                EntityRef::Collection(code) => {
                    if let Some(col) = self.collection(code) {
                        if col.is_enabled() {
                            if let Some((index, field)) = col.first_invalid() {
                                return Some(FieldRef::GroupField {
                                    collection: code,
                                    index,
                                    field,
                                });
                            }
                        }
                    }
                }
                EntityRef::Toggle(_) => {}
            }
        }
        None
    }

    /// Display-level check for a concrete field reference, folding in the
    /// step-submitted flag and, for group fields, the owning collection's
    /// add-attempt flag.
    pub fn show_invalid(&self, target: FieldRef) -> bool {
        match target {
            FieldRef::Control(code) => self
                .control(code)
                .map(|field| field.show_invalid(self.submitted, false))
                .unwrap_or(false),
            FieldRef::GroupField {
                collection,
                index,
                field,
            } => self
                .collection(collection)
                .and_then(|col| {
                    col.group(index)
                        .map(|group| (col.add_attempted(), group))
                })
                .map(|(attempt, group)| group.field(field).show_invalid(self.submitted, attempt))
                .unwrap_or(false),
            FieldRef::Toggle(_) => false,
        }
    }

    pub fn report_file_name(&self) -> Option<&str> {
        match self.control(crate::form::registry::codes::REPORT_FILE)?.value() {
            FieldValue::File(Some(handle)) => Some(handle.name.as_str()),
            _ => None,
        }
    }

    pub fn groups_of(&self, collection: &str) -> &[RecordGroup] {
        self.collection(collection)
            .map(RecordCollection::groups)
            .unwrap_or(&[])
    }
}

fn build_control(spec: &ControlSpec) -> Field {
    let empty = match spec.kind {
        ControlKind::Text => FieldValue::Text(String::new()),
        ControlKind::Number { .. } => FieldValue::Number(None),
        ControlKind::Bool => FieldValue::Bool(None),
        ControlKind::Choice(_) => FieldValue::Choice(None),
        ControlKind::File => FieldValue::File(None),
    };
    if spec.starts_disabled {
        return Field::disabled(spec.code, empty);
    }
    let mut rules = Vec::new();
    if !spec.optional {
        rules.push(ValidationRule::Required);
    }
    if let ControlKind::Number { min, max } = spec.kind {
        rules.push(ValidationRule::Min(min));
        rules.push(ValidationRule::Max(max));
    }
    Field::new(spec.code, empty, rules)
}
