//! Step-sequencing state machine: 22 numbered steps, forward navigation
//! gated on per-step validity, a monotone high-water mark, and a terminal
//! finished state that yields the submission payload.
//!
//! The wizard is the single shared context for a questionnaire session: it
//! owns the form model, the conditional rule engine, and the file gate, and
//! every mutation routes through it so dependents are always recomputed
//! before the next read.

use tracing::{debug, info};

use crate::errors::FormError;
use crate::form::active::FieldRef;
use crate::form::field::FieldValue;
use crate::form::file::{FileGate, FileHandle, PdfGate};
use crate::form::model::FormModel;
use crate::form::record::{AppendOutcome, RecordField};
use crate::form::registry::{codes, STEP_COUNT};
use crate::payload::SubmissionPayload;
use crate::rules::RuleEngine;

/// Result of a forward-navigation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    /// The step was valid; this is the new current step.
    Advanced(u8),
    /// The step is invalid; the active pointer now names the first
    /// offender and the current step is unchanged.
    Blocked(FieldRef),
    /// Step 22 completed with a fully valid model; the session is terminal
    /// and this is the serialized submission.
    Finished(SubmissionPayload),
}

pub struct Wizard {
    model: FormModel,
    engine: RuleEngine,
    file_gate: Box<dyn FileGate>,
    current_step: u8,
    max_step_reached: u8,
    finished: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::with_engine(RuleEngine::standard())
    }

    pub fn with_engine(engine: RuleEngine) -> Self {
        Self {
            model: FormModel::standard(),
            engine,
            file_gate: Box::new(PdfGate),
            current_step: 1,
            max_step_reached: 1,
            finished: false,
        }
    }

    pub fn with_file_gate(mut self, gate: Box<dyn FileGate>) -> Self {
        self.file_gate = gate;
        self
    }

    // ---- read access -----------------------------------------------------

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn max_step_reached(&self) -> u8 {
        self.max_step_reached
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn active(&self) -> Option<FieldRef> {
        self.model.active()
    }

    /// Promotes the deferred append focus to the active pointer. The UI
    /// calls this once after the paint that created the new group's row.
    pub fn apply_pending_focus(&mut self) -> Option<FieldRef> {
        let target = self.model.take_pending_focus()?;
        self.model.set_active(Some(target));
        Some(target)
    }

    pub fn show_invalid(&self, target: FieldRef) -> bool {
        self.model.show_invalid(target)
    }

    // ---- mutations (engine recomputes dependents) ------------------------

    pub fn set_value(&mut self, code: &str, value: FieldValue) -> Result<(), FormError> {
        self.model.set_control_value(code, value)?;
        self.engine.apply(&mut self.model, code);
        Ok(())
    }

    pub fn touch(&mut self, code: &str) -> Result<(), FormError> {
        self.model.touch_control(code)
    }

    pub fn set_group_value(
        &mut self,
        collection: &str,
        index: usize,
        field: RecordField,
        value: FieldValue,
    ) -> Result<(), FormError> {
        self.model.set_group_value(collection, index, field, value)
    }

    pub fn touch_group_field(
        &mut self,
        collection: &str,
        index: usize,
        field: RecordField,
    ) -> Result<(), FormError> {
        self.model.touch_group_field(collection, index, field)
    }

    pub fn toggle(&mut self, set_code: &str, code: &str) -> Result<(), FormError> {
        self.model.toggle(set_code, code)
    }

    pub fn can_append(&self, collection: &str) -> bool {
        self.model
            .collection(collection)
            .map(|col| col.can_append())
            .unwrap_or(false)
    }

    pub fn append_record(&mut self, collection: &str) -> Result<AppendOutcome, FormError> {
        self.model.append_record(collection)
    }

    pub fn remove_record(&mut self, collection: &str, index: usize) -> Result<(), FormError> {
        self.model.remove_record(collection, index)
    }

    /// Attaches the medical report if the file gate accepts the candidate.
    /// Returns false (and changes nothing) on rejection.
    pub fn attach_report(&mut self, candidate: FileHandle) -> Result<bool, FormError> {
        self.model
            .assign_file(codes::REPORT_FILE, self.file_gate.as_ref(), candidate)
    }

    // ---- navigation ------------------------------------------------------

    /// Unconditional jump, bypassing validity of skipped steps. Grows the
    /// high-water mark, clears the active pointer and the step-submitted
    /// flag. Out-of-range targets are ignored.
    pub fn go_to_step(&mut self, step: u8) {
        if self.finished || !(1..=STEP_COUNT).contains(&step) {
            return;
        }
        self.jump(step);
    }

    pub fn back(&mut self) {
        if self.current_step > 1 {
            self.go_to_step(self.current_step - 1);
        }
    }

    /// Submits the current step: touches its enabled entities, blocks on
    /// the first invalid one, advances otherwise. From step 22 a valid
    /// model reaches the terminal finished state and yields the payload.
    pub fn next(&mut self) -> NextOutcome {
        if self.finished {
            return NextOutcome::Finished(SubmissionPayload::from_model(&self.model));
        }

        self.model.set_submitted(true);
        let entities = FormModel::step_entities(self.current_step);
        self.model.touch_entities(entities);

        if let Some(target) = self.model.first_invalid_in(entities) {
            self.model.set_active(Some(target));
            debug!(step = self.current_step, target = %target, "navigation blocked");
            return NextOutcome::Blocked(target);
        }

        if self.current_step == STEP_COUNT {
            self.finished = true;
            info!("questionnaire complete, serializing submission");
            return NextOutcome::Finished(SubmissionPayload::from_model(&self.model));
        }

        let next_step = self.current_step + 1;
        self.jump(next_step);
        NextOutcome::Advanced(next_step)
    }

    fn jump(&mut self, step: u8) {
        debug!(from = self.current_step, to = step, "step transition");
        self.current_step = step;
        self.max_step_reached = self.max_step_reached.max(step);
        self.model.clear_active();
        self.model.set_submitted(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_at_step_one_is_a_no_op() {
        let mut wizard = Wizard::new();
        wizard.back();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.max_step_reached(), 1);
    }

    #[test]
    fn jump_grows_high_water_mark_and_back_keeps_it() {
        let mut wizard = Wizard::new();
        wizard.go_to_step(7);
        assert_eq!(wizard.current_step(), 7);
        assert_eq!(wizard.max_step_reached(), 7);
        wizard.back();
        assert_eq!(wizard.current_step(), 6);
        assert_eq!(wizard.max_step_reached(), 7);
        wizard.go_to_step(40);
        assert_eq!(wizard.current_step(), 6);
    }

    #[test]
    fn next_blocks_on_empty_first_step() {
        let mut wizard = Wizard::new();
        match wizard.next() {
            NextOutcome::Blocked(target) => {
                assert_eq!(target, FieldRef::Control(codes::HEIGHT_CM));
                assert_eq!(wizard.active(), Some(target));
            }
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert_eq!(wizard.current_step(), 1);
        // Submitted flag makes the untouched-but-invalid field visible.
        assert!(wizard.show_invalid(FieldRef::Control(codes::WEIGHT_KG)));
    }

    #[test]
    fn next_advances_once_step_is_valid() {
        let mut wizard = Wizard::new();
        wizard
            .set_value(codes::HEIGHT_CM, FieldValue::Number(Some(180.0)))
            .unwrap();
        wizard
            .set_value(codes::WEIGHT_KG, FieldValue::Number(Some(75.0)))
            .unwrap();
        assert_eq!(wizard.next(), NextOutcome::Advanced(2));
        assert_eq!(wizard.active(), None);
        assert_eq!(wizard.max_step_reached(), 2);
    }
}
