//! Conditional enable/disable rules between governing answers and their
//! dependents, expressed as one declarative table instead of a handler per
//! field pair.
//!
//! Every row names a governor control, the predicate over its value, and
//! the effect on a dependent. Applying a rule is idempotent: when the
//! governor's value has not changed the dependent's state, the engine
//! leaves interaction flags alone, so re-running a rule is a no-op.

use tracing::debug;

use crate::form::field::{FieldValue, ValidationRule};
use crate::form::model::FormModel;
use crate::form::registry::codes;

/// Predicate over the governor's current value.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Yes/no gate: fires on an explicit `true`.
    IsTrue,
    /// Status selector: fires when the value is in the subset.
    ChoiceIn(Vec<&'static str>),
}

impl Trigger {
    fn fires(&self, value: &FieldValue) -> bool {
        match self {
            Trigger::IsTrue => value.as_bool() == Some(true),
            Trigger::ChoiceIn(subset) => value
                .as_choice()
                .map(|choice| subset.contains(&choice))
                .unwrap_or(false),
        }
    }
}

/// What firing (or clearing) the rule does to the dependent.
#[derive(Debug, Clone, PartialEq)]
pub enum GateEffect {
    /// Enable a note field with a required rule; blank and disable it when
    /// the trigger clears.
    RequireNote(&'static str),
    /// Open a record collection (attaching provider-required rules when the
    /// section demands provider identification); collapse it back to one
    /// blank group when the trigger clears.
    OpenCollection {
        collection: &'static str,
        provider_required: bool,
    },
    /// Enable a set of secondary required questions; clear and disable them
    /// when the trigger clears.
    EnableQuestions(&'static [&'static str]),
    /// Enable a toggle chart; empty and disable it when the trigger clears.
    OpenToggle(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GateRule {
    pub governor: &'static str,
    pub trigger: Trigger,
    pub effect: GateEffect,
}

/// Recomputes dependents whenever a governor's value changes.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<GateRule>,
}

impl RuleEngine {
    /// The rule table of the production questionnaire. Note triggers fire
    /// on `mangelhaft`, except the gum note which fires on both
    /// non-`gut` values; `with_note_trigger` overrides either choice.
    pub fn standard() -> Self {
        let deficient = || Trigger::ChoiceIn(vec!["mangelhaft"]);
        let rules = vec![
            GateRule {
                governor: codes::MEDICATION,
                trigger: Trigger::IsTrue,
                effect: GateEffect::RequireNote(codes::MED_NAME),
            },
            GateRule {
                governor: codes::MEDICATION,
                trigger: Trigger::IsTrue,
                effect: GateEffect::RequireNote(codes::MED_REASON),
            },
            GateRule {
                governor: codes::MEDICATION,
                trigger: Trigger::IsTrue,
                effect: GateEffect::OpenCollection {
                    collection: codes::ILLNESSES_MED,
                    provider_required: true,
                },
            },
            GateRule {
                governor: codes::ILLNESS_Q,
                trigger: Trigger::IsTrue,
                effect: GateEffect::OpenCollection {
                    collection: codes::ILLNESSES_ILL,
                    provider_required: true,
                },
            },
            GateRule {
                governor: codes::OPS_Q,
                trigger: Trigger::IsTrue,
                effect: GateEffect::EnableQuestions(&[
                    codes::OPS_A,
                    codes::OPS_B,
                    codes::OPS_C,
                    codes::OPS_D,
                ]),
            },
            GateRule {
                governor: codes::OPS_B,
                trigger: Trigger::IsTrue,
                effect: GateEffect::OpenCollection {
                    collection: codes::OPS_B_ITEMS,
                    provider_required: true,
                },
            },
            GateRule {
                governor: codes::TEETH_CONDITION,
                trigger: deficient(),
                effect: GateEffect::RequireNote(codes::TEETH_CONDITION_NOTE),
            },
            GateRule {
                governor: codes::HYGIENE,
                trigger: deficient(),
                effect: GateEffect::RequireNote(codes::HYGIENE_NOTE),
            },
            GateRule {
                governor: codes::CROWNS_CONDITION,
                trigger: deficient(),
                effect: GateEffect::RequireNote(codes::CROWNS_NOTE),
            },
            GateRule {
                governor: codes::BRIDGES_CONDITION,
                trigger: deficient(),
                effect: GateEffect::RequireNote(codes::BRIDGES_NOTE),
            },
            GateRule {
                governor: codes::PARTIAL_DENTURES_CONDITION,
                trigger: deficient(),
                effect: GateEffect::RequireNote(codes::PARTIAL_DENTURES_NOTE),
            },
            GateRule {
                governor: codes::DENTITION,
                trigger: Trigger::IsTrue,
                effect: GateEffect::RequireNote(codes::DENTITION_NOTE),
            },
            GateRule {
                governor: codes::JAW,
                trigger: Trigger::IsTrue,
                effect: GateEffect::RequireNote(codes::JAW_NOTE),
            },
            GateRule {
                governor: codes::FUTURE_TEETH_DISEASE,
                trigger: Trigger::IsTrue,
                effect: GateEffect::RequireNote(codes::FUTURE_TEETH_DISEASE_NOTE),
            },
            GateRule {
                governor: codes::MISSING_TEETH_Q,
                trigger: Trigger::IsTrue,
                effect: GateEffect::OpenToggle(codes::MISSING_TEETH),
            },
            GateRule {
                governor: codes::TREATED_TEETH_Q,
                trigger: Trigger::IsTrue,
                effect: GateEffect::OpenToggle(codes::TREATED_TEETH),
            },
            GateRule {
                governor: codes::IMPLANTS_CONDITION,
                trigger: deficient(),
                effect: GateEffect::RequireNote(codes::IMPLANTS_NOTE),
            },
            GateRule {
                governor: codes::ROOT_TREATMENT_Q,
                trigger: Trigger::IsTrue,
                effect: GateEffect::RequireNote(codes::ROOT_TREATMENT_NOTE),
            },
            GateRule {
                governor: codes::GUM_CONDITION,
                trigger: Trigger::ChoiceIn(vec!["mangelhaft", "schlecht"]),
                effect: GateEffect::RequireNote(codes::GUM_NOTE),
            },
            GateRule {
                governor: codes::ORTHODONTICS_Q,
                trigger: Trigger::IsTrue,
                effect: GateEffect::RequireNote(codes::ORTHODONTICS_NOTE),
            },
        ];
        Self { rules }
    }

    /// Replaces the trigger subset for the rule governing `note`. Product
    /// requirements differ on which status values demand a note, so the
    /// subset is data, not code.
    pub fn with_note_trigger(mut self, note: &'static str, subset: &[&'static str]) -> Self {
        for rule in &mut self.rules {
            if rule.effect == GateEffect::RequireNote(note) {
                rule.trigger = Trigger::ChoiceIn(subset.to_vec());
            }
        }
        self
    }

    pub fn rules(&self) -> &[GateRule] {
        &self.rules
    }

    /// Re-evaluates every rule governed by `governor` against its current
    /// value. Disabling a dependent clears its value, so dependents that
    /// are themselves governors cascade.
    pub fn apply(&self, model: &mut FormModel, governor: &str) {
        let mut cascade: Vec<&'static str> = Vec::new();
        for rule in &self.rules {
            if rule.governor != governor {
                continue;
            }
            let Some(value) = model.control(rule.governor).map(|f| f.value().clone()) else {
                continue;
            };
            let open = model.control(rule.governor).map(|f| f.is_enabled()).unwrap_or(false)
                && rule.trigger.fires(&value);
            apply_effect(model, rule, open, &mut cascade);
        }
        for dependent in cascade {
            self.apply(model, dependent);
        }
    }

    /// Applies every rule once, in table order. Used after constructing a
    /// model to settle initial states.
    pub fn apply_all(&self, model: &mut FormModel) {
        let governors: Vec<&'static str> = {
            let mut seen = Vec::new();
            for rule in &self.rules {
                if !seen.contains(&rule.governor) {
                    seen.push(rule.governor);
                }
            }
            seen
        };
        for governor in governors {
            self.apply(model, governor);
        }
    }
}

fn apply_effect(
    model: &mut FormModel,
    rule: &GateRule,
    open: bool,
    cascade: &mut Vec<&'static str>,
) {
    match rule.effect {
        GateEffect::RequireNote(note) => {
            let Ok(field) = model.control_mut(note) else {
                return;
            };
            if open {
                if !field.is_enabled() {
                    debug!(governor = rule.governor, note, "note field opened");
                    field.set_enabled(true);
                    field.set_rules(vec![ValidationRule::Required]);
                    field.clear_interaction();
                }
            } else if field.is_enabled() {
                debug!(governor = rule.governor, note, "note field closed");
                field.set_enabled(false);
            }
        }
        GateEffect::OpenCollection {
            collection,
            provider_required,
        } => {
            let Ok(col) = model.collection_mut(collection) else {
                return;
            };
            if open {
                if !col.is_enabled() {
                    debug!(governor = rule.governor, collection, "section opened");
                    col.open(provider_required);
                    // Freshly reopened sections start with a clean error
                    // slate and no highlight.
                    model.set_submitted(false);
                    model.clear_active();
                }
            } else if col.is_enabled() {
                debug!(governor = rule.governor, collection, "section closed");
                col.close();
            }
        }
        GateEffect::EnableQuestions(questions) => {
            for question in questions {
                let Ok(field) = model.control_mut(question) else {
                    continue;
                };
                if open {
                    if !field.is_enabled() {
                        field.set_enabled(true);
                        field.set_rules(vec![ValidationRule::Required]);
                        field.clear_interaction();
                    }
                } else if field.is_enabled() {
                    // Disabling clears the value; anything this question
                    // governs must be re-evaluated.
                    field.set_enabled(false);
                    cascade.push(question);
                }
            }
            if open {
                debug!(governor = rule.governor, "secondary questions enabled");
            }
        }
        GateEffect::OpenToggle(toggle) => {
            let Ok(set) = model.toggle_set_mut(toggle) else {
                return;
            };
            if open {
                if !set.is_enabled() {
                    debug!(governor = rule.governor, toggle, "toggle chart opened");
                    set.set_enabled(true);
                    model.clear_active();
                }
            } else if set.is_enabled() {
                debug!(governor = rule.governor, toggle, "toggle chart cleared");
                set.clear();
                set.set_enabled(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::FieldValue;
    use crate::form::record::RecordField;

    fn engine_and_model() -> (RuleEngine, FormModel) {
        (RuleEngine::standard(), FormModel::standard())
    }

    #[test]
    fn deficient_status_opens_note_and_good_closes_it() {
        let (engine, mut model) = engine_and_model();
        model
            .set_control_value(
                codes::TEETH_CONDITION,
                FieldValue::Choice(Some("mangelhaft".into())),
            )
            .unwrap();
        engine.apply(&mut model, codes::TEETH_CONDITION);

        let note = model.control(codes::TEETH_CONDITION_NOTE).unwrap();
        assert!(note.is_enabled());
        assert!(note.is_invalid());
        assert!(!note.is_touched());

        model
            .set_control_value(codes::TEETH_CONDITION, FieldValue::Choice(Some("gut".into())))
            .unwrap();
        engine.apply(&mut model, codes::TEETH_CONDITION);

        let note = model.control(codes::TEETH_CONDITION_NOTE).unwrap();
        assert!(!note.is_enabled());
        assert!(note.is_valid());
        assert!(note.rules().is_empty());
    }

    #[test]
    fn reapplying_unchanged_governor_is_a_no_op() {
        let (engine, mut model) = engine_and_model();
        model
            .set_control_value(codes::DENTITION, FieldValue::Bool(Some(true)))
            .unwrap();
        engine.apply(&mut model, codes::DENTITION);

        model
            .set_control_value(codes::DENTITION_NOTE, FieldValue::Text("Crowding".into()))
            .unwrap();
        model.touch_control(codes::DENTITION_NOTE).unwrap();

        engine.apply(&mut model, codes::DENTITION);
        let note = model.control(codes::DENTITION_NOTE).unwrap();
        assert!(note.is_touched());
        assert_eq!(note.value(), &FieldValue::Text("Crowding".into()));
    }

    #[test]
    fn gum_note_fires_on_both_non_good_values() {
        let (engine, mut model) = engine_and_model();
        model
            .set_control_value(codes::GUM_CONDITION, FieldValue::Choice(Some("schlecht".into())))
            .unwrap();
        engine.apply(&mut model, codes::GUM_CONDITION);
        assert!(model.control(codes::GUM_NOTE).unwrap().is_enabled());
    }

    #[test]
    fn note_trigger_subset_is_configurable() {
        let engine = RuleEngine::standard()
            .with_note_trigger(codes::TEETH_CONDITION_NOTE, &["mangelhaft", "schlecht"]);
        let mut model = FormModel::standard();
        model
            .set_control_value(
                codes::TEETH_CONDITION,
                FieldValue::Choice(Some("schlecht".into())),
            )
            .unwrap();
        engine.apply(&mut model, codes::TEETH_CONDITION);
        assert!(model.control(codes::TEETH_CONDITION_NOTE).unwrap().is_enabled());
    }

    #[test]
    fn medication_yes_opens_notes_and_collection() {
        let (engine, mut model) = engine_and_model();
        model
            .set_control_value(codes::MEDICATION, FieldValue::Bool(Some(true)))
            .unwrap();
        engine.apply(&mut model, codes::MEDICATION);

        assert!(model.control(codes::MED_NAME).unwrap().is_enabled());
        assert!(model.control(codes::MED_REASON).unwrap().is_enabled());
        let col = model.collection(codes::ILLNESSES_MED).unwrap();
        assert!(col.is_enabled());
        assert!(col.provider_required());

        model
            .set_control_value(codes::MEDICATION, FieldValue::Bool(Some(false)))
            .unwrap();
        engine.apply(&mut model, codes::MEDICATION);
        assert!(!model.control(codes::MED_NAME).unwrap().is_enabled());
        assert!(!model.collection(codes::ILLNESSES_MED).unwrap().is_enabled());
    }

    #[test]
    fn ops_gate_cascades_through_category_b() {
        let (engine, mut model) = engine_and_model();
        model
            .set_control_value(codes::OPS_Q, FieldValue::Bool(Some(true)))
            .unwrap();
        engine.apply(&mut model, codes::OPS_Q);
        model
            .set_control_value(codes::OPS_B, FieldValue::Bool(Some(true)))
            .unwrap();
        engine.apply(&mut model, codes::OPS_B);
        assert!(model.collection(codes::OPS_B_ITEMS).unwrap().is_enabled());

        // Fill something in so we can observe the wipe.
        model
            .set_group_value(
                codes::OPS_B_ITEMS,
                0,
                RecordField::Desc,
                FieldValue::Text("Appendectomy".into()),
            )
            .unwrap();

        model
            .set_control_value(codes::OPS_Q, FieldValue::Bool(Some(false)))
            .unwrap();
        engine.apply(&mut model, codes::OPS_Q);

        assert!(!model.control(codes::OPS_B).unwrap().is_enabled());
        let col = model.collection(codes::OPS_B_ITEMS).unwrap();
        assert!(!col.is_enabled());
        assert_eq!(col.len(), 1);
        assert!(!col
            .group(0)
            .unwrap()
            .field(RecordField::Desc)
            .value()
            .is_present());
    }

    #[test]
    fn apply_all_settles_a_model_with_preset_answers() {
        let (engine, mut model) = engine_and_model();
        // Values written silently, as a host restoring state would.
        model
            .control_mut(codes::MEDICATION)
            .unwrap()
            .set_value_silent(FieldValue::Bool(Some(true)));
        model
            .control_mut(codes::GUM_CONDITION)
            .unwrap()
            .set_value_silent(FieldValue::Choice(Some("mangelhaft".into())));

        engine.apply_all(&mut model);
        assert!(model.control(codes::MED_NAME).unwrap().is_enabled());
        assert!(model.control(codes::GUM_NOTE).unwrap().is_enabled());
        assert!(!model.control(codes::OPS_A).unwrap().is_enabled());
    }

    #[test]
    fn clearing_governor_empties_toggle_chart() {
        let (engine, mut model) = engine_and_model();
        model
            .set_control_value(codes::MISSING_TEETH_Q, FieldValue::Bool(Some(true)))
            .unwrap();
        engine.apply(&mut model, codes::MISSING_TEETH_Q);
        model.toggle(codes::MISSING_TEETH, "36").unwrap();
        assert!(model.toggle_set(codes::MISSING_TEETH).unwrap().contains("36"));

        model
            .set_control_value(codes::MISSING_TEETH_Q, FieldValue::Bool(Some(false)))
            .unwrap();
        engine.apply(&mut model, codes::MISSING_TEETH_Q);
        let set = model.toggle_set(codes::MISSING_TEETH).unwrap();
        assert!(set.is_empty());
        assert!(!set.is_enabled());
    }
}
