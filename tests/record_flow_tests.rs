mod common;

use anamnesis_core::form::field::FieldValue;
use anamnesis_core::form::record::{AppendOutcome, RecordField};
use anamnesis_core::form::registry::codes;
use anamnesis_core::form::FieldRef;
use anamnesis_core::wizard::{NextOutcome, Wizard};
use serde_json::{json, Value};

use common::{advance_to, fill_record, finish_minimal, text, yes_no};

fn wizard_with_open_medication_section() -> Wizard {
    let mut wizard = Wizard::new();
    advance_to(&mut wizard, 2);
    wizard.set_value(codes::MEDICATION, yes_no(true)).unwrap();
    wizard.set_value(codes::MED_NAME, text("Ibuprofen")).unwrap();
    wizard.set_value(codes::MED_REASON, text("Back pain")).unwrap();
    wizard
}

#[test]
fn append_blocks_until_trailing_record_is_complete() {
    let mut wizard = wizard_with_open_medication_section();
    assert!(!wizard.can_append(codes::ILLNESSES_MED));

    match wizard.append_record(codes::ILLNESSES_MED).unwrap() {
        AppendOutcome::Blocked { index, field } => {
            assert_eq!(index, 0);
            assert_eq!(field, RecordField::Desc);
        }
        other => panic!("Unexpected outcome: {other:?}"),
    }
    // Blocked appends highlight the offender and make its error visible.
    let offender = FieldRef::GroupField {
        collection: codes::ILLNESSES_MED,
        index: 0,
        field: RecordField::Desc,
    };
    assert_eq!(wizard.active(), Some(offender));
    assert!(wizard.show_invalid(offender));

    fill_record(&mut wizard, codes::ILLNESSES_MED, 0, "Migraine");
    assert!(wizard.can_append(codes::ILLNESSES_MED));
    assert_eq!(
        wizard.append_record(codes::ILLNESSES_MED).unwrap(),
        AppendOutcome::Appended(1)
    );
}

#[test]
fn successful_append_defers_focus_to_new_description() {
    let mut wizard = wizard_with_open_medication_section();
    fill_record(&mut wizard, codes::ILLNESSES_MED, 0, "Migraine");
    wizard.append_record(codes::ILLNESSES_MED).unwrap();

    // Focus lands only once the UI asks for it, after the new row exists.
    let target = wizard.apply_pending_focus().unwrap();
    assert_eq!(
        target,
        FieldRef::GroupField {
            collection: codes::ILLNESSES_MED,
            index: 1,
            field: RecordField::Desc,
        }
    );
    assert_eq!(wizard.active(), Some(target));
    assert_eq!(wizard.apply_pending_focus(), None);
}

#[test]
fn remove_clears_submission_flag_and_never_empties_the_list() {
    let mut wizard = wizard_with_open_medication_section();
    fill_record(&mut wizard, codes::ILLNESSES_MED, 0, "Migraine");
    wizard.append_record(codes::ILLNESSES_MED).unwrap();

    // A failed submit attempt, then a removal; the error state resets.
    wizard.next();
    assert!(wizard.model().is_submitted());
    wizard.remove_record(codes::ILLNESSES_MED, 1).unwrap();
    assert!(!wizard.model().is_submitted());
    assert_eq!(wizard.model().groups_of(codes::ILLNESSES_MED).len(), 1);

    // Removing the last remaining record resets it instead.
    wizard.remove_record(codes::ILLNESSES_MED, 0).unwrap();
    let groups = wizard.model().groups_of(codes::ILLNESSES_MED);
    assert_eq!(groups.len(), 1);
    assert!(!groups[0].field(RecordField::Desc).value().is_present());
}

#[test]
fn medication_records_survive_a_round_trip_through_later_steps() {
    let mut wizard = wizard_with_open_medication_section();
    fill_record(&mut wizard, codes::ILLNESSES_MED, 0, "Migraine");
    assert_eq!(wizard.next(), NextOutcome::Advanced(3));

    wizard.go_to_step(2);
    let groups = wizard.model().groups_of(codes::ILLNESSES_MED);
    assert_eq!(
        groups[0].field(RecordField::Desc).value(),
        &FieldValue::Text("Migraine".into())
    );
}

#[test]
fn turning_medication_off_then_on_yields_a_blank_section() {
    let mut wizard = wizard_with_open_medication_section();
    fill_record(&mut wizard, codes::ILLNESSES_MED, 0, "Migraine");
    wizard.append_record(codes::ILLNESSES_MED).unwrap();
    fill_record(&mut wizard, codes::ILLNESSES_MED, 1, "Asthma");

    wizard.set_value(codes::MEDICATION, yes_no(false)).unwrap();
    assert!(!wizard.model().collection(codes::ILLNESSES_MED).unwrap().is_enabled());
    assert!(wizard.model().control(codes::MED_NAME).unwrap().value() == &FieldValue::Text(String::new()));

    wizard.set_value(codes::MEDICATION, yes_no(true)).unwrap();
    let groups = wizard.model().groups_of(codes::ILLNESSES_MED);
    assert_eq!(groups.len(), 1);
    assert!(!groups[0].field(RecordField::Desc).value().is_present());
    assert!(groups[0].field(RecordField::Desc).is_enabled());
}

#[test]
fn filled_records_appear_in_the_final_payload() {
    let mut wizard = wizard_with_open_medication_section();
    fill_record(&mut wizard, codes::ILLNESSES_MED, 0, "Migraine");
    wizard.append_record(codes::ILLNESSES_MED).unwrap();
    fill_record(&mut wizard, codes::ILLNESSES_MED, 1, "Asthma");
    assert_eq!(wizard.next(), NextOutcome::Advanced(3));

    let payload = finish_minimal(&mut wizard);
    let groups = payload
        .value_of(codes::ILLNESSES_MED)
        .and_then(Value::as_array)
        .unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].get("desc"), Some(&json!("Migraine")));
    assert_eq!(groups[1].get("desc"), Some(&json!("Asthma")));
    assert_eq!(groups[0].get("startDate"), Some(&json!("2022-05-01")));
    assert_eq!(groups[0].get("docNr"), Some(&json!("12")));
}
