#![allow(dead_code)]

use anamnesis_core::form::field::FieldValue;
use anamnesis_core::form::file::FileHandle;
use anamnesis_core::form::record::RecordField;
use anamnesis_core::form::registry::codes;
use anamnesis_core::payload::SubmissionPayload;
use anamnesis_core::wizard::{NextOutcome, Wizard};
use chrono::NaiveDate;

pub fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

pub fn number(value: f64) -> FieldValue {
    FieldValue::Number(Some(value))
}

pub fn yes_no(flag: bool) -> FieldValue {
    FieldValue::Bool(Some(flag))
}

pub fn choice(value: &str) -> FieldValue {
    FieldValue::Choice(Some(value.to_string()))
}

pub fn date(year: i32, month: u32, day: u32) -> FieldValue {
    FieldValue::Date(NaiveDate::from_ymd_opt(year, month, day))
}

/// Fills the given step with the shortest valid set of answers: every
/// branching question answered "no" and every status answered harmless.
pub fn answer_minimal(wizard: &mut Wizard, step: u8) {
    let set = |wizard: &mut Wizard, code, value| {
        wizard.set_value(code, value).expect("set value");
    };
    match step {
        1 => {
            set(wizard, codes::HEIGHT_CM, number(180.0));
            set(wizard, codes::WEIGHT_KG, number(75.0));
        }
        2 => set(wizard, codes::MEDICATION, yes_no(false)),
        3 => set(wizard, codes::ILLNESS_Q, yes_no(false)),
        4 => set(wizard, codes::OPS_Q, yes_no(false)),
        5 => {
            set(wizard, codes::DOCTOR_FIRST_NAME, text("Anna"));
            set(wizard, codes::DOCTOR_LAST_NAME, text("Muster"));
            set(wizard, codes::DOCTOR_STREET, text("Bahnhofstrasse"));
            set(wizard, codes::DOCTOR_NUMBER, text("12"));
            set(wizard, codes::DOCTOR_CITY, text("8001 Zürich"));
        }
        6 => {
            let accepted = wizard
                .attach_report(FileHandle::new("befund.pdf", "application/pdf"))
                .expect("attach report");
            assert!(accepted);
        }
        7 => set(wizard, codes::TEETH_CONDITION, choice("gut")),
        8 => set(wizard, codes::HYGIENE, choice("gut")),
        9 => set(wizard, codes::OCCLUSION, choice("klasse1")),
        10 => set(wizard, codes::CROWNS_CONDITION, choice("keine")),
        11 => set(wizard, codes::BRIDGES_CONDITION, choice("keine")),
        12 => set(wizard, codes::PARTIAL_DENTURES_CONDITION, choice("keine")),
        13 => set(wizard, codes::DENTITION, yes_no(false)),
        14 => set(wizard, codes::JAW, yes_no(false)),
        15 => set(wizard, codes::FUTURE_TEETH_DISEASE, yes_no(false)),
        16 => set(wizard, codes::MISSING_TEETH_Q, yes_no(false)),
        17 => set(wizard, codes::TREATED_TEETH_Q, yes_no(false)),
        18 => set(wizard, codes::IMPLANTS_CONDITION, choice("keine")),
        19 => set(wizard, codes::ROOT_TREATMENT_Q, yes_no(false)),
        20 => set(wizard, codes::GUM_CONDITION, choice("gut")),
        21 => set(wizard, codes::ORTHODONTICS_Q, yes_no(false)),
        22 => set(wizard, codes::CONSENT, yes_no(true)),
        other => panic!("no minimal answers for step {other}"),
    }
}

/// Advances through minimally-answered steps until `step` is current.
pub fn advance_to(wizard: &mut Wizard, step: u8) {
    while wizard.current_step() < step {
        let current = wizard.current_step();
        answer_minimal(wizard, current);
        match wizard.next() {
            NextOutcome::Advanced(_) => {}
            other => panic!("step {current} did not advance: {other:?}"),
        }
    }
}

/// Walks the whole questionnaire on the minimal path and returns the payload.
pub fn finish_minimal(wizard: &mut Wizard) -> SubmissionPayload {
    advance_to(wizard, 22);
    answer_minimal(wizard, 22);
    match wizard.next() {
        NextOutcome::Finished(payload) => payload,
        other => panic!("final step did not finish: {other:?}"),
    }
}

/// Fully fills one medical-event record, provider fields included.
pub fn fill_record(wizard: &mut Wizard, collection: &str, index: usize, desc: &str) {
    let set = |wizard: &mut Wizard, field, value| {
        wizard
            .set_group_value(collection, index, field, value)
            .expect("set group value");
    };
    set(wizard, RecordField::Desc, text(desc));
    set(wizard, RecordField::StartDate, date(2022, 5, 1));
    set(wizard, RecordField::EndDate, date(2022, 6, 1));
    set(wizard, RecordField::Operated, yes_no(false));
    set(wizard, RecordField::TreatmentDone, yes_no(true));
    set(wizard, RecordField::DocFirstName, text("Anna"));
    set(wizard, RecordField::DocLastName, text("Muster"));
    set(wizard, RecordField::DocStreet, text("Bahnhofstrasse"));
    set(wizard, RecordField::DocNumber, text("12"));
    set(wizard, RecordField::DocZipCity, text("8001 Zürich"));
}
