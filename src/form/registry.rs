//! Declarative catalog of every control, collection, and toggle set in the
//! questionnaire, plus the 22-step map used for validation gating.
//!
//! The engine never hard-codes a field outside this module: behavior comes
//! from the specs here and the gate table in [`crate::rules`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Stable codes for every top-level entity. These double as payload keys.
pub mod codes {
    pub const HEIGHT_CM: &str = "heightCm";
    pub const WEIGHT_KG: &str = "weightKg";

    pub const MEDICATION: &str = "medication";
    pub const MED_NAME: &str = "medName";
    pub const MED_REASON: &str = "medReason";
    pub const ILLNESSES_MED: &str = "illnessesMed";

    pub const ILLNESS_Q: &str = "illnessQ";
    pub const ILLNESSES_ILL: &str = "illnessesIll";

    pub const OPS_Q: &str = "opsQ";
    pub const OPS_A: &str = "opsA";
    pub const OPS_B: &str = "opsB";
    pub const OPS_C: &str = "opsC";
    pub const OPS_D: &str = "opsD";
    pub const OPS_B_ITEMS: &str = "opsBItems";

    pub const DOCTOR_FIRST_NAME: &str = "doctorFirstName";
    pub const DOCTOR_LAST_NAME: &str = "doctorLastName";
    pub const DOCTOR_STREET: &str = "doctorStreet";
    pub const DOCTOR_NUMBER: &str = "doctorNumber";
    pub const DOCTOR_CITY: &str = "doctorCity";

    pub const REPORT_FILE: &str = "reportFile";

    pub const TEETH_CONDITION: &str = "teethCondition";
    pub const TEETH_CONDITION_NOTE: &str = "teethConditionNote";
    pub const HYGIENE: &str = "hygiene";
    pub const HYGIENE_NOTE: &str = "hygieneNote";
    pub const OCCLUSION: &str = "occlusion";
    pub const CROWNS_CONDITION: &str = "crownsCondition";
    pub const CROWNS_NOTE: &str = "crownsNote";
    pub const BRIDGES_CONDITION: &str = "bridgesCondition";
    pub const BRIDGES_NOTE: &str = "bridgesNote";
    pub const PARTIAL_DENTURES_CONDITION: &str = "partialDenturesCondition";
    pub const PARTIAL_DENTURES_NOTE: &str = "partialDenturesNote";
    pub const DENTITION: &str = "dentition";
    pub const DENTITION_NOTE: &str = "dentitionNote";
    pub const JAW: &str = "jaw";
    pub const JAW_NOTE: &str = "jawNote";
    pub const FUTURE_TEETH_DISEASE: &str = "futureTeethDisease";
    pub const FUTURE_TEETH_DISEASE_NOTE: &str = "futureTeethDiseaseNote";

    pub const MISSING_TEETH_Q: &str = "missingTeethQ";
    pub const MISSING_TEETH: &str = "missingTeeth";
    pub const TREATED_TEETH_Q: &str = "treatedTeethQ";
    pub const TREATED_TEETH: &str = "treatedTeeth";

    pub const IMPLANTS_CONDITION: &str = "implantsCondition";
    pub const IMPLANTS_NOTE: &str = "implantsNote";
    pub const ROOT_TREATMENT_Q: &str = "rootTreatmentQ";
    pub const ROOT_TREATMENT_NOTE: &str = "rootTreatmentNote";
    pub const GUM_CONDITION: &str = "gumCondition";
    pub const GUM_NOTE: &str = "gumNote";
    pub const ORTHODONTICS_Q: &str = "orthodonticsQ";
    pub const ORTHODONTICS_NOTE: &str = "orthodonticsNote";

    pub const REMARKS: &str = "remarks";
    pub const CONSENT: &str = "consent";
}

/// Status values are wire codes, kept in German; labels are display-only.
pub const CONDITION_VALUES: &[&str] = &["gut", "mangelhaft", "schlecht"];
pub const CONDITION_VALUES_WITH_NONE: &[&str] = &["keine", "gut", "mangelhaft", "schlecht"];
pub const OCCLUSION_VALUES: &[&str] = &["klasse1", "klasse2", "klasse3"];

/// Data kind of a top-level control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    Text,
    Number { min: f64, max: f64 },
    Bool,
    Choice(&'static [&'static str]),
    File,
}

/// Everything the model needs to build one control.
#[derive(Debug, Clone, Copy)]
pub struct ControlSpec {
    pub code: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
    /// No required rule even while enabled.
    pub optional: bool,
    /// Dependent fields start in the disabled-empty, rule-free state and
    /// only wake up through the rule engine.
    pub starts_disabled: bool,
}

impl ControlSpec {
    const fn new(code: &'static str, label: &'static str, kind: ControlKind) -> Self {
        Self {
            code,
            label,
            kind,
            optional: false,
            starts_disabled: false,
        }
    }

    const fn dependent(code: &'static str, label: &'static str, kind: ControlKind) -> Self {
        Self {
            code,
            label,
            kind,
            optional: false,
            starts_disabled: true,
        }
    }

    const fn optional(code: &'static str, label: &'static str, kind: ControlKind) -> Self {
        Self {
            code,
            label,
            kind,
            optional: true,
            starts_disabled: false,
        }
    }
}

pub const CONTROL_SPECS: &[ControlSpec] = &[
    ControlSpec::new(
        codes::HEIGHT_CM,
        "Height (cm)",
        ControlKind::Number {
            min: 0.0,
            max: 350.0,
        },
    ),
    ControlSpec::new(
        codes::WEIGHT_KG,
        "Weight (kg)",
        ControlKind::Number {
            min: 0.0,
            max: 600.0,
        },
    ),
    ControlSpec::new(codes::MEDICATION, "Taking medication?", ControlKind::Bool),
    ControlSpec::dependent(codes::MED_NAME, "Medication name", ControlKind::Text),
    ControlSpec::dependent(codes::MED_REASON, "Reason for medication", ControlKind::Text),
    ControlSpec::new(codes::ILLNESS_Q, "Prior illnesses?", ControlKind::Bool),
    ControlSpec::new(codes::OPS_Q, "Any operations?", ControlKind::Bool),
    ControlSpec::dependent(codes::OPS_A, "Operation category A", ControlKind::Bool),
    ControlSpec::dependent(codes::OPS_B, "Operation category B", ControlKind::Bool),
    ControlSpec::dependent(codes::OPS_C, "Operation category C", ControlKind::Bool),
    ControlSpec::dependent(codes::OPS_D, "Operation category D", ControlKind::Bool),
    ControlSpec::new(codes::DOCTOR_FIRST_NAME, "Doctor first name", ControlKind::Text),
    ControlSpec::new(codes::DOCTOR_LAST_NAME, "Doctor last name", ControlKind::Text),
    ControlSpec::new(codes::DOCTOR_STREET, "Doctor street", ControlKind::Text),
    ControlSpec::new(codes::DOCTOR_NUMBER, "Doctor street number", ControlKind::Text),
    ControlSpec::new(codes::DOCTOR_CITY, "Doctor ZIP / city", ControlKind::Text),
    ControlSpec::new(codes::REPORT_FILE, "Medical report (PDF)", ControlKind::File),
    ControlSpec::new(
        codes::TEETH_CONDITION,
        "Condition of teeth",
        ControlKind::Choice(CONDITION_VALUES),
    ),
    ControlSpec::dependent(codes::TEETH_CONDITION_NOTE, "Teeth condition note", ControlKind::Text),
    ControlSpec::new(
        codes::HYGIENE,
        "Oral hygiene",
        ControlKind::Choice(CONDITION_VALUES),
    ),
    ControlSpec::dependent(codes::HYGIENE_NOTE, "Oral hygiene note", ControlKind::Text),
    ControlSpec::new(
        codes::OCCLUSION,
        "Occlusion class",
        ControlKind::Choice(OCCLUSION_VALUES),
    ),
    ControlSpec::new(
        codes::CROWNS_CONDITION,
        "Condition of crowns",
        ControlKind::Choice(CONDITION_VALUES_WITH_NONE),
    ),
    ControlSpec::dependent(codes::CROWNS_NOTE, "Crowns note", ControlKind::Text),
    ControlSpec::new(
        codes::BRIDGES_CONDITION,
        "Condition of bridges",
        ControlKind::Choice(CONDITION_VALUES_WITH_NONE),
    ),
    ControlSpec::dependent(codes::BRIDGES_NOTE, "Bridges note", ControlKind::Text),
    ControlSpec::new(
        codes::PARTIAL_DENTURES_CONDITION,
        "Condition of partial dentures",
        ControlKind::Choice(CONDITION_VALUES_WITH_NONE),
    ),
    ControlSpec::dependent(
        codes::PARTIAL_DENTURES_NOTE,
        "Partial dentures note",
        ControlKind::Text,
    ),
    ControlSpec::new(codes::DENTITION, "Dentition anomalies?", ControlKind::Bool),
    ControlSpec::dependent(codes::DENTITION_NOTE, "Dentition note", ControlKind::Text),
    ControlSpec::new(codes::JAW, "Jaw complaints?", ControlKind::Bool),
    ControlSpec::dependent(codes::JAW_NOTE, "Jaw note", ControlKind::Text),
    ControlSpec::new(
        codes::FUTURE_TEETH_DISEASE,
        "Expected future dental disease?",
        ControlKind::Bool,
    ),
    ControlSpec::dependent(
        codes::FUTURE_TEETH_DISEASE_NOTE,
        "Future dental disease note",
        ControlKind::Text,
    ),
    ControlSpec::new(codes::MISSING_TEETH_Q, "Any missing teeth?", ControlKind::Bool),
    ControlSpec::new(codes::TREATED_TEETH_Q, "Any treated teeth?", ControlKind::Bool),
    ControlSpec::new(
        codes::IMPLANTS_CONDITION,
        "Condition of implants",
        ControlKind::Choice(CONDITION_VALUES_WITH_NONE),
    ),
    ControlSpec::dependent(codes::IMPLANTS_NOTE, "Implants note", ControlKind::Text),
    ControlSpec::new(codes::ROOT_TREATMENT_Q, "Any root treatments?", ControlKind::Bool),
    ControlSpec::dependent(codes::ROOT_TREATMENT_NOTE, "Root treatment note", ControlKind::Text),
    ControlSpec::new(
        codes::GUM_CONDITION,
        "Condition of gums",
        ControlKind::Choice(CONDITION_VALUES),
    ),
    ControlSpec::dependent(codes::GUM_NOTE, "Gum condition note", ControlKind::Text),
    ControlSpec::new(codes::ORTHODONTICS_Q, "Orthodontic treatment?", ControlKind::Bool),
    ControlSpec::dependent(codes::ORTHODONTICS_NOTE, "Orthodontics note", ControlKind::Text),
    ControlSpec::optional(codes::REMARKS, "Further remarks", ControlKind::Text),
    ControlSpec::new(codes::CONSENT, "Consent to processing", ControlKind::Bool),
];

/// Repeatable medical-event sections.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    pub code: &'static str,
    pub label: &'static str,
}

pub const COLLECTION_SPECS: &[CollectionSpec] = &[
    CollectionSpec {
        code: codes::ILLNESSES_MED,
        label: "Illnesses treated with medication",
    },
    CollectionSpec {
        code: codes::ILLNESSES_ILL,
        label: "Prior illnesses",
    },
    CollectionSpec {
        code: codes::OPS_B_ITEMS,
        label: "Category B operations",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct ToggleSpec {
    pub code: &'static str,
    pub label: &'static str,
}

pub const TOGGLE_SPECS: &[ToggleSpec] = &[
    ToggleSpec {
        code: codes::MISSING_TEETH,
        label: "Missing teeth",
    },
    ToggleSpec {
        code: codes::TREATED_TEETH,
        label: "Treated teeth",
    },
];

/// Reference to one top-level entity, as listed in the step map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Control(&'static str),
    Collection(&'static str),
    Toggle(&'static str),
}

pub const STEP_COUNT: u8 = 22;

/// Entities belonging to each step, in the order validation walks them.
/// Governors precede their dependents so a UI walking the list top-down
/// always sees dependents in their post-gate state.
pub const STEP_MAP: [&[EntityRef]; STEP_COUNT as usize] = [
    // 1
    &[
        EntityRef::Control(codes::HEIGHT_CM),
        EntityRef::Control(codes::WEIGHT_KG),
    ],
    // 2
    &[
        EntityRef::Control(codes::MEDICATION),
        EntityRef::Control(codes::MED_NAME),
        EntityRef::Control(codes::MED_REASON),
        EntityRef::Collection(codes::ILLNESSES_MED),
    ],
    // 3
    &[
        EntityRef::Control(codes::ILLNESS_Q),
        EntityRef::Collection(codes::ILLNESSES_ILL),
    ],
    // 4
    &[
        EntityRef::Control(codes::OPS_Q),
        EntityRef::Control(codes::OPS_A),
        EntityRef::Control(codes::OPS_B),
        EntityRef::Collection(codes::OPS_B_ITEMS),
        EntityRef::Control(codes::OPS_C),
        EntityRef::Control(codes::OPS_D),
    ],
    // 5
    &[
        EntityRef::Control(codes::DOCTOR_FIRST_NAME),
        EntityRef::Control(codes::DOCTOR_LAST_NAME),
        EntityRef::Control(codes::DOCTOR_STREET),
        EntityRef::Control(codes::DOCTOR_NUMBER),
        EntityRef::Control(codes::DOCTOR_CITY),
    ],
    // 6
    &[EntityRef::Control(codes::REPORT_FILE)],
    // 7
    &[
        EntityRef::Control(codes::TEETH_CONDITION),
        EntityRef::Control(codes::TEETH_CONDITION_NOTE),
    ],
    // 8
    &[
        EntityRef::Control(codes::HYGIENE),
        EntityRef::Control(codes::HYGIENE_NOTE),
    ],
    // 9
    &[EntityRef::Control(codes::OCCLUSION)],
    // 10
    &[
        EntityRef::Control(codes::CROWNS_CONDITION),
        EntityRef::Control(codes::CROWNS_NOTE),
    ],
    // 11
    &[
        EntityRef::Control(codes::BRIDGES_CONDITION),
        EntityRef::Control(codes::BRIDGES_NOTE),
    ],
    // 12
    &[
        EntityRef::Control(codes::PARTIAL_DENTURES_CONDITION),
        EntityRef::Control(codes::PARTIAL_DENTURES_NOTE),
    ],
    // 13
    &[
        EntityRef::Control(codes::DENTITION),
        EntityRef::Control(codes::DENTITION_NOTE),
    ],
    // 14
    &[
        EntityRef::Control(codes::JAW),
        EntityRef::Control(codes::JAW_NOTE),
    ],
    // 15
    &[
        EntityRef::Control(codes::FUTURE_TEETH_DISEASE),
        EntityRef::Control(codes::FUTURE_TEETH_DISEASE_NOTE),
    ],
    // 16
    &[
        EntityRef::Control(codes::MISSING_TEETH_Q),
        EntityRef::Toggle(codes::MISSING_TEETH),
    ],
    // 17
    &[
        EntityRef::Control(codes::TREATED_TEETH_Q),
        EntityRef::Toggle(codes::TREATED_TEETH),
    ],
    // 18
    &[
        EntityRef::Control(codes::IMPLANTS_CONDITION),
        EntityRef::Control(codes::IMPLANTS_NOTE),
    ],
    // 19
    &[
        EntityRef::Control(codes::ROOT_TREATMENT_Q),
        EntityRef::Control(codes::ROOT_TREATMENT_NOTE),
    ],
    // 20
    &[
        EntityRef::Control(codes::GUM_CONDITION),
        EntityRef::Control(codes::GUM_NOTE),
    ],
    // 21
    &[
        EntityRef::Control(codes::ORTHODONTICS_Q),
        EntityRef::Control(codes::ORTHODONTICS_NOTE),
    ],
    // 22
    &[
        EntityRef::Control(codes::REMARKS),
        EntityRef::Control(codes::CONSENT),
    ],
];

static CONTROL_INDEX: Lazy<BTreeMap<&'static str, &'static ControlSpec>> =
    Lazy::new(|| CONTROL_SPECS.iter().map(|spec| (spec.code, spec)).collect());

pub fn control_spec(code: &str) -> Option<&'static ControlSpec> {
    CONTROL_INDEX.get(code).copied()
}

pub fn control_label<'a>(code: &'a str) -> &'a str {
    control_spec(code).map(|spec| spec.label).unwrap_or(code)
}

pub fn collection_label<'a>(code: &'a str) -> &'a str {
    COLLECTION_SPECS
        .iter()
        .find(|spec| spec.code == code)
        .map(|spec| spec.label)
        .unwrap_or(code)
}

pub fn toggle_label<'a>(code: &'a str) -> &'a str {
    TOGGLE_SPECS
        .iter()
        .find(|spec| spec.code == code)
        .map(|spec| spec.label)
        .unwrap_or(code)
}
