//! Interactive questionnaire shell: walks the 22 steps, prompting only for
//! entities the rule engine currently has enabled, and prints the flat
//! submission payload on completion.

use dialoguer::theme::ColorfulTheme;

use crate::cli::{io, output, CliError};
use crate::form::field::FieldValue;
use crate::form::file::FileHandle;
use crate::form::model::FormModel;
use crate::form::record::RecordField;
use crate::form::registry::{
    collection_label, control_label, control_spec, toggle_label, ControlKind, EntityRef,
    STEP_COUNT,
};
use crate::form::toggle::TOOTH_CHART;
use crate::form::FieldRef;
use crate::lookup::{LocationRecord, LocationSource, StaticLocationSource};
use crate::wizard::{NextOutcome, Wizard};

pub fn run_cli() -> Result<(), CliError> {
    crate::init();
    print_banner();

    let theme = ColorfulTheme::default();
    let locations = seed_locations();
    let mut wizard = Wizard::new();

    loop {
        output::section(format!(
            "Step {} of {}",
            wizard.current_step(),
            STEP_COUNT
        ));
        run_step(&mut wizard, &theme, &locations)?;

        match wizard.next() {
            NextOutcome::Advanced(_) => {}
            NextOutcome::Blocked(target) => {
                io::print_warning(format!("Please complete: {}", describe(target)));
            }
            NextOutcome::Finished(payload) => {
                io::print_success("Questionnaire complete.");
                println!("{}", payload.to_json_pretty()?);
                return Ok(());
            }
        }
    }
}

fn print_banner() {
    io::print_info(format!(
        "Anamnesis questionnaire ({} {}{}, {})",
        env!("ANAMNESIS_CORE_BUILD_PROFILE"),
        env!("ANAMNESIS_CORE_BUILD_HASH"),
        match env!("ANAMNESIS_CORE_BUILD_STATUS") {
            "dirty" => "+",
            _ => "",
        },
        env!("ANAMNESIS_CORE_BUILD_TIMESTAMP"),
    ));
}

/// Bundled postal-code table for the address autocomplete. A deployment
/// wanting live data swaps in its own [`LocationSource`].
fn seed_locations() -> StaticLocationSource {
    StaticLocationSource::new(vec![
        LocationRecord::new("8001", "Zürich", "Zürich"),
        LocationRecord::new("3011", "Bern", "Bern"),
        LocationRecord::new("4051", "Basel", "Basel-Stadt"),
        LocationRecord::new("6003", "Luzern", "Luzern"),
    ])
}

fn run_step(
    wizard: &mut Wizard,
    theme: &ColorfulTheme,
    locations: &dyn LocationSource,
) -> Result<(), CliError> {
    for entity in FormModel::step_entities(wizard.current_step()).iter().copied() {
        match entity {
            EntityRef::Control(code) => prompt_control(wizard, theme, locations, code)?,
            EntityRef::Collection(code) => prompt_collection(wizard, theme, code)?,
            EntityRef::Toggle(code) => prompt_toggle(wizard, theme, code)?,
        }
    }
    Ok(())
}

fn prompt_control(
    wizard: &mut Wizard,
    theme: &ColorfulTheme,
    locations: &dyn LocationSource,
    code: &str,
) -> Result<(), CliError> {
    let Some(spec) = control_spec(code) else {
        return Ok(());
    };
    let enabled = wizard
        .model()
        .control(code)
        .map(|field| field.is_enabled())
        .unwrap_or(false);
    if !enabled {
        return Ok(());
    }

    match spec.kind {
        ControlKind::Number { .. } => {
            let number = io::prompt_number(theme, spec.label)?;
            wizard.set_value(code, FieldValue::Number(Some(number)))?;
        }
        ControlKind::Bool => {
            let flag = io::confirm(theme, spec.label)?;
            wizard.set_value(code, FieldValue::Bool(Some(flag)))?;
        }
        ControlKind::Choice(values) => {
            let choice = io::prompt_choice(theme, spec.label, values)?;
            wizard.set_value(code, FieldValue::Choice(Some(choice)))?;
        }
        ControlKind::Text => {
            let mut text = io::prompt_text(theme, spec.label)?;
            if code == crate::form::registry::codes::DOCTOR_CITY {
                let suggestions = locations.suggest(&text);
                if !suggestions.is_empty() {
                    let labels: Vec<String> =
                        suggestions.iter().map(LocationRecord::label).collect();
                    let index = io::prompt_index(theme, "Did you mean", &labels)?;
                    text = labels[index].clone();
                }
            }
            wizard.set_value(code, FieldValue::Text(text))?;
        }
        ControlKind::File => {
            let name = io::prompt_text(theme, spec.label)?;
            if name.trim().is_empty() {
                return Ok(());
            }
            let mime = if name.trim().to_lowercase().ends_with(".pdf") {
                "application/pdf"
            } else {
                "application/octet-stream"
            };
            if !wizard.attach_report(FileHandle::new(name.trim(), mime))? {
                io::print_warning("Only PDF files are accepted.");
            }
        }
    }
    Ok(())
}

fn prompt_collection(
    wizard: &mut Wizard,
    theme: &ColorfulTheme,
    code: &str,
) -> Result<(), CliError> {
    let enabled = wizard
        .model()
        .collection(code)
        .map(|col| col.is_enabled())
        .unwrap_or(false);
    if !enabled {
        return Ok(());
    }

    io::print_info(collection_label(code));
    let mut index = wizard.model().groups_of(code).len() - 1;
    loop {
        prompt_group(wizard, theme, code, index)?;
        if !wizard.can_append(code) || !io::confirm(theme, "Add another record?")? {
            return Ok(());
        }
        wizard.append_record(code)?;
        wizard.apply_pending_focus();
        index += 1;
    }
}

fn prompt_group(
    wizard: &mut Wizard,
    theme: &ColorfulTheme,
    code: &str,
    index: usize,
) -> Result<(), CliError> {
    for record_field in RecordField::ALL {
        let value = match record_field {
            RecordField::Desc => FieldValue::Text(io::prompt_text(theme, "Description")?),
            RecordField::StartDate => {
                FieldValue::Date(Some(io::prompt_date(theme, "Start date")?))
            }
            RecordField::EndDate => FieldValue::Date(Some(io::prompt_date(theme, "End date")?)),
            RecordField::Operated => FieldValue::Bool(Some(io::confirm(theme, "Operated?")?)),
            RecordField::TreatmentDone => {
                FieldValue::Bool(Some(io::confirm(theme, "Treatment completed?")?))
            }
            _ => FieldValue::Text(io::prompt_text(theme, record_field.code())?),
        };
        wizard.set_group_value(code, index, record_field, value)?;
    }
    Ok(())
}

fn prompt_toggle(wizard: &mut Wizard, theme: &ColorfulTheme, code: &str) -> Result<(), CliError> {
    let enabled = wizard
        .model()
        .toggle_set(code)
        .map(|set| set.is_enabled())
        .unwrap_or(false);
    if !enabled {
        return Ok(());
    }

    for tooth in io::prompt_multi(theme, toggle_label(code), TOOTH_CHART.as_slice())? {
        wizard.toggle(code, &tooth)?;
    }
    Ok(())
}

fn describe(target: FieldRef) -> String {
    match target {
        FieldRef::Control(code) => control_label(code).to_string(),
        FieldRef::GroupField {
            collection,
            index,
            field,
        } => format!(
            "{}, record {}, {}",
            collection_label(collection),
            index + 1,
            field.code()
        ),
        FieldRef::Toggle(code) => toggle_label(code).to_string(),
    }
}
