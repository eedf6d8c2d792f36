#![doc(test(attr(deny(warnings))))]

//! Anamnesis Core models a branching health questionnaire: typed form
//! fields, repeatable medical-event records, conditional enable/disable
//! rules, and the 22-step wizard that gates navigation and serializes the
//! final submission payload.

pub mod cli;
pub mod errors;
pub mod form;
pub mod lookup;
pub mod payload;
pub mod rules;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Anamnesis Core tracing initialized.");
    });
}
