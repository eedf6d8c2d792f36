//! Form domain model: typed fields, record collections, toggle charts, and
//! the root aggregate the rule engine and wizard operate on.

pub mod active;
pub mod field;
pub mod file;
pub mod model;
pub mod record;
pub mod registry;
pub mod toggle;

pub use active::FieldRef;
pub use field::{Field, FieldValue, ValidationRule};
pub use file::{FileGate, FileHandle, PdfGate};
pub use model::FormModel;
pub use record::{AppendOutcome, RecordCollection, RecordField, RecordGroup};
pub use registry::{ControlKind, ControlSpec, EntityRef, STEP_COUNT, STEP_MAP};
pub use toggle::{ToggleSet, TOOTH_CHART};
