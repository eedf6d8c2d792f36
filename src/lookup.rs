//! Postal-code lookup used by the practice address fields. The engine only
//! defines the collaborator seam and the suggestion formatting; where the
//! records come from (HTTP service, bundled table) is the host's concern.

use serde::{Deserialize, Serialize};

/// One resolved postal-code entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub zip_code: String,
    pub city: String,
    pub community: String,
}

impl LocationRecord {
    pub fn new(
        zip_code: impl Into<String>,
        city: impl Into<String>,
        community: impl Into<String>,
    ) -> Self {
        Self {
            zip_code: zip_code.into(),
            city: city.into(),
            community: community.into(),
        }
    }

    /// Suggestion label shown in the autocomplete list.
    pub fn label(&self) -> String {
        format!("{} {} [{}]", self.zip_code, self.city, self.community)
    }
}

/// Source of postal-code suggestions for a typed prefix.
pub trait LocationSource {
    fn suggest(&self, prefix: &str) -> Vec<LocationRecord>;
}

/// In-memory source backed by a fixed record table. Matches on zip-code
/// prefix or case-insensitive city prefix; empty input yields nothing.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationSource {
    records: Vec<LocationRecord>,
}

impl StaticLocationSource {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }
}

impl LocationSource for StaticLocationSource {
    fn suggest(&self, prefix: &str) -> Vec<LocationRecord> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Vec::new();
        }
        let lowered = prefix.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.zip_code.starts_with(prefix)
                    || record.city.to_lowercase().starts_with(&lowered)
            })
            .cloned()
            .collect()
    }
}
