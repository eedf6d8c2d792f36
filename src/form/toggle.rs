use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;

/// Fixed tooth-chart layout in FDI notation: upper arch right-to-left, then
/// lower arch left-to-right, the order the chart is painted in. Membership
/// lives in the [`ToggleSet`]; this catalog only fixes display and
/// serialization order.
pub const TOOTH_CHART: [&str; 32] = [
    "18", "17", "16", "15", "14", "13", "12", "11", // upper right
    "21", "22", "23", "24", "25", "26", "27", "28", // upper left
    "38", "37", "36", "35", "34", "33", "32", "31", // lower left
    "41", "42", "43", "44", "45", "46", "47", "48", // lower right
];

static TOOTH_POSITION: Lazy<BTreeMap<&'static str, usize>> = Lazy::new(|| {
    TOOTH_CHART
        .iter()
        .enumerate()
        .map(|(position, code)| (*code, position))
        .collect()
});

/// Position of a tooth code in the chart, if it is a known code.
pub fn catalog_position(code: &str) -> Option<usize> {
    TOOTH_POSITION.get(code).copied()
}

/// A set of selectable codes toggled on and off. Carries no intrinsic
/// validation rule; "must select at least one" policies are expressed by a
/// governing boolean question at the step level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSet {
    code: &'static str,
    selected: BTreeSet<String>,
    enabled: bool,
}

impl ToggleSet {
    pub fn new(code: &'static str) -> Self {
        Self {
            code,
            selected: BTreeSet::new(),
            enabled: false,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn contains(&self, code: &str) -> bool {
        self.selected.contains(code)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Removes the code if present, inserts it otherwise. No-op while the
    /// governing question keeps the set disabled.
    pub fn toggle(&mut self, code: &str) {
        if !self.enabled {
            return;
        }
        if !self.selected.remove(code) {
            self.selected.insert(code.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected codes in catalog order; codes outside the catalog sort last
    /// in lexical order.
    pub fn selected_in_catalog_order(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.selected.iter().map(String::as_str).collect();
        codes.sort_by_key(|code| (catalog_position(code).unwrap_or(usize::MAX), code.to_string()));
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut set = ToggleSet::new("missingTeeth");
        set.set_enabled(true);
        set.toggle("36");
        assert!(set.contains("36"));
        set.toggle("36");
        assert!(!set.contains("36"));
    }

    #[test]
    fn disabled_set_ignores_toggles() {
        let mut set = ToggleSet::new("missingTeeth");
        set.toggle("11");
        assert!(set.is_empty());
    }

    #[test]
    fn serialization_order_follows_catalog_not_insertion() {
        let mut set = ToggleSet::new("treatedTeeth");
        set.set_enabled(true);
        set.toggle("41");
        set.toggle("18");
        set.toggle("26");
        assert_eq!(set.selected_in_catalog_order(), vec!["18", "26", "41"]);
    }
}
