//! Gatekeeper configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Configuration for validation rules
///
/// Age thresholds are whole years. A gap below a `*_min_gap` is an error,
/// a gap below the matching `*_warn_gap` is a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Enable age plausibility checks
    pub check_ages: bool,

    /// Enable consistency checks against stored and inferred relations
    pub check_consistency: bool,

    /// Enable gender coherence warnings for gendered labels
    pub check_gender: bool,

    /// Enable the parent count warning
    pub check_cardinality: bool,

    /// Minimum parent/child age gap
    pub parent_min_gap: i32,

    /// Parent/child gaps below this are unusual
    pub parent_warn_gap: i32,

    /// Minimum grandparent/grandchild age gap
    pub grandparent_min_gap: i32,

    /// Grandparent/grandchild gaps below this are unusual
    pub grandparent_warn_gap: i32,

    /// Minimum great-grandparent/great-grandchild age gap
    pub great_grandparent_min_gap: i32,

    /// Great-grandparent/great-grandchild gaps below this are unusual
    pub great_grandparent_warn_gap: i32,

    /// Minimum age of either spouse
    pub spouse_min_age: i32,

    /// Spouses younger than this are unusual
    pub spouse_warn_age: i32,

    /// Spouse age gaps above this are unusual
    pub spouse_gap_warning: i32,

    /// Sibling age gaps above this are unusual
    pub sibling_gap_warning: i32,

    /// Proposing a parent warns once a person already has this many
    pub max_parents_before_warning: usize,

    /// Date ages are measured on; today when unset
    pub reference_date: Option<NaiveDate>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_ages: true,
            check_consistency: true,
            check_gender: true,
            check_cardinality: true,
            parent_min_gap: 10,
            parent_warn_gap: 14,
            grandparent_min_gap: 20,
            grandparent_warn_gap: 30,
            great_grandparent_min_gap: 30,
            great_grandparent_warn_gap: 40,
            spouse_min_age: 12,
            spouse_warn_age: 18,
            spouse_gap_warning: 25,
            sibling_gap_warning: 25,
            max_parents_before_warning: 2,
            reference_date: None,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (hard floors only)
    ///
    /// Soft bands collapse onto the floors and the gender and cardinality
    /// checks are off.
    pub fn permissive() -> Self {
        Self {
            check_ages: true,
            check_consistency: true,
            check_gender: false,
            check_cardinality: false,
            parent_min_gap: 10,
            parent_warn_gap: 10,
            grandparent_min_gap: 20,
            grandparent_warn_gap: 20,
            great_grandparent_min_gap: 30,
            great_grandparent_warn_gap: 30,
            spouse_min_age: 12,
            spouse_warn_age: 12,
            spouse_gap_warning: i32::MAX,
            sibling_gap_warning: i32::MAX,
            max_parents_before_warning: 2,
            reference_date: None,
        }
    }

    /// Create a strict configuration (raised floors, narrower bands)
    pub fn strict() -> Self {
        Self {
            check_ages: true,
            check_consistency: true,
            check_gender: true,
            check_cardinality: true,
            parent_min_gap: 12,
            parent_warn_gap: 16,
            grandparent_min_gap: 26,
            grandparent_warn_gap: 34,
            great_grandparent_min_gap: 40,
            great_grandparent_warn_gap: 50,
            spouse_min_age: 16,
            spouse_warn_age: 18,
            spouse_gap_warning: 20,
            sibling_gap_warning: 20,
            max_parents_before_warning: 2,
            reference_date: None,
        }
    }

    /// The date ages are measured on
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
