//! Validation issues and verdicts

use kindred_domain::{EdgeId, Gender, PersonId, RelationType};
use std::fmt;

/// Kind of rule an issue comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Self-reference or duplicate edge
    Structural,
    /// Age-based checks
    Plausibility,
    /// Conflicts with relations the pair already holds
    Consistency,
    /// Gender coherence and cardinality
    Advisory,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueCategory::Structural => "structural",
            IssueCategory::Plausibility => "plausibility",
            IssueCategory::Consistency => "consistency",
            IssueCategory::Advisory => "advisory",
        };
        f.write_str(s)
    }
}

/// A single violated rule
///
/// Whether an issue blocks a write depends on the list it is reported in,
/// not on its variant: a `Conflict` with a relation inferred through a
/// spouse is a warning, one inferred along a blood line is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Declarer and related person are the same
    SelfReference {
        /// The person on both ends
        person: PersonId,
    },

    /// The pair already holds an edge with this effective type
    Duplicate {
        /// Existing stored edge
        existing: EdgeId,
        /// The duplicated type, from the declarer's side
        relation_type: RelationType,
    },

    /// The party on the ancestor side is not older
    NotOlder {
        /// Who should be older
        elder: PersonId,
        /// Who should be younger
        younger: PersonId,
        /// What `elder` would be to `younger`
        role: RelationType,
    },

    /// Generational age gap below the hard floor
    AgeGapTooSmall {
        /// What the older party would be to the younger one
        role: RelationType,
        /// Whole years between the birth dates
        gap: i32,
        /// Configured floor
        minimum: i32,
    },

    /// Generational age gap inside the soft band
    AgeGapUnusual {
        /// What the older party would be to the younger one
        role: RelationType,
        /// Whole years between the birth dates
        gap: i32,
        /// Gaps below this are unusual
        threshold: i32,
    },

    /// A spouse below the absolute minimum age
    SpouseTooYoung {
        /// The young party
        person: PersonId,
        /// Their age on the reference date
        age: i32,
        /// Configured minimum
        minimum: i32,
    },

    /// A spouse below the social-maturity age
    SpouseUnderage {
        /// The young party
        person: PersonId,
        /// Their age on the reference date
        age: i32,
        /// Configured threshold
        threshold: i32,
    },

    /// Same-generation age gap above the configured threshold
    LargeAgeGap {
        /// `Spouse` or `Sibling`
        relation_type: RelationType,
        /// Whole years between the birth dates
        gap: i32,
        /// Configured threshold
        threshold: i32,
    },

    /// The proposed type contradicts one the pair already holds
    Conflict {
        /// The proposed type
        proposed: RelationType,
        /// The type already present, from the declarer's side
        existing: RelationType,
        /// Whether `existing` was inferred rather than stored
        inferred: bool,
    },

    /// Gendered label disagrees with the recorded gender
    GenderMismatch {
        /// The related person
        person: PersonId,
        /// Label being assigned
        label: &'static str,
        /// Gender on record
        recorded: Gender,
    },

    /// Person already has the usual number of parents
    TooManyParents {
        /// The child side
        person: PersonId,
        /// Parents already recorded
        count: usize,
    },
}

impl ValidationIssue {
    /// Rule family this issue belongs to
    pub fn category(&self) -> IssueCategory {
        match self {
            ValidationIssue::SelfReference { .. } | ValidationIssue::Duplicate { .. } => {
                IssueCategory::Structural
            }
            ValidationIssue::NotOlder { .. }
            | ValidationIssue::AgeGapTooSmall { .. }
            | ValidationIssue::AgeGapUnusual { .. }
            | ValidationIssue::SpouseTooYoung { .. }
            | ValidationIssue::SpouseUnderage { .. }
            | ValidationIssue::LargeAgeGap { .. } => IssueCategory::Plausibility,
            ValidationIssue::Conflict { .. } => IssueCategory::Consistency,
            ValidationIssue::GenderMismatch { .. } | ValidationIssue::TooManyParents { .. } => {
                IssueCategory::Advisory
            }
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::SelfReference { person } => {
                write!(f, "{} cannot be related to themselves", person)
            }
            ValidationIssue::Duplicate {
                existing,
                relation_type,
            } => write!(
                f,
                "A '{}' relation already exists between these persons (edge {})",
                relation_type, existing
            ),
            ValidationIssue::NotOlder {
                elder,
                younger,
                role,
            } => write!(
                f,
                "{} cannot be the {} of {}: not older",
                elder, role, younger
            ),
            ValidationIssue::AgeGapTooSmall { role, gap, minimum } => write!(
                f,
                "Age gap of {} years is too small for a {}; at least {} required",
                gap, role, minimum
            ),
            ValidationIssue::AgeGapUnusual {
                role,
                gap,
                threshold,
            } => write!(
                f,
                "Age gap of {} years is unusually small for a {} (below {})",
                gap, role, threshold
            ),
            ValidationIssue::SpouseTooYoung {
                person,
                age,
                minimum,
            } => write!(
                f,
                "{} is {} years old, too young to be a spouse (minimum {})",
                person, age, minimum
            ),
            ValidationIssue::SpouseUnderage {
                person,
                age,
                threshold,
            } => write!(
                f,
                "{} is only {} years old (below {}); confirm this spouse relation",
                person, age, threshold
            ),
            ValidationIssue::LargeAgeGap {
                relation_type,
                gap,
                threshold,
            } => write!(
                f,
                "Age gap of {} years between {}s is unusual (above {})",
                gap, relation_type, threshold
            ),
            ValidationIssue::Conflict {
                proposed,
                existing,
                inferred,
            } => {
                write!(
                    f,
                    "'{}' conflicts with the existing '{}' relation between these persons",
                    proposed, existing
                )?;
                if *inferred {
                    write!(f, " (inferred)")?;
                }
                Ok(())
            }
            ValidationIssue::GenderMismatch {
                person,
                label,
                recorded,
            } => write!(
                f,
                "{} is recorded as {} but is being assigned as '{}'",
                person, recorded, label
            ),
            ValidationIssue::TooManyParents { person, count } => write!(
                f,
                "{} already has {} parents recorded",
                person, count
            ),
        }
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// No issues
    Accepted,

    /// Valid, but the caller should confirm before writing
    AcceptedWithWarnings,

    /// At least one error; must not be written
    Rejected,
}

/// Result of relationship validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Overall verdict
    pub status: ValidationStatus,

    /// Blocking issues
    pub errors: Vec<ValidationIssue>,

    /// Non-blocking issues that need confirmation
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub(crate) fn new(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        let status = if !errors.is_empty() {
            ValidationStatus::Rejected
        } else if !warnings.is_empty() {
            ValidationStatus::AcceptedWithWarnings
        } else {
            ValidationStatus::Accepted
        };
        Self {
            status,
            errors,
            warnings,
        }
    }

    /// No errors were found
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Valid but carrying warnings
    pub fn needs_confirmation(&self) -> bool {
        self.is_valid() && !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_lists() {
        let warning = ValidationIssue::TooManyParents {
            person: PersonId(1),
            count: 2,
        };
        let error = ValidationIssue::SelfReference {
            person: PersonId(1),
        };

        assert_eq!(
            ValidationResult::new(vec![], vec![]).status,
            ValidationStatus::Accepted
        );
        let warned = ValidationResult::new(vec![], vec![warning.clone()]);
        assert_eq!(warned.status, ValidationStatus::AcceptedWithWarnings);
        assert!(warned.is_valid() && warned.needs_confirmation());

        let rejected = ValidationResult::new(vec![error], vec![warning]);
        assert_eq!(rejected.status, ValidationStatus::Rejected);
        assert!(!rejected.is_valid() && !rejected.needs_confirmation());
    }

    #[test]
    fn test_categories() {
        let conflict = ValidationIssue::Conflict {
            proposed: RelationType::Spouse,
            existing: RelationType::Child,
            inferred: false,
        };
        assert_eq!(conflict.category(), IssueCategory::Consistency);
        assert_eq!(
            ValidationIssue::AgeGapUnusual {
                role: RelationType::Parent,
                gap: 12,
                threshold: 14
            }
            .category(),
            IssueCategory::Plausibility
        );
    }

    #[test]
    fn test_messages_name_the_types() {
        let conflict = ValidationIssue::Conflict {
            proposed: RelationType::Spouse,
            existing: RelationType::Sibling,
            inferred: true,
        };
        let text = conflict.to_string();
        assert!(text.contains("'spouse'"));
        assert!(text.contains("'sibling'"));
        assert!(text.ends_with("(inferred)"));
    }
}
