//! Relationship validation logic

use crate::issue::{ValidationIssue, ValidationResult};
use crate::rules::conflicts;
use crate::view::WithoutEdge;
use crate::{GatekeeperError, ValidationConfig};
use kindred_domain::{
    completed_years, EdgeId, EdgeStore, FamilyGraph, Gender, Person, PersonId, RelationEdge,
    RelationLabel, RelationType,
};
use kindred_graph::{direct_relations, infer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// Outcome of a validated write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The edge was written
    Recorded {
        /// Id of the written edge
        edge_id: EdgeId,
        /// Verdict the write was based on (may carry confirmed warnings)
        result: ValidationResult,
    },

    /// Valid, but warnings were not confirmed; nothing written
    NeedsConfirmation(ValidationResult),

    /// At least one error; nothing written
    Rejected(ValidationResult),
}

impl Admission {
    /// The verdict behind this outcome
    pub fn result(&self) -> &ValidationResult {
        match self {
            Admission::Recorded { result, .. } => result,
            Admission::NeedsConfirmation(result) | Admission::Rejected(result) => result,
        }
    }

    /// Whether the edge was written
    pub fn is_recorded(&self) -> bool {
        matches!(self, Admission::Recorded { .. })
    }
}

/// The Gatekeeper validates relation edges before storage
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a proposed relation against the configured rules
    ///
    /// # Arguments
    ///
    /// * `graph` - Stored edges and person records; never written
    /// * `declarer` - Who states the relation
    /// * `related` - Who the relation is about
    /// * `proposal` - What `related` would be to `declarer`, possibly gendered
    /// * `existing_edge` - The edge being edited, ignored by every check
    ///
    /// # Returns
    ///
    /// A verdict with separate error and warning lists. Self-reference and
    /// duplicates stop further checks.
    ///
    /// # Errors
    ///
    /// Fails when the store cannot be read or a person id does not resolve.
    pub fn validate<G>(
        &self,
        graph: &G,
        declarer: PersonId,
        related: PersonId,
        proposal: RelationLabel,
        existing_edge: Option<EdgeId>,
    ) -> Result<ValidationResult, GatekeeperError>
    where
        G: FamilyGraph,
        G::Error: Display,
    {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let proposed = proposal.relation_type;

        // 1. Self-reference
        if declarer == related {
            errors.push(ValidationIssue::SelfReference { person: declarer });
            return Ok(ValidationResult::new(errors, warnings));
        }

        let view = WithoutEdge::new(graph, existing_edge);
        let declarer_person = lookup(&view, declarer)?;
        let related_person = lookup(&view, related)?;

        // 2. Duplicate
        let stored: Vec<(EdgeId, RelationType)> = view
            .edges_between(declarer, related)
            .map_err(GatekeeperError::store)?
            .iter()
            .filter_map(|edge| edge.type_seen_by(declarer).map(|t| (edge.id, t)))
            .collect();

        if let Some((existing, _)) = stored.iter().find(|(_, t)| *t == proposed) {
            errors.push(ValidationIssue::Duplicate {
                existing: *existing,
                relation_type: proposed,
            });
            return Ok(ValidationResult::new(errors, warnings));
        }

        // 3. Age plausibility
        if self.config.check_ages {
            self.check_ages(
                &declarer_person,
                &related_person,
                proposed,
                &mut errors,
                &mut warnings,
            );
        }

        // 4. Consistency
        if self.config.check_consistency {
            let stored_types: BTreeSet<RelationType> = stored.iter().map(|(_, t)| *t).collect();
            for &existing in &stored_types {
                if conflicts(proposed, existing) {
                    errors.push(ValidationIssue::Conflict {
                        proposed,
                        existing,
                        inferred: false,
                    });
                }
            }

            // Blood-line inferences block; those reached through a spouse only warn
            let inferred_types: BTreeMap<RelationType, bool> = infer(&view, declarer)?
                .into_iter()
                .filter(|r| r.other == related)
                .map(|r| (r.relation_type, r.by_marriage))
                .collect();
            for (existing, by_marriage) in inferred_types {
                if conflicts(proposed, existing) {
                    let issue = ValidationIssue::Conflict {
                        proposed,
                        existing,
                        inferred: true,
                    };
                    if by_marriage {
                        warnings.push(issue);
                    } else {
                        errors.push(issue);
                    }
                }
            }
        }

        // 5. Gender coherence
        if self.config.check_gender {
            if let Some(expected) = proposal.expected_gender {
                let recorded = related_person.gender;
                if recorded.is_known() && recorded != expected {
                    warnings.push(ValidationIssue::GenderMismatch {
                        person: related,
                        label: proposal.text(),
                        recorded,
                    });
                }
            }
        }

        // 6. Cardinality
        if self.config.check_cardinality {
            let child = match proposed {
                RelationType::Parent => Some(declarer),
                RelationType::Child => Some(related),
                _ => None,
            };
            if let Some(child) = child {
                let count = direct_relations(&view, child)?.parents.len();
                if count >= self.config.max_parents_before_warning {
                    warnings.push(ValidationIssue::TooManyParents {
                        person: child,
                        count,
                    });
                }
            }
        }

        let result = ValidationResult::new(errors, warnings);
        tracing::debug!(
            declarer = %declarer,
            related = %related,
            relation_type = %proposed,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated relation"
        );

        Ok(result)
    }

    fn check_ages(
        &self,
        declarer: &Person,
        related: &Person,
        proposed: RelationType,
        errors: &mut Vec<ValidationIssue>,
        warnings: &mut Vec<ValidationIssue>,
    ) {
        match proposed {
            RelationType::Parent
            | RelationType::Child
            | RelationType::Grandparent
            | RelationType::Grandchild
            | RelationType::GreatGrandparent
            | RelationType::GreatGrandchild => {
                self.check_generation_gap(declarer, related, proposed, errors, warnings)
            }
            RelationType::Spouse => self.check_spouses(declarer, related, errors, warnings),
            RelationType::Sibling => {
                if let Some(gap) = age_gap(declarer, related) {
                    if gap > self.config.sibling_gap_warning {
                        warnings.push(ValidationIssue::LargeAgeGap {
                            relation_type: RelationType::Sibling,
                            gap,
                            threshold: self.config.sibling_gap_warning,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    /// Lineal types: the ancestor side must be older by the configured gap
    fn check_generation_gap(
        &self,
        declarer: &Person,
        related: &Person,
        proposed: RelationType,
        errors: &mut Vec<ValidationIssue>,
        warnings: &mut Vec<ValidationIssue>,
    ) {
        let (elder, younger, role) = if proposed.generation() > 0 {
            (related, declarer, proposed)
        } else {
            (declarer, related, proposed.inverse())
        };
        let (Some(elder_born), Some(younger_born)) = (elder.birth_date, younger.birth_date) else {
            return;
        };

        let (minimum, threshold) = match role {
            RelationType::Parent => (self.config.parent_min_gap, self.config.parent_warn_gap),
            RelationType::Grandparent => (
                self.config.grandparent_min_gap,
                self.config.grandparent_warn_gap,
            ),
            _ => (
                self.config.great_grandparent_min_gap,
                self.config.great_grandparent_warn_gap,
            ),
        };

        if elder_born >= younger_born {
            errors.push(ValidationIssue::NotOlder {
                elder: elder.id,
                younger: younger.id,
                role,
            });
            return;
        }

        let gap = completed_years(elder_born, younger_born);
        if gap < minimum {
            errors.push(ValidationIssue::AgeGapTooSmall { role, gap, minimum });
        } else if gap < threshold {
            warnings.push(ValidationIssue::AgeGapUnusual {
                role,
                gap,
                threshold,
            });
        }
    }

    fn check_spouses(
        &self,
        declarer: &Person,
        related: &Person,
        errors: &mut Vec<ValidationIssue>,
        warnings: &mut Vec<ValidationIssue>,
    ) {
        let today = self.config.today();
        for person in [declarer, related] {
            let Some(age) = person.age_on(today) else {
                continue;
            };
            if age < self.config.spouse_min_age {
                errors.push(ValidationIssue::SpouseTooYoung {
                    person: person.id,
                    age,
                    minimum: self.config.spouse_min_age,
                });
            } else if age < self.config.spouse_warn_age {
                warnings.push(ValidationIssue::SpouseUnderage {
                    person: person.id,
                    age,
                    threshold: self.config.spouse_warn_age,
                });
            }
        }

        if let Some(gap) = age_gap(declarer, related) {
            if gap > self.config.spouse_gap_warning {
                warnings.push(ValidationIssue::LargeAgeGap {
                    relation_type: RelationType::Spouse,
                    gap,
                    threshold: self.config.spouse_gap_warning,
                });
            }
        }
    }

    /// Validate a new edge and insert it if allowed
    ///
    /// Writes only when there are no errors, and either no warnings or
    /// `confirm` is set.
    pub fn admit<S>(
        &self,
        store: &mut S,
        edge: RelationEdge,
        expected_gender: Option<Gender>,
        confirm: bool,
    ) -> Result<Admission, GatekeeperError>
    where
        S: EdgeStore,
        S::Error: Display,
    {
        let proposal = RelationLabel {
            relation_type: edge.relation_type,
            expected_gender,
        };
        let result = self.validate(&*store, edge.declarer_id, edge.related_id, proposal, None)?;

        if !result.is_valid() {
            tracing::warn!(
                declarer = %edge.declarer_id,
                related = %edge.related_id,
                errors = result.errors.len(),
                "relation rejected"
            );
            return Ok(Admission::Rejected(result));
        }
        if result.needs_confirmation() && !confirm {
            return Ok(Admission::NeedsConfirmation(result));
        }

        let edge_id = store.insert_edge(edge).map_err(GatekeeperError::store)?;
        tracing::info!(edge = %edge_id, warnings = result.warnings.len(), "relation recorded");

        Ok(Admission::Recorded { edge_id, result })
    }

    /// Validate changes to a stored edge and apply them if allowed
    ///
    /// The endpoints of a stored edge are fixed; only its type, flags and
    /// notes are taken from `edge`. The stored edge itself is excluded from
    /// every check.
    pub fn amend<S>(
        &self,
        store: &mut S,
        edge: RelationEdge,
        expected_gender: Option<Gender>,
        confirm: bool,
    ) -> Result<Admission, GatekeeperError>
    where
        S: EdgeStore,
        S::Error: Display,
    {
        let stored = store
            .edge(edge.id)
            .map_err(GatekeeperError::store)?
            .ok_or(GatekeeperError::UnknownEdge(edge.id))?;
        let edge = RelationEdge {
            declarer_id: stored.declarer_id,
            related_id: stored.related_id,
            created_at: stored.created_at,
            ..edge
        };

        let proposal = RelationLabel {
            relation_type: edge.relation_type,
            expected_gender,
        };
        let result = self.validate(
            &*store,
            edge.declarer_id,
            edge.related_id,
            proposal,
            Some(edge.id),
        )?;

        if !result.is_valid() {
            tracing::warn!(
                edge = %edge.id,
                errors = result.errors.len(),
                "relation change rejected"
            );
            return Ok(Admission::Rejected(result));
        }
        if result.needs_confirmation() && !confirm {
            return Ok(Admission::NeedsConfirmation(result));
        }

        store.update_edge(&edge).map_err(GatekeeperError::store)?;
        tracing::info!(edge = %edge.id, relation_type = %edge.relation_type, "relation amended");

        Ok(Admission::Recorded {
            edge_id: edge.id,
            result,
        })
    }
}

fn lookup<G>(graph: &G, id: PersonId) -> Result<Person, GatekeeperError>
where
    G: FamilyGraph,
    G::Error: Display,
{
    graph
        .person(id)
        .map_err(GatekeeperError::store)?
        .ok_or(GatekeeperError::UnknownPerson(id))
}

/// Whole years between two birth dates, when both are known
fn age_gap(a: &Person, b: &Person) -> Option<i32> {
    match (a.birth_date, b.birth_date) {
        (Some(a), Some(b)) => Some(completed_years(a, b).abs()),
        _ => None,
    }
}
