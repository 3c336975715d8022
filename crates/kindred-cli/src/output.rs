//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kindred_domain::{Person, PersonId};
use kindred_gatekeeper::{Admission, ValidationIssue, ValidationResult, ValidationStatus};
use kindred_graph::{FamilyCategory, FamilyGroups, InferredRelation, MemberSource};
use std::collections::HashMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Display names keyed by person id
pub type Names = HashMap<PersonId, String>;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the person register.
    pub fn format_persons(&self, persons: &[Person]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = persons
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "id": p.id.value(),
                            "full_name": p.full_name,
                            "birth_date": p.birth_date.map(|d| d.to_string()),
                            "gender": p.gender.as_str(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(persons
                .iter()
                .map(|p| p.id.value().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if persons.is_empty() {
                    return Ok(self.colorize("No persons found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Born", "Gender"]);
                for p in persons {
                    builder.push_record([
                        p.id.to_string(),
                        p.full_name.clone(),
                        p.birth_date.map(|d| d.to_string()).unwrap_or_default(),
                        p.gender.to_string(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a person's grouped family.
    pub fn format_family(&self, family: &FamilyGroups, names: &Names) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut json = serde_json::Map::new();
                for (category, members) in family.groups() {
                    let rows: Vec<serde_json::Value> = members
                        .iter()
                        .map(|m| {
                            let mut row = serde_json::json!({
                                "person": m.other.value(),
                                "name": name_of(names, m.other),
                                "relation_type": m.relation_type.as_str(),
                                "label": m.label,
                                "inferred": m.is_inferred(),
                            });
                            match &m.source {
                                MemberSource::Direct {
                                    edge_id,
                                    lives_together,
                                    is_primary_contact,
                                    notes,
                                } => {
                                    row["edge"] = edge_id.to_string().into();
                                    row["lives_together"] = (*lives_together).into();
                                    row["is_primary_contact"] = (*is_primary_contact).into();
                                    row["notes"] = notes.as_str().into();
                                }
                                MemberSource::Inferred { reason } => {
                                    row["reason"] = (*reason).into();
                                }
                            }
                            row
                        })
                        .collect();
                    json.insert(category_key(category).to_string(), rows.into());
                }
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(family
                .groups()
                .into_iter()
                .flat_map(|(_, members)| members.iter())
                .map(|m| m.other.value().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if family.is_empty() {
                    return Ok(self.colorize("No relatives found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Group", "ID", "Name", "Relation", "Source", "Detail"]);
                for (category, members) in family.groups() {
                    for m in members {
                        let (source, detail) = match &m.source {
                            MemberSource::Direct {
                                edge_id,
                                lives_together,
                                is_primary_contact,
                                ..
                            } => {
                                let mut detail = edge_id.to_string();
                                if *lives_together {
                                    detail.push_str(" household");
                                }
                                if *is_primary_contact {
                                    detail.push_str(" contact");
                                }
                                ("direct", detail)
                            }
                            MemberSource::Inferred { reason } => ("inferred", reason.to_string()),
                        };
                        builder.push_record([
                            category_title(category).to_string(),
                            m.other.to_string(),
                            name_of(names, m.other).to_string(),
                            m.label.to_string(),
                            source.to_string(),
                            detail,
                        ]);
                    }
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format inferred relations only.
    pub fn format_inferred(&self, inferred: &[InferredRelation], names: &Names) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = inferred
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "person": r.other.value(),
                            "name": name_of(names, r.other),
                            "relation_type": r.relation_type.as_str(),
                            "label": r.label,
                            "reason": r.reason,
                            "by_marriage": r.by_marriage,
                            "inferred": r.inferred,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(inferred
                .iter()
                .map(|r| r.other.value().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if inferred.is_empty() {
                    return Ok(self.colorize("Nothing to infer.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Relation", "Reason"]);
                for r in inferred {
                    builder.push_record([
                        r.other.to_string(),
                        name_of(names, r.other).to_string(),
                        r.label.to_string(),
                        r.reason.to_string(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a validation verdict.
    pub fn format_validation(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&validation_json(result))?),
            OutputFormat::Quiet => Ok(status_key(result.status).to_string()),
            OutputFormat::Table => {
                let mut lines = self.issue_lines(result);
                lines.push(match result.status {
                    ValidationStatus::Accepted => self.success("Relation is valid"),
                    ValidationStatus::AcceptedWithWarnings => {
                        self.warning("Relation is valid but needs confirmation")
                    }
                    ValidationStatus::Rejected => self.error("Relation is not valid"),
                });
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the outcome of a validated write.
    pub fn format_admission(&self, admission: &Admission) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut json = validation_json(admission.result());
                json["recorded"] = admission.is_recorded().into();
                if let Admission::Recorded { edge_id, .. } = admission {
                    json["edge"] = edge_id.to_string().into();
                }
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(match admission {
                Admission::Recorded { edge_id, .. } => edge_id.to_string(),
                _ => String::new(),
            }),
            OutputFormat::Table => {
                let mut lines = self.issue_lines(admission.result());
                lines.push(match admission {
                    Admission::Recorded { edge_id, .. } => {
                        self.success(&format!("Relation recorded: {}", edge_id))
                    }
                    Admission::NeedsConfirmation(_) => {
                        self.info("Nothing written; re-run with --yes to confirm")
                    }
                    Admission::Rejected(_) => self.error("Nothing written"),
                });
                Ok(lines.join("\n"))
            }
        }
    }

    fn issue_lines(&self, result: &ValidationResult) -> Vec<String> {
        let errors = result.errors.iter().map(|i| self.error(&issue_text(i)));
        let warnings = result.warnings.iter().map(|i| self.warning(&issue_text(i)));
        errors.chain(warnings).collect()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} relation(s)", operation, count))
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn name_of(names: &Names, id: PersonId) -> &str {
    names.get(&id).map(String::as_str).unwrap_or("")
}

fn issue_text(issue: &ValidationIssue) -> String {
    format!("[{}] {}", issue.category(), issue)
}

fn category_key(category: FamilyCategory) -> &'static str {
    match category {
        FamilyCategory::Nuclear => "nuclear",
        FamilyCategory::Origin => "origin",
        FamilyCategory::Extended => "extended",
        FamilyCategory::InLaw => "in_law",
    }
}

fn category_title(category: FamilyCategory) -> &'static str {
    match category {
        FamilyCategory::Nuclear => "Nuclear",
        FamilyCategory::Origin => "Origin",
        FamilyCategory::Extended => "Extended",
        FamilyCategory::InLaw => "In-law",
    }
}

fn status_key(status: ValidationStatus) -> &'static str {
    match status {
        ValidationStatus::Accepted => "accepted",
        ValidationStatus::AcceptedWithWarnings => "accepted_with_warnings",
        ValidationStatus::Rejected => "rejected",
    }
}

fn validation_json(result: &ValidationResult) -> serde_json::Value {
    let issues = |list: &[ValidationIssue]| -> Vec<serde_json::Value> {
        list.iter()
            .map(|i| {
                serde_json::json!({
                    "category": i.category().to_string(),
                    "message": i.to_string(),
                })
            })
            .collect()
    };
    serde_json::json!({
        "valid": result.is_valid(),
        "status": status_key(result.status),
        "errors": issues(&result.errors),
        "warnings": issues(&result.warnings),
    })
}
