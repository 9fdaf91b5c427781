//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use ministerial_domain::{Part, PairingDecision, StudentId};
use ministerial_pairing::{
    AuditedPair, CacheStats, CandidateResolution, PairAudit, QualificationDecision,
};
use std::collections::HashSet;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

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

    /// Format a single pairing decision.
    pub fn format_decision(&self, pair: &AuditedPair) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(pair)?),
            OutputFormat::Quiet => Ok(verdict(pair.decision.valid).to_string()),
            OutputFormat::Table => {
                let decision = &pair.decision;
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Pair", &format!("{} + {}", pair.pair.a, pair.pair.b)]);
                builder.push_record(["Verdict", &self.verdict(decision.valid)]);
                builder.push_record(["Reason", &decision.reason]);
                builder.push_record(["Relationship", relationship(decision)]);
                builder.push_record(["Detail", decision.detail.as_deref().unwrap_or("-")]);
                Ok(self.render(builder))
            }
        }
    }

    /// Format candidate resolution, listing candidates in `order`.
    pub fn format_resolution(
        &self,
        resolution: &CandidateResolution,
        order: &[StudentId],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(resolution)?),
            OutputFormat::Quiet => Ok(join_ids(&resolution.all_valid)),
            OutputFormat::Table => {
                if resolution.decisions.is_empty() {
                    return Ok(self.colorize("No candidates evaluated.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Candidate", "Verdict", "Relationship", "Reason"]);

                let mut seen = HashSet::new();
                for id in order {
                    let Some(decision) = resolution.decisions.get(id) else {
                        continue;
                    };
                    if !seen.insert(id) {
                        continue;
                    }
                    builder.push_record([
                        id.as_str(),
                        &self.verdict(decision.valid),
                        relationship(decision),
                        &decision.reason,
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a batch audit.
    pub fn format_audit(&self, audit: &PairAudit) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(audit)?),
            OutputFormat::Quiet => Ok(audit
                .invalid
                .iter()
                .map(|p| format!("{} {}", p.pair.a, p.pair.b))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if audit.valid.is_empty() && audit.invalid.is_empty() {
                    return Ok(self.colorize("No pairs to audit.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["A", "B", "Verdict", "Reason"]);
                for pair in audit.invalid.iter().chain(&audit.valid) {
                    builder.push_record([
                        pair.pair.a.as_str(),
                        pair.pair.b.as_str(),
                        &self.verdict(pair.decision.valid),
                        &pair.decision.reason,
                    ]);
                }

                Ok(format!(
                    "{}\n{}",
                    self.render(builder),
                    self.audit_summary(audit)
                ))
            }
        }
    }

    /// Format a qualification decision.
    pub fn format_qualification(
        &self,
        student: &StudentId,
        part: Part,
        decision: &QualificationDecision,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "student": student,
                "part": part,
                "qualified": decision.qualified,
                "reason": decision.reason,
            }))?),
            OutputFormat::Quiet => Ok(if decision.qualified {
                "qualified".to_string()
            } else {
                "not qualified".to_string()
            }),
            OutputFormat::Table => {
                let line = format!("{} / {}: {}", student, part.as_str(), decision.reason);
                Ok(if decision.qualified {
                    self.success(&line)
                } else {
                    self.error(&line)
                })
            }
        }
    }

    /// Format cache statistics.
    pub fn format_stats(&self, stats: &CacheStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Quiet => Ok(format!(
                "{} {}",
                stats.student_count, stats.family_link_count
            )),
            OutputFormat::Table => Ok(stats.summary()),
        }
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

    /// Whether output is meant for a human rather than a script.
    pub fn is_interactive(&self) -> bool {
        matches!(self.format, OutputFormat::Table)
    }

    fn audit_summary(&self, audit: &PairAudit) -> String {
        let msg = format!(
            "{} valid, {} invalid",
            audit.valid.len(),
            audit.invalid.len()
        );
        if audit.is_clean() {
            self.success(&msg)
        } else {
            self.warning(&msg)
        }
    }

    fn verdict(&self, valid: bool) -> String {
        if valid {
            self.colorize(verdict(valid), "green")
        } else {
            self.colorize(verdict(valid), "red")
        }
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

fn verdict(valid: bool) -> &'static str {
    if valid {
        "valid"
    } else {
        "invalid"
    }
}

fn relationship(decision: &PairingDecision) -> &'static str {
    decision
        .relationship_type
        .map(|t| t.as_str())
        .unwrap_or("-")
}

fn join_ids(ids: &[StudentId]) -> String {
    ids.iter()
        .map(StudentId::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
