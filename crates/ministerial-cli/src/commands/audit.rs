//! Audit command implementation.

use crate::cli::AuditArgs;
use crate::error::Result;
use crate::output::Formatter;
use ministerial_domain::EntityStore;
use ministerial_pairing::{PairAudit, PairingValidator, ProposedPair};
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Execute the audit command.
pub async fn execute_audit<S>(
    args: AuditArgs,
    validator: &PairingValidator<S>,
    formatter: &Formatter,
) -> Result<PairAudit>
where
    S: EntityStore,
    S::Error: Display,
{
    let pairs = read_pairs(&args.file)?;
    let audit = validator.audit_pairs(&pairs).await;
    println!("{}", formatter.format_audit(&audit)?);
    Ok(audit)
}

/// Read a JSON array of proposed pairs.
fn read_pairs(path: &Path) -> Result<Vec<ProposedPair>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
