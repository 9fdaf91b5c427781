//! Candidates command implementation.

use crate::cli::CandidatesArgs;
use crate::error::Result;
use crate::output::Formatter;
use ministerial_domain::{EntityStore, StudentId};
use ministerial_pairing::{CandidateResolution, PairingValidator};
use std::fmt::Display;

/// Execute the candidates command.
pub async fn execute_candidates<S>(
    args: CandidatesArgs,
    validator: &PairingValidator<S>,
    formatter: &Formatter,
) -> Result<CandidateResolution>
where
    S: EntityStore,
    S::Error: Display,
{
    let principal = StudentId::new(args.principal);
    let candidates: Vec<StudentId> = args.candidates.into_iter().map(StudentId::new).collect();
    let exclude: Vec<StudentId> = args.exclude.into_iter().map(StudentId::new).collect();

    let resolution = validator
        .resolve_candidates(&principal, &candidates, &exclude)
        .await;

    println!("{}", formatter.format_resolution(&resolution, &candidates)?);
    if formatter.is_interactive() {
        println!(
            "{}",
            formatter.info(&format!(
                "{} of {} candidate(s) eligible for {}, {} through family",
                resolution.all_valid.len(),
                resolution.decisions.len(),
                principal,
                resolution.family_verified.len()
            ))
        );
    }

    Ok(resolution)
}
