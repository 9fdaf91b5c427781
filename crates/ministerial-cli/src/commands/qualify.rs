//! Qualify command implementation.

use crate::cli::QualifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use ministerial_domain::{EntityStore, Part, StudentId};
use ministerial_pairing::PairingValidator;
use std::fmt::Display;

/// Execute the qualify command.
///
/// Returns whether the student may take the part.
pub async fn execute_qualify<S>(
    args: QualifyArgs,
    validator: &PairingValidator<S>,
    formatter: &Formatter,
) -> Result<bool>
where
    S: EntityStore,
    S::Error: Display,
{
    let student = StudentId::new(args.student);
    let part = Part::from(args.part);
    let decision = validator.check_qualification(&student, part).await;

    println!(
        "{}",
        formatter.format_qualification(&student, part, &decision)?
    );
    Ok(decision.qualified)
}
