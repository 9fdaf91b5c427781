//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use ministerial_domain::EntityStore;
use ministerial_pairing::{AuditedPair, PairingValidator, ProposedPair};
use std::fmt::Display;

/// Execute the validate command.
///
/// Returns whether the pair may share an assignment.
pub async fn execute_validate<S>(
    args: ValidateArgs,
    validator: &PairingValidator<S>,
    formatter: &Formatter,
) -> Result<bool>
where
    S: EntityStore,
    S::Error: Display,
{
    let pair = ProposedPair::new(args.a, args.b);
    let decision = validator.validate_pair(&pair.a, &pair.b).await;
    let valid = decision.valid;

    println!(
        "{}",
        formatter.format_decision(&AuditedPair { pair, decision })?
    );
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::config::OutputFormat;

    fn args(a: &str, b: &str) -> ValidateArgs {
        ValidateArgs {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    #[tokio::test]
    async fn test_validate_reports_verdict() {
        let validator = fixtures::validator();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        assert!(execute_validate(args("clara", "paulo"), &validator, &formatter)
            .await
            .unwrap());
        assert!(execute_validate(args("jose", "marta"), &validator, &formatter)
            .await
            .unwrap());
        assert!(!execute_validate(args("lucas", "clara"), &validator, &formatter)
            .await
            .unwrap());
        assert!(!execute_validate(args("jose", "clara"), &validator, &formatter)
            .await
            .unwrap());
    }
}
