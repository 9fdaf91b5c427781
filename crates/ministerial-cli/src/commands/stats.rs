//! Stats command implementation.

use crate::error::Result;
use crate::output::Formatter;
use ministerial_domain::EntityStore;
use ministerial_pairing::{CacheStats, PairingValidator};
use std::fmt::Display;

/// Execute the stats command.
///
/// Refreshes the cache first so store failures are reported rather than
/// hidden behind an empty snapshot.
pub async fn execute_stats<S>(
    validator: &PairingValidator<S>,
    formatter: &Formatter,
) -> Result<CacheStats>
where
    S: EntityStore,
    S::Error: Display,
{
    let stats = validator.force_refresh().await?;
    println!("{}", formatter.format_stats(&stats)?);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use ministerial_pairing::PairingError;
    use ministerial_store::MemoryStore;

    #[tokio::test]
    async fn test_stats_counts_snapshot() {
        let validator = fixtures::validator();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let stats = execute_stats(&validator, &formatter).await.unwrap();
        assert_eq!(stats.student_count, 5);
        assert_eq!(stats.family_link_count, 1);
        assert!(stats.is_fresh);
        assert_eq!(stats.refresh_count, 1);
    }

    #[tokio::test]
    async fn test_stats_reports_store_failure() {
        let store = MemoryStore::from_parts(vec![], vec![]);
        store.set_offline(true);
        let validator = PairingValidator::default_config(store);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = execute_stats(&validator, &formatter).await;
        assert!(matches!(
            result,
            Err(CliError::Pairing(PairingError::Store(_)))
        ));
    }
}
