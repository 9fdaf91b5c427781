//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::Result;
use crate::output::Formatter;
use ministerial_store::{EntitySnapshot, SqliteStore};
use tracing::info;

/// Execute the import command.
///
/// Replaces every student and family link in `store` with the snapshot file.
/// Record problems are reported but do not block the import.
pub fn execute_import(
    args: ImportArgs,
    store: &SqliteStore,
    minor_age: u32,
    formatter: &Formatter,
) -> Result<()> {
    let snapshot = EntitySnapshot::from_file(&args.file)?;

    let warnings = collect_warnings(&snapshot, minor_age);
    store.replace_all(&snapshot)?;
    info!(
        "Imported {} from {}",
        snapshot.students.len(),
        args.file.display()
    );

    if formatter.is_interactive() {
        for warning in &warnings {
            println!("{}", formatter.warning(warning));
        }
        println!(
            "{}",
            formatter.success(&format!(
                "Imported {} student(s) and {} family link(s)",
                snapshot.students.len(),
                snapshot.family_links.len()
            ))
        );
    }

    Ok(())
}

/// Human-readable problems with the imported records.
fn collect_warnings(snapshot: &EntitySnapshot, minor_age: u32) -> Vec<String> {
    let mut warnings: Vec<String> = snapshot
        .students
        .iter()
        .flat_map(|student| {
            student
                .record_issues(minor_age)
                .into_iter()
                .map(move |issue| format!("{}: {}", student.id, issue))
        })
        .collect();

    let malformed = snapshot
        .family_links
        .iter()
        .filter(|link| !link.is_well_formed())
        .count();
    if malformed > 0 {
        warnings.push(format!(
            "{} family link(s) lack a student, name or relation and will be ignored",
            malformed
        ));
    }
    warnings
}
