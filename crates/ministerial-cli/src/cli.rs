//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use ministerial_domain::Part;
use std::path::PathBuf;

/// Ministerial CLI - Check ministry-school pairings against the S-38-T rules.
#[derive(Debug, Parser)]
#[command(name = "ministerial")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MINISTERIAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, global = true, env = "MINISTERIAL_DB")]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdicts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace the store contents with a JSON snapshot
    Import(ImportArgs),

    /// Check whether two students may be paired
    Validate(ValidateArgs),

    /// List the eligible helpers for a principal student
    Candidates(CandidatesArgs),

    /// Audit a JSON list of proposed pairs
    Audit(AuditArgs),

    /// Check whether a student may take a part
    Qualify(QualifyArgs),

    /// Refresh the relationship cache and show its statistics
    Stats,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file with `students` and `family_links`
    pub file: PathBuf,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// First student ID
    pub a: String,

    /// Second student ID
    pub b: String,
}

/// Arguments for the candidates command.
#[derive(Debug, Parser)]
pub struct CandidatesArgs {
    /// Principal student ID
    pub principal: String,

    /// Candidate helper IDs
    #[arg(required = true)]
    pub candidates: Vec<String>,

    /// Candidate IDs to leave out (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,
}

/// Arguments for the audit command.
#[derive(Debug, Parser)]
pub struct AuditArgs {
    /// JSON file holding an array of `{ "a": ..., "b": ... }` pairs
    pub file: PathBuf,
}

/// Arguments for the qualify command.
#[derive(Debug, Parser)]
pub struct QualifyArgs {
    /// Student ID
    pub student: String,

    /// School part
    #[arg(value_enum)]
    pub part: PartArg,
}

/// School part argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PartArg {
    /// Bible reading
    BibleReading,
    /// Starting a conversation
    InitialCall,
    /// Following up
    ReturnVisit,
    /// Conducting a Bible study
    BibleStudy,
    /// Talk
    Talk,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PartArg> for Part {
    fn from(part: PartArg) -> Self {
        match part {
            PartArg::BibleReading => Part::BibleReading,
            PartArg::InitialCall => Part::InitialCall,
            PartArg::ReturnVisit => Part::ReturnVisit,
            PartArg::BibleStudy => Part::BibleStudy,
            PartArg::Talk => Part::Talk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["ministerial", "validate", "s1", "s2"]);
        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.a, "s1");
                assert_eq!(args.b, "s2");
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_candidates_with_excludes() {
        let cli = Cli::parse_from([
            "ministerial",
            "candidates",
            "p",
            "c1",
            "c2",
            "--exclude",
            "c2",
            "-x",
            "c3",
        ]);
        match cli.command {
            Command::Candidates(args) => {
                assert_eq!(args.principal, "p");
                assert_eq!(args.candidates, vec!["c1", "c2"]);
                assert_eq!(args.exclude, vec!["c2", "c3"]);
            }
            _ => panic!("Expected Candidates command"),
        }
    }

    #[test]
    fn test_candidates_require_at_least_one_id() {
        assert!(Cli::try_parse_from(["ministerial", "candidates", "p"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ministerial", "stats", "--format", "json", "-vv", "--no-color"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_part_conversion() {
        let cli = Cli::parse_from(["ministerial", "qualify", "s1", "bible-study"]);
        match cli.command {
            Command::Qualify(args) => assert_eq!(Part::from(args.part), Part::BibleStudy),
            _ => panic!("Expected Qualify command"),
        }
    }
}
