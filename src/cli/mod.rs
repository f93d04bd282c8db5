use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;

use crate::{MigrationStats, ScanReport, Warning};

mod convert;
mod models;
mod scan;
mod verify;

pub(crate) struct ScanArgs {
    pub(crate) r#in: std::path::PathBuf,
    pub(crate) from: String,
    pub(crate) to: Option<String>,
    pub(crate) verbose: bool,
}

pub(crate) struct ConvertArgs {
    pub(crate) r#in: std::path::PathBuf,
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) out: std::path::PathBuf,
    pub(crate) source_out: Option<std::path::PathBuf>,
    pub(crate) verbose: bool,
    pub(crate) force: bool,
}

pub(crate) struct VerifyArgs {
    pub(crate) r#in: std::path::PathBuf,
    pub(crate) from: String,
    pub(crate) to: Option<String>,
    pub(crate) quiet: bool,
}

#[derive(Parser)]
#[command(
    name = "rosmigrate",
    about = "Migrate MikroTik RouterOS configuration exports between router models",
    long_about = "Rewrites physical interface references in a RouterOS /export script so the \
                  configuration can be imported on a different router model. Statements that \
                  cannot be carried over are dropped and reported as warnings.",
    after_help = "Examples:\n  rosmigrate scan --in ./export.rsc --from rb4011igs\n  rosmigrate convert --in ./export.rsc --from rb4011igs --to rb750gr3 --out ./export-hex.rsc\n  rosmigrate verify --in ./export.rsc --from rb4011igs\n  rosmigrate models\n\nRun 'rosmigrate convert --help' to see all flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an export and show its inventory (read-only)
    Scan {
        /// Input export script path
        #[arg(short, long)]
        r#in: std::path::PathBuf,

        /// Source router model id (see 'rosmigrate models')
        #[arg(short, long)]
        from: String,

        /// Target router model id; when set, previews migration warnings
        #[arg(short, long)]
        to: Option<String>,

        /// List every interface reference found
        #[arg(short, long)]
        verbose: bool,
    },

    /// Migrate an export to another model and write the result
    Convert {
        /// Input export script path
        #[arg(short, long)]
        r#in: std::path::PathBuf,

        /// Source router model id
        #[arg(short, long)]
        from: String,

        /// Target router model id
        #[arg(short, long)]
        to: String,

        /// Output path for the migrated script
        #[arg(short, long)]
        out: std::path::PathBuf,

        /// Also write the normalized source script here
        #[arg(long)]
        source_out: Option<std::path::PathBuf>,

        /// Show each interface reference as it is remapped
        #[arg(short, long)]
        verbose: bool,

        /// Overwrite output file if it exists
        #[arg(long)]
        force: bool,
    },

    /// Migrate and diff against the normalized source (no files written)
    Verify {
        /// Input export script path
        #[arg(short, long)]
        r#in: std::path::PathBuf,

        /// Source router model id
        #[arg(short, long)]
        from: String,

        /// Target router model id; defaults to the source model
        #[arg(short, long)]
        to: Option<String>,

        /// Suppress diff output (exit code still indicates changes)
        #[arg(long)]
        quiet: bool,
    },

    /// List supported router models
    Models,
}

pub fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Scan {
            r#in,
            from,
            to,
            verbose,
        } => scan::run_scan(ScanArgs {
            r#in,
            from,
            to,
            verbose,
        }),
        Commands::Convert {
            r#in,
            from,
            to,
            out,
            source_out,
            verbose,
            force,
        } => convert::run_convert(ConvertArgs {
            r#in,
            from,
            to,
            out,
            source_out,
            verbose,
            force,
        }),
        Commands::Verify {
            r#in,
            from,
            to,
            quiet,
        } => verify::run_verify(VerifyArgs {
            r#in,
            from,
            to,
            quiet,
        }),
        Commands::Models => models::run_models(),
    }
}

pub(crate) fn print_scan_report(report: &ScanReport) {
    println!("Statements found: {}", report.statements_parsed);
    println!("Comment lines found: {}", report.comments_found);
    println!("Configuration sections: {}", report.sections.len());
    for section in &report.sections {
        println!("  {section}");
    }
    for (role, count) in &report.references_by_role {
        println!("Interface references ({role}): {count}");
    }
    println!("IP networks referenced: {}", report.networks.len());
}

pub(crate) fn print_migration_stats(stats: &MigrationStats) {
    println!("Statements parsed: {}", stats.statements_parsed);
    println!("Statements rewritten: {}", stats.statements_rewritten);
    println!("Statements dropped: {}", stats.statements_dropped);
    println!("Interface references remapped: {}", stats.references_remapped);
    println!(
        "Interface references preserved unmapped: {}",
        stats.references_preserved
    );
}

pub(crate) fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    println!("Warnings ({}):", warnings.len());
    for warning in warnings {
        println!("  {warning}");
    }
}
