use anyhow::{Context, Result};
use std::fs;

use crate::{interface_references, migrate_with_stats, parse, scan_script, ModelRegistry};

use super::{print_migration_stats, print_scan_report, print_warnings, ScanArgs};

pub(crate) fn run_scan(args: ScanArgs) -> Result<()> {
    let text = fs::read_to_string(&args.r#in)
        .with_context(|| format!("Failed to read input file: {}", args.r#in.display()))?;

    let registry = ModelRegistry::builtin();
    let report = scan_script(&text, &args.from, &registry)?;
    print_scan_report(&report);

    if args.verbose {
        let source = registry.describe(&args.from)?;
        let script = parse(&text)?;
        for (line, name) in interface_references(&script, source) {
            println!("  line {line}: {name}");
        }
    }

    if let Some(to) = &args.to {
        let (result, stats) = migrate_with_stats(&text, &args.from, to, &registry)?;
        println!("\nMigration preview ({} -> {}):", args.from, to);
        print_migration_stats(&stats);
        print_warnings(&result.warnings);
    }

    Ok(())
}
