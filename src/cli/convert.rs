use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::{migrate_with_stats, ModelRegistry};

use super::{print_migration_stats, print_warnings, ConvertArgs};

pub(crate) fn run_convert(args: ConvertArgs) -> Result<()> {
    // Critical safety check: prevent input == output
    if same_path(&args.r#in, &args.out) {
        bail!(
            concat!(
                "Output path must be different from input path (refusing to overwrite input).\n",
                "Input:  {}\n",
                "Output: {}"
            ),
            args.r#in.display(),
            args.out.display()
        );
    }

    let text = fs::read_to_string(&args.r#in)
        .with_context(|| format!("Failed to read input file: {}", args.r#in.display()))?;

    if !args.force && args.out.exists() {
        bail!(
            "Output file already exists: {} (use --force to overwrite)",
            args.out.display()
        );
    }

    let registry = ModelRegistry::builtin();
    let (result, stats) = migrate_with_stats(&text, &args.from, &args.to, &registry)?;

    write_atomically(&args.out, &result.target_config)?;
    if let Some(source_out) = &args.source_out {
        write_atomically(source_out, &result.source_config)?;
    }

    println!("Migration completed: {} -> {}", args.from, args.to);
    print_migration_stats(&stats);
    print_warnings(&result.warnings);
    if args.verbose {
        println!("\nNormalized source:\n{}", result.source_config);
    }
    println!("Output written to: {}", args.out.display());
    if let Some(source_out) = &args.source_out {
        println!("Normalized source written to: {}", source_out.display());
    }

    Ok(())
}

fn same_path(a: &Path, b: &Path) -> bool {
    let canon_a = fs::canonicalize(a).unwrap_or_else(|_| a.to_path_buf());
    let canon_b = fs::canonicalize(b).unwrap_or_else(|_| b.to_path_buf());
    canon_a == canon_b
}

/// Write via a temp file in the target directory, then rename into place.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension(format!("tmp.{}", std::process::id()));
    let mut tmp_file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary output file: {}",
                tmp_path.display()
            )
        })?;

    let written = tmp_file
        .write_all(contents.as_bytes())
        .and_then(|_| tmp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e)
            .with_context(|| format!("Failed to write output file: {}", tmp_path.display()));
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e)
            .with_context(|| format!("Failed to replace output file: {}", path.display()));
    }
    Ok(())
}
