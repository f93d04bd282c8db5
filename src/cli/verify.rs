use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};

use crate::{migrate, ModelRegistry};

use super::VerifyArgs;

pub(crate) fn run_verify(args: VerifyArgs) -> Result<()> {
    let text = fs::read_to_string(&args.r#in)
        .with_context(|| format!("Failed to read input file: {}", args.r#in.display()))?;

    let to = args.to.as_deref().unwrap_or(&args.from);
    let registry = ModelRegistry::builtin();
    let result = migrate(&text, &args.from, to, &registry)?;

    if result.source_config == result.target_config {
        if !args.quiet {
            println!("No changes.");
        }
        return Ok(());
    }

    if !args.quiet {
        let diff = similar::TextDiff::from_lines(&result.source_config, &result.target_config);
        let mut out = io::stdout().lock();
        let unified = diff
            .unified_diff()
            .context_radius(3)
            .header("source", "target")
            .to_string();
        write!(out, "{}", unified)?;
        for warning in &result.warnings {
            writeln!(out, "warning: {warning}")?;
        }
    }

    Err(anyhow::anyhow!("verify: changes detected"))
}
