use anyhow::Result;

use crate::ModelRegistry;

pub(crate) fn run_models() -> Result<()> {
    let registry = ModelRegistry::builtin();
    for model in registry.models() {
        println!("{:<16} {} ({})", model.id, model.title, model.port_summary());
    }
    Ok(())
}
