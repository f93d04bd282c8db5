pub mod cli;
mod emit;
mod errors;
mod mapping;
mod migrate;
mod models;
mod parse;
mod rewrite;
mod types;

pub use emit::emit;
pub use errors::MigrationError;
pub use mapping::{build_mapping, InterfaceMapping};
pub use migrate::{interface_references, migrate, migrate_with_stats, scan_script};
pub use models::{InterfaceRole, InterfaceSlot, ModelDescriptor, ModelRegistry};
pub use parse::parse;
pub use rewrite::{rewrite, RewriteContext, Rewritten};
pub use types::{
    Arg, MigrationResult, MigrationStats, ScanReport, Script, ScriptItem, Statement, Warning,
    WarningKind,
};
