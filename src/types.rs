use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One argument token of a statement, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Positional(String),
    Keyword { key: String, value: String },
}

/// A single configuration command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Section path, e.g. ["interface", "bridge", "port"].
    pub section: Vec<String>,
    /// Command verb; opaque, never validated.
    pub verb: String,
    /// Positional and keyword arguments in source order.
    pub args: Vec<Arg>,
    /// Trailing comment text, without the leading '#'.
    pub comment: Option<String>,
    /// 1-based line number of the statement start in the source text.
    pub line: usize,
}

impl Statement {
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            Arg::Keyword { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn section_path(&self) -> String {
        format!("/{}", self.section.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptItem {
    Statement(Statement),
    /// Standalone comment line, text without the leading '#'.
    Comment { text: String, line: usize },
}

/// One full configuration file, order-preserving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub items: Vec<ScriptItem>,
}

impl Script {
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.items.iter().filter_map(|item| match item {
            ScriptItem::Statement(stmt) => Some(stmt),
            ScriptItem::Comment { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Statement bound to a physical port with no target counterpart; dropped.
    DroppedUnmappedInterface,
    /// Interface reference with no target counterpart, kept verbatim.
    UnmappedInterfacePreserved,
    /// Section requires a hardware capability the target model lacks; dropped.
    UnsupportedOnTarget,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::DroppedUnmappedInterface => write!(f, "dropped-unmapped-interface"),
            WarningKind::UnmappedInterfacePreserved => write!(f, "unmapped-interface-preserved"),
            WarningKind::UnsupportedOnTarget => write!(f, "unsupported-on-target"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Warning {
    pub line: usize,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: [{}] {}", self.line, self.kind, self.message)
    }
}

/// Outcome of one migration run; created per request, never persisted.
#[derive(Debug)]
pub struct MigrationResult {
    /// Source script re-emitted unchanged, exactly as the engine understood it.
    pub source_config: String,
    pub target_config: String,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Default)]
pub struct MigrationStats {
    pub statements_parsed: usize,
    pub comments_found: usize,
    pub statements_rewritten: usize,
    pub statements_dropped: usize,
    pub references_remapped: usize,
    pub references_preserved: usize,
}

/// Read-only inventory of a parsed script, for the scan command.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub statements_parsed: usize,
    pub comments_found: usize,
    pub sections: BTreeSet<String>,
    /// Interface references found, counted per role name.
    pub references_by_role: BTreeMap<String, usize>,
    /// Distinct IP networks and addresses appearing in values.
    pub networks: BTreeSet<String>,
}
