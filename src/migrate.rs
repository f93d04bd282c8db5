use anyhow::Result;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnet::{Ipv4Net, Ipv6Net};

use crate::emit::emit;
use crate::mapping::build_mapping;
use crate::models::{ModelDescriptor, ModelRegistry};
use crate::parse::parse;
use crate::rewrite::{rewrite, RewriteContext};
use crate::types::{
    Arg, MigrationResult, MigrationStats, ScanReport, Script, ScriptItem, Statement,
};

/// Migrate a configuration export from one router model to another.
///
/// Fatal errors are unknown models, parse errors and an incompatible port
/// profile; every other anomaly is accumulated as a warning on the result.
/// The returned `source_config` is the parsed source re-emitted unchanged,
/// so the caller can show exactly what the engine understood.
pub fn migrate(
    text: &str,
    source_id: &str,
    target_id: &str,
    registry: &ModelRegistry,
) -> Result<MigrationResult> {
    migrate_with_stats(text, source_id, target_id, registry).map(|(result, _)| result)
}

/// Like [`migrate`], additionally reporting counters for CLI output.
pub fn migrate_with_stats(
    text: &str,
    source_id: &str,
    target_id: &str,
    registry: &ModelRegistry,
) -> Result<(MigrationResult, MigrationStats)> {
    let source = registry.describe(source_id)?;
    let target = registry.describe(target_id)?;
    let script = parse(text)?;
    let mapping = build_mapping(source, target)?;

    let ctx = RewriteContext {
        mapping: &mapping,
        source,
        target,
    };

    let mut warnings = Vec::new();
    let mut stats = MigrationStats::default();
    let mut items = Vec::with_capacity(script.items.len());

    for item in &script.items {
        match item {
            ScriptItem::Comment { text, line } => {
                stats.comments_found += 1;
                items.push(ScriptItem::Comment {
                    text: text.clone(),
                    line: *line,
                });
            }
            ScriptItem::Statement(stmt) => {
                stats.statements_parsed += 1;
                let out = rewrite(stmt, &ctx, &mut warnings);
                stats.references_remapped += out.references_remapped;
                stats.references_preserved += out.references_preserved;
                match out.statement {
                    Some(rewritten) => {
                        if rewritten != *stmt {
                            stats.statements_rewritten += 1;
                        }
                        items.push(ScriptItem::Statement(rewritten));
                    }
                    None => stats.statements_dropped += 1,
                }
            }
        }
    }

    let result = MigrationResult {
        source_config: emit(&script),
        target_config: emit(&Script { items }),
        warnings,
    };
    Ok((result, stats))
}

/// Inventory a script without migrating it: statement and comment counts,
/// sections seen, interface references per role, IP networks referenced.
pub fn scan_script(text: &str, source_id: &str, registry: &ModelRegistry) -> Result<ScanReport> {
    let source = registry.describe(source_id)?;
    let script = parse(text)?;

    let mut report = ScanReport::default();
    for item in &script.items {
        let stmt = match item {
            ScriptItem::Comment { .. } => {
                report.comments_found += 1;
                continue;
            }
            ScriptItem::Statement(stmt) => stmt,
        };
        report.statements_parsed += 1;
        if !stmt.section.is_empty() {
            report.sections.insert(stmt.section_path());
        }
        for value in statement_values(stmt) {
            for element in value.split(',') {
                if let Some((role, _)) = source.classify(element) {
                    *report.references_by_role.entry(role.to_string()).or_default() += 1;
                } else if let Some(net) = parse_network(element) {
                    report.networks.insert(net);
                }
            }
        }
    }
    Ok(report)
}

/// Interface references found in a script, with their source lines.
pub fn interface_references(script: &Script, source: &ModelDescriptor) -> Vec<(usize, String)> {
    let mut refs = Vec::new();
    for stmt in script.statements() {
        for value in statement_values(stmt) {
            for element in value.split(',') {
                if source.classify(element).is_some() {
                    refs.push((stmt.line, element.to_string()));
                }
            }
        }
    }
    refs
}

fn statement_values(stmt: &Statement) -> impl Iterator<Item = &str> {
    stmt.args.iter().map(|arg| match arg {
        Arg::Positional(text) => text.as_str(),
        Arg::Keyword { value, .. } => value.as_str(),
    })
}

/// Recognize an IP address or network literal, normalized for counting.
fn parse_network(token: &str) -> Option<String> {
    if let Ok(net) = Ipv4Net::from_str(token) {
        return Some(net.to_string());
    }
    if let Ok(addr) = Ipv4Addr::from_str(token) {
        return Some(addr.to_string());
    }
    if let Ok(net) = Ipv6Net::from_str(token) {
        return Some(net.to_string());
    }
    if let Ok(addr) = Ipv6Addr::from_str(token) {
        return Some(addr.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
# model = RB4011iGS+
/interface bridge
add name=lan-bridge
/interface bridge port
add bridge=lan-bridge interface=ether2
add bridge=lan-bridge interface=ether7
/ip address
add address=192.168.88.1/24 interface=lan-bridge
/ip firewall filter
add action=accept chain=forward src-address=192.168.88.0/24
";

    #[test]
    fn test_same_model_migration_is_clean() {
        let registry = ModelRegistry::builtin();
        let (result, stats) =
            migrate_with_stats(EXPORT, "rb4011igs", "rb4011igs", &registry).unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(result.source_config, result.target_config);
        assert_eq!(stats.statements_parsed, 5);
        assert_eq!(stats.statements_dropped, 0);
        assert_eq!(stats.statements_rewritten, 0);
    }

    #[test]
    fn test_unknown_model_is_fatal() {
        let registry = ModelRegistry::builtin();
        let err = migrate(EXPORT, "rb4011igs", "rb9999", &registry).unwrap_err();
        assert!(err.to_string().contains("Unknown router model"));
    }

    #[test]
    fn test_downgrade_drops_and_warns() {
        let registry = ModelRegistry::builtin();
        let (result, stats) =
            migrate_with_stats(EXPORT, "rb4011igs", "rb750gr3", &registry).unwrap();

        // ether7 has no counterpart on a 5-port target; ether2 survives.
        assert!(result.target_config.contains("interface=ether2"));
        assert!(!result.target_config.contains("interface=ether7"));
        assert_eq!(stats.statements_dropped, 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line, 6);
    }

    #[test]
    fn test_scan_report() {
        let registry = ModelRegistry::builtin();
        let report = scan_script(EXPORT, "rb4011igs", &registry).unwrap();

        assert_eq!(report.statements_parsed, 5);
        assert_eq!(report.comments_found, 1);
        assert!(report.sections.contains("/interface bridge port"));
        assert_eq!(report.references_by_role.get("ethernet"), Some(&2));
        assert!(report.networks.contains("192.168.88.0/24"));
        assert!(report.networks.contains("192.168.88.1/24"));
    }
}
