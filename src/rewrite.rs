use crate::mapping::InterfaceMapping;
use crate::models::{InterfaceRole, ModelDescriptor};
use crate::types::{Arg, Statement, Warning, WarningKind};

/// Everything one rewrite pass needs; built once per migration run.
pub struct RewriteContext<'a> {
    pub mapping: &'a InterfaceMapping,
    pub source: &'a ModelDescriptor,
    pub target: &'a ModelDescriptor,
}

#[derive(Debug)]
pub struct Rewritten {
    /// None when the statement was dropped.
    pub statement: Option<Statement>,
    pub references_remapped: usize,
    pub references_preserved: usize,
}

/// Sections whose statements configure a physical port directly; an
/// unmapped reference here cannot be carried over, so the statement is
/// dropped rather than emitted against a port that does not exist.
fn binds_physical_port(section: &[String]) -> bool {
    let path: Vec<&str> = section.iter().map(String::as_str).collect();
    matches!(
        path.as_slice(),
        ["interface", "ethernet", ..] | ["interface", "bridge", "port"] | ["interface", "wireless", ..]
    )
}

/// Hardware capability a section depends on, if any.
fn required_role(section: &[String]) -> Option<InterfaceRole> {
    let path: Vec<&str> = section.iter().map(String::as_str).collect();
    match path.as_slice() {
        ["interface", "wireless", ..] => Some(InterfaceRole::Wlan),
        _ => None,
    }
}

/// Apply the interface mapping to one statement.
///
/// Tokens are classified structurally against the source model's interface
/// name patterns; anything not recognized as an interface reference passes
/// through byte-for-byte. Exactly one warning is recorded per dropped
/// statement.
pub fn rewrite(
    stmt: &Statement,
    ctx: &RewriteContext<'_>,
    warnings: &mut Vec<Warning>,
) -> Rewritten {
    if let Some(role) = required_role(&stmt.section) {
        if !ctx.target.has_role(role) {
            warnings.push(Warning {
                line: stmt.line,
                kind: WarningKind::UnsupportedOnTarget,
                message: format!(
                    "{} requires a {} port; target {} has none, statement dropped",
                    stmt.section_path(),
                    role,
                    ctx.target.id
                ),
            });
            return Rewritten {
                statement: None,
                references_remapped: 0,
                references_preserved: 0,
            };
        }
    }

    let mut remapped = 0usize;
    let mut unmapped: Vec<String> = Vec::new();
    let mut args = Vec::with_capacity(stmt.args.len());

    for arg in &stmt.args {
        let rewritten = match arg {
            Arg::Positional(text) => {
                Arg::Positional(rewrite_value(text, ctx, &mut remapped, &mut unmapped))
            }
            Arg::Keyword { key, value } => Arg::Keyword {
                key: key.clone(),
                value: rewrite_value(value, ctx, &mut remapped, &mut unmapped),
            },
        };
        args.push(rewritten);
    }

    if !unmapped.is_empty() {
        if binds_physical_port(&stmt.section) {
            warnings.push(Warning {
                line: stmt.line,
                kind: WarningKind::DroppedUnmappedInterface,
                message: format!(
                    "{} {} references {}, which has no port on target {}; statement dropped",
                    stmt.section_path(),
                    stmt.verb,
                    unmapped.join(", "),
                    ctx.target.id
                ),
            });
            return Rewritten {
                statement: None,
                references_remapped: 0,
                references_preserved: 0,
            };
        }
        for name in &unmapped {
            warnings.push(Warning {
                line: stmt.line,
                kind: WarningKind::UnmappedInterfacePreserved,
                message: format!(
                    "{} has no port on target {}; reference kept as-is",
                    name, ctx.target.id
                ),
            });
        }
    }

    Rewritten {
        statement: Some(Statement {
            section: stmt.section.clone(),
            verb: stmt.verb.clone(),
            args,
            comment: stmt.comment.clone(),
            line: stmt.line,
        }),
        references_remapped: remapped,
        references_preserved: unmapped.len(),
    }
}

/// Rewrite one value, element-wise across RouterOS comma lists. Unmapped
/// interface references are kept verbatim; the caller decides the policy.
fn rewrite_value(
    value: &str,
    ctx: &RewriteContext<'_>,
    remapped: &mut usize,
    unmapped: &mut Vec<String>,
) -> String {
    if !value.contains(',') {
        return rewrite_element(value, ctx, remapped, unmapped);
    }
    value
        .split(',')
        .map(|el| rewrite_element(el, ctx, remapped, unmapped))
        .collect::<Vec<_>>()
        .join(",")
}

fn rewrite_element(
    element: &str,
    ctx: &RewriteContext<'_>,
    remapped: &mut usize,
    unmapped: &mut Vec<String>,
) -> String {
    if ctx.source.classify(element).is_none() {
        return element.to_string();
    }
    match ctx.mapping.get(element) {
        Some(target) => {
            *remapped += 1;
            target.to_string()
        }
        None => {
            if !unmapped.iter().any(|name| name == element) {
                unmapped.push(element.to_string());
            }
            element.to_string()
        }
    }
}
