use crate::types::{Arg, Script, ScriptItem};

/// Serialize a script back to RouterOS export text.
///
/// Section headers are written whenever the active section changes, one
/// statement per line, continuations collapsed. Values are re-quoted from
/// scratch; the original quoting is never trusted since values may have
/// changed during rewriting.
pub fn emit(script: &Script) -> String {
    let mut out = String::new();
    let mut section: &[String] = &[];

    for item in &script.items {
        match item {
            ScriptItem::Comment { text, .. } => {
                out.push('#');
                out.push_str(text);
                out.push('\n');
            }
            ScriptItem::Statement(stmt) => {
                if stmt.section != section && !stmt.section.is_empty() {
                    out.push('/');
                    out.push_str(&stmt.section.join(" "));
                    out.push('\n');
                    section = &stmt.section;
                }
                out.push_str(&stmt.verb);
                for arg in &stmt.args {
                    out.push(' ');
                    match arg {
                        Arg::Positional(text) => out.push_str(&quoted(text)),
                        Arg::Keyword { key, value } => {
                            out.push_str(key);
                            out.push('=');
                            out.push_str(&quoted(value));
                        }
                    }
                }
                if let Some(comment) = &stmt.comment {
                    out.push_str(" #");
                    out.push_str(comment);
                }
                out.push('\n');
            }
        }
    }
    out
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|c| {
            c.is_whitespace() || matches!(c, '"' | '\\' | '#' | '=' | '$' | ';')
        })
}

fn quoted(value: &str) -> String {
    if !needs_quoting(value) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn test_emits_section_headers_once_per_group() {
        let script = parse(
            "/interface bridge\nadd name=lan-bridge\nadd name=guest-bridge\n/ip address\nadd address=10.0.0.1/24 interface=lan-bridge\n",
        )
        .unwrap();
        let text = emit(&script);
        assert_eq!(
            text,
            "/interface bridge\nadd name=lan-bridge\nadd name=guest-bridge\n/ip address\nadd address=10.0.0.1/24 interface=lan-bridge\n"
        );
    }

    #[test]
    fn test_requotes_values_with_spaces() {
        let script = parse("/interface bridge\nadd name=\"my bridge\" mtu=1500\n").unwrap();
        let text = emit(&script);
        assert_eq!(text, "/interface bridge\nadd name=\"my bridge\" mtu=1500\n");
    }

    #[test]
    fn test_quotes_empty_and_special_values() {
        assert_eq!(quoted(""), "\"\"");
        assert_eq!(quoted("a b"), "\"a b\"");
        assert_eq!(quoted("a\"b"), "\"a\\\"b\"");
        assert_eq!(quoted("a\\b"), "\"a\\\\b\"");
        assert_eq!(quoted("key=value"), "\"key=value\"");
        assert_eq!(quoted("plain-token"), "plain-token");
    }

    #[test]
    fn test_round_trip_is_content_equivalent() {
        let input = "# exported config\n/interface bridge\nadd name=lan-bridge comment=\"main lan\"\n/interface bridge port\nadd bridge=lan-bridge interface=ether2\nadd bridge=lan-bridge interface=ether3 # access port\n/ip firewall filter\nadd action=accept chain=forward src-address=192.168.88.0/24\n";
        let first = parse(input).unwrap();
        let emitted = emit(&first);
        let second = parse(&emitted).unwrap();

        let a: Vec<_> = first.statements().cloned().collect();
        let b: Vec<_> = second.statements().cloned().collect();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.section, y.section);
            assert_eq!(x.verb, y.verb);
            assert_eq!(x.args, y.args);
            assert_eq!(x.comment, y.comment);
        }
    }

    #[test]
    fn test_collapses_continuations() {
        let script = parse("/ip route\nadd dst-address=0.0.0.0/0 \\\n    gateway=10.0.0.1\n")
            .unwrap();
        assert_eq!(
            emit(&script),
            "/ip route\nadd dst-address=0.0.0.0/0 gateway=10.0.0.1\n"
        );
    }
}
