use crate::types::{Arg, Script, ScriptItem, Statement};
use crate::MigrationError;

/// RouterOS verbs, used only to split one-line absolute-path statements
/// into section path and command. Verbs on context-relative statements are
/// never checked against this list.
const VERBS: &[&str] = &[
    "add", "set", "remove", "enable", "disable", "print", "export", "import", "find",
];

/// Parse a RouterOS export script into an ordered sequence of statements
/// and standalone comments.
pub fn parse(text: &str) -> Result<Script, MigrationError> {
    let mut items = Vec::new();
    let mut section: Vec<String> = Vec::new();

    for logical in logical_lines(text)? {
        let trimmed = logical.text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('#') {
            items.push(ScriptItem::Comment {
                text: rest.to_string(),
                line: logical.line,
            });
            continue;
        }

        let (tokens, comment) = tokenize(trimmed, logical.line)?;
        if tokens.is_empty() {
            // Only a trailing comment survived tokenization.
            if let Some(text) = comment {
                items.push(ScriptItem::Comment {
                    text,
                    line: logical.line,
                });
            }
            continue;
        }

        if tokens[0].key.is_none() && tokens[0].text.starts_with('/') {
            match split_section_line(&tokens) {
                Some(split) => {
                    // One-line absolute-path statement; context is unchanged.
                    let path: Vec<String> = tokens[..split]
                        .iter()
                        .map(|t| t.text.trim_start_matches('/').to_string())
                        .collect();
                    items.push(ScriptItem::Statement(Statement {
                        section: path,
                        verb: tokens[split].text.clone(),
                        args: tokens[split + 1..].iter().map(RawToken::to_arg).collect(),
                        comment,
                        line: logical.line,
                    }));
                }
                None => {
                    section = tokens
                        .iter()
                        .map(|t| t.raw().trim_start_matches('/').to_string())
                        .collect();
                    if let Some(text) = comment {
                        items.push(ScriptItem::Comment {
                            text,
                            line: logical.line,
                        });
                    }
                }
            }
            continue;
        }

        items.push(ScriptItem::Statement(Statement {
            section: section.clone(),
            verb: tokens[0].text.clone(),
            args: tokens[1..].iter().map(RawToken::to_arg).collect(),
            comment,
            line: logical.line,
        }));
    }

    Ok(Script { items })
}

struct LogicalLine {
    text: String,
    /// 1-based number of the first physical line.
    line: usize,
}

/// Join physical lines split with a trailing backslash.
fn logical_lines(text: &str) -> Result<Vec<LogicalLine>, MigrationError> {
    let mut out: Vec<LogicalLine> = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed_end = raw.trim_end();
        let continues = trimmed_end.ends_with('\\') && !trimmed_end.ends_with("\\\\");
        let content = if continues {
            &trimmed_end[..trimmed_end.len() - 1]
        } else {
            raw
        };

        match pending.take() {
            Some(mut open) => {
                open.text.push(' ');
                open.text.push_str(content.trim_start());
                if continues {
                    pending = Some(open);
                } else {
                    out.push(open);
                }
            }
            None => {
                let line = LogicalLine {
                    text: content.to_string(),
                    line: lineno,
                };
                if continues {
                    pending = Some(line);
                } else {
                    out.push(line);
                }
            }
        }
    }

    if let Some(open) = pending {
        return Err(MigrationError::DanglingContinuation { line: open.line });
    }
    Ok(out)
}

#[derive(Debug)]
struct RawToken {
    key: Option<String>,
    text: String,
}

impl RawToken {
    /// Original token text, with the key=value split undone.
    fn raw(&self) -> String {
        match &self.key {
            Some(key) => format!("{key}={}", self.text),
            None => self.text.clone(),
        }
    }

    fn to_arg(&self) -> Arg {
        match &self.key {
            Some(key) => Arg::Keyword {
                key: key.clone(),
                value: self.text.clone(),
            },
            None => Arg::Positional(self.text.clone()),
        }
    }
}

/// Split one logical line into tokens plus an optional trailing comment.
/// Quotes are resolved here; the emitter re-quotes from scratch.
fn tokenize(line: &str, lineno: usize) -> Result<(Vec<RawToken>, Option<String>), MigrationError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            None => return Ok((tokens, None)),
            Some('#') => {
                chars.next();
                let rest: String = chars.collect();
                return Ok((tokens, Some(rest)));
            }
            Some(_) => {}
        }

        let mut key: Option<String> = None;
        let mut text = String::new();
        let mut in_quote = false;
        let mut was_quoted = false;

        loop {
            let Some(&c) = chars.peek() else {
                if in_quote {
                    return Err(MigrationError::UnterminatedQuote {
                        line: lineno,
                        text: line.to_string(),
                    });
                }
                break;
            };
            if in_quote {
                chars.next();
                match c {
                    '"' => in_quote = false,
                    '\\' => match chars.next() {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some('r') => text.push('\r'),
                        Some('_') => text.push(' '),
                        Some(other) => text.push(other),
                        None => {
                            return Err(MigrationError::UnterminatedQuote {
                                line: lineno,
                                text: line.to_string(),
                            })
                        }
                    },
                    _ => text.push(c),
                }
                continue;
            }
            match c {
                '"' => {
                    chars.next();
                    in_quote = true;
                    was_quoted = true;
                }
                '=' if key.is_none() && !text.is_empty() && !was_quoted => {
                    chars.next();
                    key = Some(std::mem::take(&mut text));
                }
                c if c.is_whitespace() => break,
                '#' => break,
                _ => {
                    chars.next();
                    text.push(c);
                }
            }
        }

        if key.is_none() && text.is_empty() && !was_quoted {
            continue;
        }
        tokens.push(RawToken { key, text });
    }
}

/// For a '/'-prefixed line, find the index of the verb token when the line
/// is a one-line statement; None means the line is a section context change.
fn split_section_line(tokens: &[RawToken]) -> Option<usize> {
    for (i, token) in tokens.iter().enumerate() {
        if token.key.is_some() {
            // key=value with no preceding verb: the token before it is the verb.
            return if i > 1 { Some(i - 1) } else { None };
        }
        if i > 0 && VERBS.contains(&token.text.as_str()) {
            return Some(i);
        }
    }
    None
}
