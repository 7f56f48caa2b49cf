use crate::error::{Result, SheetSplitError};
use regex::Regex;

/// A shell-style wildcard compiled to an anchored regular expression.
///
/// Supports `*` (any run of characters, including none), `?` (exactly one
/// character), `[...]` character classes with ranges and `[!...]` negated
/// classes. Matching is case-sensitive and covers the whole name.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new<S: Into<String>>(pattern: S) -> Result<Self> {
        let source = pattern.into();
        let translated = translate(&source);

        let regex = Regex::new(&translated).map_err(|e| SheetSplitError::InvalidPattern {
            pattern: source.clone(),
            message: e.to_string(),
        })?;

        Ok(Self { source, regex })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }
}

impl std::fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translate a glob into regex syntax anchored at both ends.
pub fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("(?s)^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i + 1..end]));
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            c => out.push_str(&escape_char(c)),
        }
        i += 1;
    }

    out.push('$');
    out
}

/// Index of the `]` closing the class opened at `start`, if any.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    // A leading `]` is a member, not the terminator
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.first() {
        Some('!') => (true, &body[1..]),
        _ => (false, body),
    };

    let mut members = String::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            let (lo, hi) = (body[k], body[k + 2]);
            // Reversed ranges match nothing
            if lo <= hi {
                members.push_str(&escape_char(lo));
                members.push('-');
                members.push_str(&escape_char(hi));
            }
            k += 3;
        } else {
            members.push_str(&escape_char(body[k]));
            k += 1;
        }
    }

    match (members.is_empty(), negated) {
        (true, false) => r"[^\x{0}-\x{10FFFF}]".to_string(),
        (true, true) => ".".to_string(),
        (false, false) => format!("[{}]", members),
        (false, true) => format!("[^{}]", members),
    }
}

fn escape_char(c: char) -> String {
    let mut buf = [0u8; 4];
    regex::escape(c.encode_utf8(&mut buf))
}
