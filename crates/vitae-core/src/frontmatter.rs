//! Frontmatter extraction for content files.
//!
//! Only a flat subset of YAML is understood:
//!
//! ```yaml
//! ---
//! title: "My Project"       # quotes stripped
//! featured: true            # boolean
//! order: 2                  # number
//! tags:                     # list, filled by the `- ` lines below
//!   - rust
//!   - "cli"
//! summary: |                # block scalar, lines joined with '\n'
//!   First line.
//!   Second line.
//! ---
//! ```
//!
//! Anything else inside the block is skipped. Extraction never fails.

use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::{
    content::{FieldValue, Fields},
    error::{CoreError, Result},
};

/// Opening delimiter, block, closing delimiter.
static BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*(?:\n|$)").expect("frontmatter block pattern")
});

/// `key: value` at the start of a line.
static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+):\s*(.*)$").expect("frontmatter key pattern")
});

/// A content file split into decoded frontmatter and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Decoded frontmatter fields (empty without frontmatter).
    pub fields: Fields,

    /// Body text. Trimmed when frontmatter was present, untouched otherwise.
    pub body: String,

    /// Whether a frontmatter block was found.
    pub has_frontmatter: bool,
}

/// Split content into the raw frontmatter block and the body.
///
/// Returns `None` if the content does not start with a `---` line or the
/// block is never closed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let caps = BLOCK_PATTERN.captures(content)?;
    let block = caps.get(1).map_or("", |m| m.as_str());
    let end = caps.get(0).map_or(0, |m| m.end());
    Some((block, &content[end..]))
}

/// Extract frontmatter fields and body from a content file.
pub fn extract(content: &str) -> Document {
    let Some((block, body)) = split_frontmatter(content) else {
        return Document {
            fields: Fields::new(),
            body: content.to_string(),
            has_frontmatter: false,
        };
    };

    Document {
        fields: decode(block),
        body: body.trim().to_string(),
        has_frontmatter: true,
    }
}

/// Read a content file and extract its frontmatter.
pub fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::read(path, e))?;
    Ok(extract(&content))
}

/// Decode the lines of a frontmatter block into fields.
pub fn decode(block: &str) -> Fields {
    block
        .lines()
        .fold(Scanner::default(), Scanner::feed)
        .finish()
}

/// What the previous key line left the scanner expecting.
#[derive(Debug, Default)]
enum ScanState {
    /// Scalar values only; stray `- ` items are dropped.
    #[default]
    Normal,
    /// `key:` with no value, collecting `- ` items into `key`.
    List { key: String },
    /// `key: |`, collecting continuation lines.
    Block { key: String, buffer: String },
}

#[derive(Debug, Default)]
struct Scanner {
    fields: Fields,
    state: ScanState,
}

impl Scanner {
    fn feed(mut self, line: &str) -> Self {
        let trimmed = line.trim();

        if let Some(item) = trimmed.strip_prefix("- ") {
            // Items inside a block scalar are lost when the block is finalized.
            if let ScanState::List { key } = &self.state
                && let Some(FieldValue::List(items)) = self.fields.get_mut(key)
            {
                items.push(strip_quotes(item).to_string());
            }
            return self;
        }

        if let Some(caps) = KEY_PATTERN.captures(line) {
            self.finish_block();

            let key = caps[1].to_string();
            let value = caps[2].trim();

            self.state = match value {
                "|" => {
                    self.fields.insert(&key, FieldValue::List(Vec::new()));
                    ScanState::Block {
                        key,
                        buffer: String::new(),
                    }
                }
                "" => {
                    self.fields.insert(&key, FieldValue::List(Vec::new()));
                    ScanState::List { key }
                }
                _ => {
                    self.fields.insert(key, coerce(value));
                    ScanState::Normal
                }
            };
            return self;
        }

        if let ScanState::Block { buffer, .. } = &mut self.state
            && !trimmed.is_empty()
        {
            if !buffer.is_empty() {
                buffer.push('\n');
            }
            buffer.push_str(line.trim_start());
        }

        self
    }

    fn finish_block(&mut self) {
        if let ScanState::Block { key, buffer } = std::mem::take(&mut self.state) {
            self.fields
                .insert(key, FieldValue::Block(buffer.trim().to_string()));
        }
    }

    fn finish(mut self) -> Fields {
        self.finish_block();
        self.fields
    }
}

/// Coerce an inline scalar into a boolean, number or string.
fn coerce(raw: &str) -> FieldValue {
    match raw {
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        _ => match parse_number(raw) {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Text(strip_quotes(raw).to_string()),
        },
    }
}

/// Parse a string that is entirely a finite number.
///
/// Accepts decimal notation with optional sign, fraction and exponent, and
/// unsigned `0x`/`0o`/`0b` integers.
pub fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let digits = s
            .strip_prefix(prefix)
            .or_else(|| s.strip_prefix(&prefix.to_uppercase()));
        if let Some(digits) = digits {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    // Rejects `inf`, `NaN` and friends, which `f64::from_str` would take.
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }

    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Strip one leading and one trailing quote character.
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some content.\n---\nnot: frontmatter\n---\n";
        let doc = extract(content);

        assert!(!doc.has_frontmatter);
        assert!(doc.fields.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_leading_whitespace_is_not_frontmatter() {
        let content = "\n---\ntitle: x\n---\nbody";
        let doc = extract(content);

        assert!(!doc.has_frontmatter);
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_unclosed_block() {
        let content = "---\ntitle: x\nbody without closing";
        let doc = extract(content);

        assert!(!doc.has_frontmatter);
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_split_frontmatter() {
        let content = "---\ntitle: \"Hello\"\n---\n\nThis is the body.\n";
        let (block, body) = split_frontmatter(content).expect("split");

        assert_eq!(block, "title: \"Hello\"");
        assert_eq!(body, "This is the body.\n");
    }

    #[test]
    fn test_closing_delimiter_at_end_of_file() {
        let doc = extract("---\ntitle: Hello\n---");

        assert!(doc.has_frontmatter);
        assert_eq!(doc.fields.get("title"), Some(&text("Hello")));
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_scalar_coercion() {
        let doc = extract(
            "---\ntitle: \"Hello\"\nactive: true\nhidden: false\ncount: 42\nratio: 0.5\n---\nBody\n",
        );

        assert!(doc.has_frontmatter);
        assert_eq!(doc.fields.get("title"), Some(&text("Hello")));
        assert_eq!(doc.fields.get("active"), Some(&FieldValue::Bool(true)));
        assert_eq!(doc.fields.get("hidden"), Some(&FieldValue::Bool(false)));
        assert_eq!(doc.fields.get("count"), Some(&FieldValue::Number(42.0)));
        assert_eq!(doc.fields.get("ratio"), Some(&FieldValue::Number(0.5)));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_quoted_values_stay_strings() {
        let doc = extract("---\nyear: \"2024\"\nflag: 'true'\nname: 'Ada'\n---\n");

        assert_eq!(doc.fields.get("year"), Some(&text("2024")));
        assert_eq!(doc.fields.get("flag"), Some(&text("true")));
        assert_eq!(doc.fields.get("name"), Some(&text("Ada")));
    }

    #[test]
    fn test_only_one_quote_layer_is_stripped() {
        let doc = extract("---\nquote: \"'nested'\"\nopen: \"dangling\n---\n");

        assert_eq!(doc.fields.get("quote"), Some(&text("'nested'")));
        assert_eq!(doc.fields.get("open"), Some(&text("dangling")));
    }

    #[test]
    fn test_values_keep_inner_colons() {
        let doc = extract("---\nurl: https://example.com/a:b\n---\n");

        assert_eq!(
            doc.fields.get("url"),
            Some(&text("https://example.com/a:b"))
        );
    }

    #[test]
    fn test_list_after_empty_key() {
        let doc = extract("---\ntags:\n  - a\n  - \"b\"\n  - 'c d'\ntitle: x\n---\n");

        assert_eq!(doc.fields.get("tags"), Some(&list(&["a", "b", "c d"])));
        assert_eq!(doc.fields.get("title"), Some(&text("x")));
    }

    #[test]
    fn test_empty_key_without_items_is_empty_list() {
        let doc = extract("---\ntags:\ntitle: x\n---\n");

        assert_eq!(doc.fields.get("tags"), Some(&list(&[])));
    }

    #[test]
    fn test_list_items_after_scalar_are_ignored() {
        let doc = extract("---\ntitle: x\n- stray\n---\n");

        assert_eq!(doc.fields.get("title"), Some(&text("x")));
        assert_eq!(doc.fields.len(), 1);
    }

    #[test]
    fn test_list_survives_noise_lines() {
        let doc = extract("---\ntags:\n  - a\n  # comment\n  - b\n---\n");

        assert_eq!(doc.fields.get("tags"), Some(&list(&["a", "b"])));
    }

    #[test]
    fn test_block_scalar() {
        let doc = extract(
            "---\nnotes: |\n  First line.\n\n    Second line.  \ntitle: After\n---\nBody",
        );

        assert_eq!(
            doc.fields.get("notes"),
            Some(&FieldValue::Block("First line.\nSecond line.".into()))
        );
        assert_eq!(doc.fields.get("title"), Some(&text("After")));
    }

    #[test]
    fn test_block_scalar_at_end_of_block() {
        let doc = extract("---\nabout: |\n  Hello\n  World\n---\n");

        assert_eq!(
            doc.fields.get("about"),
            Some(&FieldValue::Block("Hello\nWorld".into()))
        );
    }

    #[test]
    fn test_empty_block_scalar() {
        let doc = extract("---\nabout: |\ntitle: x\n---\n");

        assert_eq!(
            doc.fields.get("about"),
            Some(&FieldValue::Block(String::new()))
        );
    }

    #[test]
    fn test_list_items_inside_block_scalar_are_dropped() {
        let doc = extract("---\nabout: |\n  Intro\n  - bullet\n  Outro\n---\n");

        assert_eq!(
            doc.fields.get("about"),
            Some(&FieldValue::Block("Intro\nOutro".into()))
        );
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let doc = extract("---\ntitle: first\nyear: 2020\ntitle: second\n---\n");

        assert_eq!(doc.fields.get("title"), Some(&text("second")));
        let keys: Vec<_> = doc.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "year"]);
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let doc = extract("---\nnot a key\n  indented: value\nkey-with-dash: x\nok: 1\n---\n");

        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.fields.get("ok"), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = extract("---\r\ntitle: Hello\r\ncount: 3\r\n---\r\nBody\r\n");

        assert!(doc.has_frontmatter);
        assert_eq!(doc.fields.get("title"), Some(&text("Hello")));
        assert_eq!(doc.fields.get("count"), Some(&FieldValue::Number(3.0)));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_read_document() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("bio.md");
        std::fs::write(&path, "---\ntagline: Builder\n---\nHi").expect("write");

        let doc = read_document(&path).expect("read");
        assert_eq!(doc.fields.get("tagline"), Some(&text("Builder")));
        assert_eq!(doc.body, "Hi");

        let missing = read_document(&dir.path().join("missing.md"));
        assert!(missing.unwrap_err().to_string().contains("missing.md"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-1.5"), Some(-1.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("2024-01-15"), None);
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("0x+1"), None);
        assert_eq!(parse_number("1_000"), None);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"Hello\""), "Hello");
        assert_eq!(strip_quotes("'Hello'"), "Hello");
        assert_eq!(strip_quotes("\""), "");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
