//! gfwlist rule grammar.
//!
//! Parses decoded list text into a [`RuleSet`]. The grammar is permissive:
//! apart from blank lines, comments and headers, every line becomes a rule.
//!
//! # Syntax
//!
//! | Line                  | Rule                                                 |
//! |-----------------------|------------------------------------------------------|
//! | empty, `!…`, `[…`     | skipped                                              |
//! | `@@<rule>`            | `<rule>` as a whitelist (exemption) rule             |
//! | `/<regex>/`           | regex over the full URL                              |
//! | `\|\|<domain>`        | host wildcard, indexed under `<domain>`              |
//! | `\|<prefix>`          | URL prefix                                           |
//! | `<text>` without `/`  | host wildcard, indexed under `<text>` minus one leading `.` |
//! | `<text>` with `/`     | URL substring                                        |

use super::{Rule, RuleSet, RuleSetBuilder};
use crate::blocklist::decode::{DecodeError, ListEncoding, decode};

/// Where a parsed rule is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Placement {
    /// Exact index, under this domain.
    Indexed(String),
    /// Ordered fallback list.
    Ordered,
}

/// Incremental list parser.
///
/// Several texts can be fed in sequence (for instance a downloaded list
/// followed by locally configured rules); they behave as one list.
///
/// # Example
///
/// ```
/// use gfwlist::rules::RuleParser;
///
/// let mut parser = RuleParser::new();
/// parser.feed("||example.com\n|http://example.org/ads\n");
/// parser.feed_line("@@||safe.example.com");
/// let rules = parser.finish();
///
/// assert_eq!(rules.indexed_len(), 2);
/// assert_eq!(rules.ordered_len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RuleParser {
    builder: RuleSetBuilder,
    rules: usize,
    skipped: usize,
}

impl RuleParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole decoded list.
    pub fn parse(text: &str) -> RuleSet {
        let mut parser = Self::new();
        parser.feed(text);
        parser.finish()
    }

    /// Decode a raw payload and parse it.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the payload is not valid in the declared
    /// encoding. Individual lines never cause an error.
    pub fn load(payload: &[u8], encoding: ListEncoding) -> Result<RuleSet, DecodeError> {
        let text = decode(payload, encoding)?;
        Ok(Self::parse(&text))
    }

    /// Parse every line of `text`.
    pub fn feed(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.feed_line(line);
        }
        self
    }

    /// Parse a single line.
    pub fn feed_line(&mut self, line: &str) -> &mut Self {
        match parse_line(line) {
            Some((rule, Placement::Indexed(domain))) => {
                self.builder.index(domain, rule);
                self.rules += 1;
            }
            Some((rule, Placement::Ordered)) => {
                self.builder.push(rule);
                self.rules += 1;
            }
            None => self.skipped += 1,
        }
        self
    }

    pub fn finish(self) -> RuleSet {
        let set = self.builder.build();
        tracing::debug!(
            rules = self.rules,
            skipped = self.skipped,
            indexed = set.indexed_len(),
            ordered = set.ordered_len(),
            "parsed rule list"
        );
        set
    }
}

/// Parse one list line.
///
/// Returns `None` for lines that carry no rule.
fn parse_line(line: &str) -> Option<(Rule, Placement)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('!') || line.starts_with('[') {
        return None;
    }

    let (whitelist, text) = match line.strip_prefix("@@") {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    let (rule, placement) = if let Some(pattern) = regex_body(text) {
        (Rule::regex(pattern), Placement::Ordered)
    } else if let Some(domain) = text.strip_prefix("||") {
        (
            Rule::host_wildcard(domain),
            Placement::Indexed(domain.to_string()),
        )
    } else if let Some(prefix) = text.strip_prefix('|') {
        (Rule::url_prefix(prefix), Placement::Ordered)
    } else if !text.contains('/') {
        // `.example.com` keeps its dot in the pattern but is indexed under
        // the bare domain.
        let domain = text.strip_prefix('.').unwrap_or(text);
        (
            Rule::host_wildcard(text),
            Placement::Indexed(domain.to_string()),
        )
    } else {
        (Rule::url_substring(text), Placement::Ordered)
    };

    let rule = if whitelist { rule.into_whitelist() } else { rule };
    Some((rule, placement))
}

/// The interior of a `/…/` regex line.
fn regex_body(text: &str) -> Option<&str> {
    text.strip_prefix('/')?.strip_suffix('/')
}
