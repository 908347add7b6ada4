//! Rules, rule sets and the list grammar.
//!
//! A gfwlist-style list is a text file with one rule per line. Each line
//! becomes a [`Rule`]; the rules are collected into a [`RuleSet`] which
//! answers [`RuleSet::is_blocked`].
//!
//! # Example
//!
//! ```
//! use gfwlist::rules::RuleParser;
//!
//! let rules = RuleParser::parse("! comment\n||ads.example.com\n@@||ok.ads.example.com\n");
//! assert!(rules.is_blocked("http://ads.example.com/banner"));
//! assert!(!rules.is_blocked("http://ok.ads.example.com/"));
//! assert!(!rules.is_blocked("http://example.org/"));
//! ```

pub mod parser;
pub mod set;
pub mod target;

use regex::Regex;

pub use parser::RuleParser;
pub use set::{RuleSet, RuleSetBuilder};
pub use target::Target;

/// How a rule inspects a [`Target`].
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// `pattern` is a substring of the authority (host, with port if any).
    ///
    /// There is no label anchoring: `ads.com` also matches
    /// `myads.com.attacker.net`.
    HostWildcard(String),
    /// The full URL starts with `pattern`.
    UrlPrefix(String),
    /// `pattern` occurs anywhere in the full URL.
    UrlSubstring(String),
    /// The full URL matches a regular expression.
    Regex(RegexPattern),
}

/// A regular expression rule.
///
/// The pattern is compiled once. A pattern that fails to compile is kept
/// (so it still shows up in the rule set) but never matches.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    source: String,
    compiled: Option<Regex>,
}

impl RegexPattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = match Regex::new(&source) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::error!(pattern = %source, error = %err, "invalid regex pattern, rule will never match");
                None
            }
        };
        Self { source, compiled }
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the pattern compiled.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.compiled.is_some()
    }

    #[inline]
    fn is_match(&self, haystack: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|regex| regex.is_match(haystack))
    }
}

/// A single list rule.
///
/// A whitelist rule (`@@` prefix in the list) matches exactly like its base
/// rule. The exemption is applied by the caller: a matching whitelist rule
/// means "not blocked".
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    whitelist: bool,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            whitelist: false,
        }
    }

    pub fn host_wildcard(pattern: impl Into<String>) -> Self {
        Self::new(RuleKind::HostWildcard(pattern.into()))
    }

    pub fn url_prefix(pattern: impl Into<String>) -> Self {
        Self::new(RuleKind::UrlPrefix(pattern.into()))
    }

    pub fn url_substring(pattern: impl Into<String>) -> Self {
        Self::new(RuleKind::UrlSubstring(pattern.into()))
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(RuleKind::Regex(RegexPattern::new(pattern)))
    }

    /// Turn this rule into a whitelist (exemption) rule.
    #[must_use]
    pub fn into_whitelist(mut self) -> Self {
        self.whitelist = true;
        self
    }

    #[inline]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    #[inline]
    pub fn is_whitelist(&self) -> bool {
        self.whitelist
    }

    /// Whether the rule's pattern matches the target.
    ///
    /// URL-based variants look at the normalized URL, which always carries a
    /// scheme (`https` when the query had none). Host wildcards only look at
    /// the authority.
    pub fn matches(&self, target: &Target) -> bool {
        match &self.kind {
            RuleKind::HostWildcard(pattern) => target.authority().contains(pattern.as_str()),
            RuleKind::UrlPrefix(pattern) => target.as_str().starts_with(pattern.as_str()),
            RuleKind::UrlSubstring(pattern) => target.as_str().contains(pattern.as_str()),
            RuleKind::Regex(pattern) => pattern.is_match(target.as_str()),
        }
    }

    /// The blocking decision this rule yields for a target.
    ///
    /// A plain rule blocks iff it matches; a whitelist rule blocks iff it
    /// does not.
    #[inline]
    pub fn verdict(&self, target: &Target) -> bool {
        self.matches(target) != self.whitelist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(s: &str) -> Target {
        Target::parse(s).unwrap()
    }

    #[test]
    fn should_match_host_wildcard_against_authority() {
        let rule = Rule::host_wildcard("ads.example.com");

        assert!(rule.matches(&target("http://ads.example.com/x")));
        assert!(rule.matches(&target("https://cdn.ads.example.com")));
        assert!(!rule.matches(&target("http://example.com/ads.example.com")));
    }

    #[test]
    fn should_match_host_wildcard_as_plain_substring() {
        let rule = Rule::host_wildcard("ads.com");

        assert!(rule.matches(&target("http://myads.com.attacker.net")));
    }

    #[test]
    fn should_match_host_wildcard_including_port() {
        let rule = Rule::host_wildcard("example.com:8080");

        assert!(rule.matches(&target("http://example.com:8080/")));
        assert!(!rule.matches(&target("http://example.com/")));
    }

    #[test]
    fn should_ignore_scheme_for_host_wildcard() {
        let rule = Rule::host_wildcard("https");

        assert!(!rule.matches(&target("https://example.com/")));
    }

    #[test]
    fn should_match_url_prefix() {
        let rule = Rule::url_prefix("http://example.com/ads");

        assert!(rule.matches(&target("http://example.com/ads/banner.gif")));
        assert!(!rule.matches(&target("https://example.com/ads/banner.gif")));
        assert!(!rule.matches(&target("http://cdn.example.com/ads")));
    }

    #[test]
    fn should_apply_default_scheme_for_url_prefix() {
        let rule = Rule::url_prefix("https://example.com");

        assert!(rule.matches(&target("example.com")));
        assert!(rule.matches(&target("example.com/path")));
    }

    #[test]
    fn should_match_url_substring() {
        let rule = Rule::url_substring("example.com/ads");

        assert!(rule.matches(&target("http://example.com/ads/1.png")));
        assert!(rule.matches(&target("example.com/ads")));
        assert!(!rule.matches(&target("http://example.com/news")));
    }

    #[test]
    fn should_match_regex_against_full_url() {
        let rule = Rule::regex(r"^https?://ads\d+\.example\.com");

        assert!(rule.matches(&target("http://ads42.example.com/")));
        assert!(rule.matches(&target("ads7.example.com")));
        assert!(!rule.matches(&target("http://ads.example.com/")));
    }

    #[test]
    fn should_never_match_invalid_regex() {
        let rule = Rule::regex(r"ads(\d+");

        let RuleKind::Regex(pattern) = rule.kind() else {
            panic!("Expected regex rule");
        };
        assert!(!pattern.is_valid());
        assert_eq!(pattern.source(), r"ads(\d+");
        assert!(!rule.matches(&target("http://ads1.example.com/")));
    }

    #[test]
    fn should_match_whitelist_like_base_rule() {
        let rule = Rule::host_wildcard("example.com").into_whitelist();

        assert!(rule.is_whitelist());
        assert!(rule.matches(&target("http://example.com/")));
        assert!(!rule.matches(&target("http://example.org/")));
    }

    #[test]
    fn should_invert_verdict_for_whitelist() {
        let block = Rule::host_wildcard("example.com");
        let allow = Rule::host_wildcard("example.com").into_whitelist();
        let hit = target("http://example.com/");
        let miss = target("http://example.org/");

        assert!(block.verdict(&hit));
        assert!(!block.verdict(&miss));
        assert!(!allow.verdict(&hit));
        assert!(allow.verdict(&miss));
    }
}
