//! Query targets.
//!
//! A [`Target`] is the parsed form of the host or URL handed to
//! [`RuleSet::is_blocked`](crate::rules::RuleSet::is_blocked). Parsing applies
//! the one normalization every URL-based rule relies on: a missing scheme
//! becomes `https`.

use std::borrow::Cow;

use url::Url;

/// Scheme assumed when the query carries none.
pub const DEFAULT_SCHEME: &str = "https";

/// A host or URL ready to be matched against rules.
///
/// # Example
///
/// ```
/// use gfwlist::rules::Target;
///
/// let target = Target::parse("ads.example.com:8080").unwrap();
/// assert_eq!(target.host(), "ads.example.com");
/// assert_eq!(target.authority(), "ads.example.com:8080");
/// assert_eq!(target.as_str(), "https://ads.example.com:8080/");
///
/// assert!(Target::parse("http://exa mple.com").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parse a host or URL.
    ///
    /// Returns `None` when the text cannot be understood as a URL with a host.
    /// Callers treat that as "not blocked".
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        // `example.com:443` parses as an opaque URL with scheme `example.com`,
        // so a host-less result is retried with the default scheme.
        let url = match Url::parse(input) {
            Ok(url) if url.has_host() => url,
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) if !has_scheme(input) => {
                Url::parse(&format!("{DEFAULT_SCHEME}://{input}")).ok()?
            }
            _ => return None,
        };

        if url.host_str().is_none_or(str::is_empty) {
            return None;
        }

        Some(Self { url })
    }

    /// Host without port.
    #[inline]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Host, followed by `:port` when the URL carries a non-default port.
    pub fn authority(&self) -> Cow<'_, str> {
        match self.url.port() {
            Some(port) => Cow::Owned(format!("{}:{port}", self.host())),
            None => Cow::Borrowed(self.host()),
        }
    }

    /// The full normalized URL.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    #[inline]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }
}

/// Whether `input` starts with `<scheme>://`.
///
/// A `://` further in, as in `example.com/url?q=https://example.org`, does not
/// count.
fn has_scheme(input: &str) -> bool {
    input.split_once("://").is_some_and(|(scheme, _)| {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
