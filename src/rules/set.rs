//! The parsed, queryable rule collection.

use std::collections::HashMap;

use super::Rule;

/// An immutable set of rules.
///
/// Rules live in one of two places:
/// - the exact index, keyed by a bare domain, for host wildcards built from
///   a pure domain token (`||example.com`, `example.com`, `.example.com`);
/// - the ordered list, in list order, for everything else.
///
/// A `RuleSet` is never modified after construction. Reloading builds a new
/// one and swaps it in through [`RuleSetStore`](crate::store::RuleSetStore).
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    exact: HashMap<String, Rule>,
    ordered: Vec<Rule>,
}

impl RuleSet {
    /// An empty set, which blocks nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// The indexed rule stored for `domain`, if any.
    #[inline]
    pub fn lookup(&self, domain: &str) -> Option<&Rule> {
        self.exact.get(domain)
    }

    /// Rules scanned when the index has no entry, in list order.
    #[inline]
    pub fn ordered(&self) -> &[Rule] {
        &self.ordered
    }

    #[inline]
    pub fn indexed_len(&self) -> usize {
        self.exact.len()
    }

    #[inline]
    pub fn ordered_len(&self) -> usize {
        self.ordered.len()
    }

    /// Total number of rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.exact.len() + self.ordered.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.ordered.is_empty()
    }
}

/// Accumulates rules before freezing them into a [`RuleSet`].
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    exact: HashMap<String, Rule>,
    ordered: Vec<Rule>,
}

impl RuleSetBuilder {
    /// Store `rule` in the exact index under `domain`.
    ///
    /// A later rule for the same domain replaces the earlier one.
    pub fn index(&mut self, domain: impl Into<String>, rule: Rule) -> &mut Self {
        self.exact.insert(domain.into(), rule);
        self
    }

    /// Append `rule` to the ordered fallback list.
    pub fn push(&mut self, rule: Rule) -> &mut Self {
        self.ordered.push(rule);
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet {
            exact: self.exact,
            ordered: self.ordered,
        }
    }
}
