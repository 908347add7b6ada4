//! Hot-swappable holder for the active rule set.
//!
//! Readers take a snapshot (an `Arc` clone under a briefly held read lock) and
//! evaluate against it without holding any lock. [`RuleSetStore::replace`]
//! swaps the pointer under the write lock. A query therefore always sees one
//! complete rule set, old or new, and a slow fallback scan never delays a
//! reload or other queries.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::metrics::{QUERIES_TOTAL, RULES_GAUGE};
use crate::rules::RuleSet;

/// The currently active [`RuleSet`].
///
/// # Example
///
/// ```
/// use gfwlist::rules::RuleParser;
/// use gfwlist::store::RuleSetStore;
///
/// let store = RuleSetStore::new(RuleParser::parse("||example.com"));
/// assert!(store.is_blocked("www.example.com"));
///
/// store.replace(RuleParser::parse("||example.org"));
/// assert!(!store.is_blocked("www.example.com"));
/// assert!(store.is_blocked("www.example.org"));
/// ```
#[derive(Debug, Default)]
pub struct RuleSetStore {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleSetStore {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// The active rule set.
    ///
    /// The snapshot stays valid (and unchanged) after a later
    /// [`replace`](Self::replace).
    #[inline]
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.current.read().clone()
    }

    /// Install `rules` as the active set and return the previous one.
    ///
    /// Build the new set before calling this; only the pointer swap happens
    /// under the lock.
    pub fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let rules = Arc::new(rules);
        let count = rules.len();
        let previous = std::mem::replace(&mut *self.current.write(), rules);

        metrics::gauge!(RULES_GAUGE).set(count as f64);
        tracing::debug!(previous = previous.len(), current = count, "replaced rule set");
        previous
    }

    /// Whether `host_or_url` is blocked by the active rule set.
    pub fn is_blocked(&self, host_or_url: &str) -> bool {
        let blocked = self.snapshot().is_blocked(host_or_url);
        let verdict = if blocked { "blocked" } else { "direct" };
        metrics::counter!(QUERIES_TOTAL, "verdict" => verdict).increment(1);
        blocked
    }

    /// Number of rules in the active set.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}
