//! gfwlist - A routing oracle for gfwlist-style rule lists.
//!
//! Given a host or URL, gfwlist answers whether the destination is blocked
//! by the active list and should take the proxied route.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`rules`]: Rule model, target normalization and the list grammar
//! - [`engine`]: Two-tier matching (exact host index, then ordered scan)
//! - [`store`]: Hot-swappable holder for the active rule set
//! - [`blocklist`]: Fetching, decoding and periodic reloading of lists
//! - [`config`]: Configuration loading and validation
//! - [`metrics`]: Prometheus exporter setup
//! - [`error`]: Error types
//!
//! # Example
//!
//! ```rust
//! use gfwlist::rules::RuleParser;
//!
//! let rules = RuleParser::parse("||ads.example.com\n@@||ok.ads.example.com\n/tracker\\d+/\n");
//!
//! assert!(rules.is_blocked("ads.example.com"));
//! assert!(rules.is_blocked("http://cdn.test/tracker42.js"));
//! assert!(!rules.is_blocked("example.org"));
//! ```

pub mod blocklist;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod rules;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use rules::{RuleParser, RuleSet};
pub use store::RuleSetStore;
