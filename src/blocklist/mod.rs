//! Rule list sources.
//!
//! A list goes through three stages before it reaches the
//! [`RuleSetStore`](crate::store::RuleSetStore):
//!
//! - **Fetch**: [`loader::FileLoader`] reads a local file,
//!   [`remote::RemoteLoader`] downloads a URL and keeps an offline copy.
//! - **Decode**: [`decode::decode`] turns the raw payload into text.
//! - **Parse**: [`RuleParser`](crate::rules::RuleParser) builds the rule set.
//!
//! [`manager::ListManager`] runs the stages and hot-swaps the result.
//!
//! # Example
//!
//! ```
//! use gfwlist::blocklist::decode::{ListEncoding, decode};
//! use gfwlist::rules::RuleParser;
//!
//! let text = decode(b"fHxleGFtcGxlLmNvbQo=", ListEncoding::Base64).unwrap();
//! let rules = RuleParser::parse(&text);
//! assert!(rules.is_blocked("www.example.com"));
//! ```

pub mod decode;
pub mod loader;
pub mod manager;
pub mod remote;
