//! Data validation engine.
//!
//! Provides the rule contract and ruleset aggregator, a library of concrete
//! rules, rule definitions read from configuration, and per-field schemas
//! for JSON records.

pub mod definition;
pub mod rules;
pub mod ruleset;
pub mod schema;

pub use ruleset::{FnRule, Rule, Ruleset, SharedRule, Verdict};
