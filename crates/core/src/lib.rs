//! Shared kernel of the keel web framework.
//!
//! Holds the validation layer (rule contract, rulesets, concrete rules,
//! configuration-driven schemas) and the core error types. Nothing here
//! performs I/O apart from reading a schema file on request.

pub mod error;
pub mod validation;
