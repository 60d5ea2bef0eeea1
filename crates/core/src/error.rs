/// Failure of a rule itself, as opposed to a rule rejecting a value.
///
/// A rejection is reported through `Ok(false)` from [`Rule::evaluate`];
/// this type covers misconfigured or broken rules and is propagated to the
/// caller untouched.
///
/// [`Rule::evaluate`]: crate::validation::ruleset::Rule::evaluate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Unknown rule type: {0}")]
    UnknownRuleType(String),

    #[error("Rule '{rule_type}' is missing config key '{key}'")]
    MissingConfig { rule_type: String, key: &'static str },

    #[error("Rule '{rule_type}' has invalid config: {reason}")]
    InvalidConfig { rule_type: String, reason: String },

    #[error("Rule evaluation failed: {0}")]
    Evaluation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("Internal error: {0}")]
    Internal(String),
}
