//! Rule definitions read from configuration data.
//!
//! A definition names a rule type, carries its parameters as a JSON object
//! and optionally overrides the message shown on rejection:
//!
//! ```json
//! { "rule_type": "min_length", "config": { "min": 4 }, "message": "too short" }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rules::{
    Email, JsonType, MaxLength, MaxValue, MinLength, MinValue, OnString, OneOf, Pattern,
    Required, StartsWith, TypeCheck, Url, WithMessage,
};
use super::ruleset::{Rule, SharedRule};
use crate::error::RuleError;

/// Rule types understood by [`RuleDefinition::build`].
pub const RULE_TYPES: &[&str] = &[
    "required",
    "type_check",
    "min_length",
    "max_length",
    "starts_with",
    "regex_pattern",
    "email",
    "url",
    "min_value",
    "max_value",
    "enum_values",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub rule_type: String,
    #[serde(default)]
    pub config: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleDefinition {
    pub fn new(rule_type: impl Into<String>, config: Value) -> Self {
        Self {
            rule_type: rule_type.into(),
            config,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Construct the rule this definition describes.
    ///
    /// Unknown rule types and missing or malformed parameters are errors.
    pub fn build(&self) -> Result<SharedRule<Value>, RuleError> {
        match self.rule_type.as_str() {
            "required" => Ok(self.finish(Required)),
            "type_check" => {
                let name = self.str_param("type")?;
                let expected = JsonType::parse(name)
                    .ok_or_else(|| self.invalid(format!("unsupported type '{name}'")))?;
                Ok(self.finish(TypeCheck::new(expected)))
            }
            "min_length" => Ok(self.finish(OnString(MinLength::new(self.usize_param("min")?)))),
            "max_length" => Ok(self.finish(OnString(MaxLength::new(self.usize_param("max")?)))),
            "starts_with" => Ok(self.finish(OnString(StartsWith::new(self.str_param("prefix")?)))),
            "regex_pattern" => {
                let pattern = Pattern::new(self.str_param("pattern")?)?;
                Ok(self.finish(OnString(pattern)))
            }
            "email" => Ok(self.finish(OnString(Email))),
            "url" => Ok(self.finish(OnString(Url))),
            "min_value" => Ok(self.finish(MinValue::new(self.f64_param("min")?))),
            "max_value" => Ok(self.finish(MaxValue::new(self.f64_param("max")?))),
            "enum_values" => {
                let values = self
                    .param("values")?
                    .as_array()
                    .ok_or_else(|| self.invalid("'values' must be an array".to_string()))?;
                Ok(self.finish(OneOf::new(values.clone())))
            }
            other => Err(RuleError::UnknownRuleType(other.to_string())),
        }
    }

    fn finish<R>(&self, rule: R) -> SharedRule<Value>
    where
        R: Rule<Value> + 'static,
    {
        match &self.message {
            Some(message) => Arc::new(WithMessage::new(rule, message.clone())),
            None => Arc::new(rule),
        }
    }

    fn param(&self, key: &'static str) -> Result<&Value, RuleError> {
        self.config.get(key).ok_or_else(|| RuleError::MissingConfig {
            rule_type: self.rule_type.clone(),
            key,
        })
    }

    fn str_param(&self, key: &'static str) -> Result<&str, RuleError> {
        self.param(key)?
            .as_str()
            .ok_or_else(|| self.invalid(format!("'{key}' must be a string")))
    }

    fn usize_param(&self, key: &'static str) -> Result<usize, RuleError> {
        self.param(key)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.invalid(format!("'{key}' must be a non-negative integer")))
    }

    fn f64_param(&self, key: &'static str) -> Result<f64, RuleError> {
        self.param(key)?
            .as_f64()
            .ok_or_else(|| self.invalid(format!("'{key}' must be a number")))
    }

    fn invalid(&self, reason: String) -> RuleError {
        RuleError::InvalidConfig {
            rule_type: self.rule_type.clone(),
            reason,
        }
    }
}
