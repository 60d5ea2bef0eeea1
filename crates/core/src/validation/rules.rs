//! Concrete rule implementations.
//!
//! String rules implement [`Rule<str>`]. JSON rules implement
//! [`Rule<Value>`] and treat `null` as "absent": only [`Required`] rejects
//! it, so optional fields stay optional. [`OnString`] lifts any string rule
//! onto JSON values.

use regex::Regex;
use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

use super::ruleset::Rule;
use crate::error::RuleError;

// ── String rules ─────────────────────────────────────────────────────

/// Rejects strings shorter than `min` characters.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
}

impl MinLength {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Rule<str> for MinLength {
    fn evaluate(&self, value: &str) -> Result<bool, RuleError> {
        Ok(value.chars().count() >= self.min)
    }

    fn describe(&self) -> String {
        format!("must be at least {} characters", self.min)
    }
}

/// Rejects strings longer than `max` characters.
#[derive(Debug, Clone)]
pub struct MaxLength {
    max: usize,
}

impl MaxLength {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Rule<str> for MaxLength {
    fn evaluate(&self, value: &str) -> Result<bool, RuleError> {
        Ok(value.chars().count() <= self.max)
    }

    fn describe(&self) -> String {
        format!("must be at most {} characters", self.max)
    }
}

#[derive(Debug, Clone)]
pub struct StartsWith {
    prefix: String,
}

impl StartsWith {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Rule<str> for StartsWith {
    fn evaluate(&self, value: &str) -> Result<bool, RuleError> {
        Ok(value.starts_with(&self.prefix))
    }

    fn describe(&self) -> String {
        format!("must start with '{}'", self.prefix)
    }
}

/// Accepts strings matching a regular expression (unanchored).
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile `pattern`. An invalid expression is a configuration error,
    /// never a silent pass.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }
}

impl Rule<str> for Pattern {
    fn evaluate(&self, value: &str) -> Result<bool, RuleError> {
        Ok(self.regex.is_match(value))
    }

    fn describe(&self) -> String {
        format!("must match pattern '{}'", self.regex.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Rule<str> for Email {
    fn evaluate(&self, value: &str) -> Result<bool, RuleError> {
        Ok(value.validate_email())
    }

    fn describe(&self) -> String {
        "must be a valid email address".to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Url;

impl Rule<str> for Url {
    fn evaluate(&self, value: &str) -> Result<bool, RuleError> {
        Ok(value.validate_url())
    }

    fn describe(&self) -> String {
        "must be a valid URL".to_string()
    }
}

// ── JSON rules ───────────────────────────────────────────────────────

/// Rejects `null` and the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule<Value> for Required {
    fn evaluate(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }

    fn describe(&self) -> String {
        "is required".to_string()
    }
}

/// JSON value kinds accepted by [`TypeCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl JsonType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" | "float" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeCheck {
    expected: JsonType,
}

impl TypeCheck {
    pub fn new(expected: JsonType) -> Self {
        Self { expected }
    }
}

impl Rule<Value> for TypeCheck {
    fn evaluate(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(value.is_null() || self.expected.matches(value))
    }

    fn describe(&self) -> String {
        format!("must be of type {}", self.expected.as_str())
    }
}

/// Rejects numbers below `min`. Non-numbers are rejected.
#[derive(Debug, Clone, Copy)]
pub struct MinValue {
    min: f64,
}

impl MinValue {
    pub fn new(min: f64) -> Self {
        Self { min }
    }
}

impl Rule<Value> for MinValue {
    fn evaluate(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(match value {
            Value::Null => true,
            other => other.as_f64().is_some_and(|n| n >= self.min),
        })
    }

    fn describe(&self) -> String {
        format!("must be at least {}", self.min)
    }
}

/// Rejects numbers above `max`. Non-numbers are rejected.
#[derive(Debug, Clone, Copy)]
pub struct MaxValue {
    max: f64,
}

impl MaxValue {
    pub fn new(max: f64) -> Self {
        Self { max }
    }
}

impl Rule<Value> for MaxValue {
    fn evaluate(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(match value {
            Value::Null => true,
            other => other.as_f64().is_some_and(|n| n <= self.max),
        })
    }

    fn describe(&self) -> String {
        format!("must be at most {}", self.max)
    }
}

/// Accepts only values from a fixed list.
#[derive(Debug, Clone)]
pub struct OneOf {
    allowed: Vec<Value>,
}

impl OneOf {
    pub fn new(allowed: Vec<Value>) -> Self {
        Self { allowed }
    }
}

impl Rule<Value> for OneOf {
    fn evaluate(&self, value: &Value) -> Result<bool, RuleError> {
        Ok(value.is_null() || self.allowed.contains(value))
    }

    fn describe(&self) -> String {
        let allowed: Vec<String> = self.allowed.iter().map(Value::to_string).collect();
        format!("must be one of [{}]", allowed.join(", "))
    }
}

/// Applies a string rule to JSON values.
///
/// `null` passes, strings are handed to the inner rule, and any other kind
/// of value is rejected.
#[derive(Debug, Clone)]
pub struct OnString<R>(pub R);

impl<R> Rule<Value> for OnString<R>
where
    R: Rule<str>,
{
    fn evaluate(&self, value: &Value) -> Result<bool, RuleError> {
        match value {
            Value::Null => Ok(true),
            Value::String(s) => self.0.evaluate(s),
            _ => Ok(false),
        }
    }

    fn describe(&self) -> String {
        self.0.describe()
    }
}

/// Overrides the description of the wrapped rule.
#[derive(Debug, Clone)]
pub struct WithMessage<R> {
    inner: R,
    message: String,
}

impl<R> WithMessage<R> {
    pub fn new(inner: R, message: impl Into<String>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }
}

impl<T, R> Rule<T> for WithMessage<R>
where
    T: ?Sized,
    R: Rule<T>,
{
    fn evaluate(&self, value: &T) -> Result<bool, RuleError> {
        self.inner.evaluate(value)
    }

    fn describe(&self) -> String {
        self.message.clone()
    }
}
