//! Rule contract and the ruleset aggregator.
//!
//! A [`Ruleset`] holds an ordered list of independent rules and evaluates a
//! value against all of them, collecting every rule that rejected it. It
//! never short-circuits: callers rendering field-level messages need the full
//! set of violated rules, not just the first one.

use std::fmt;
use std::sync::Arc;

use crate::error::RuleError;

/// A self-contained predicate over a value.
///
/// `Ok(true)` accepts, `Ok(false)` rejects. `Err` means the rule itself is
/// broken; rulesets propagate it unchanged and never turn it into a rejection.
pub trait Rule<T: ?Sized>: Send + Sync {
    fn evaluate(&self, value: &T) -> Result<bool, RuleError>;

    /// Human-readable description used when rendering violations.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// A rule that may be registered in any number of rulesets.
pub type SharedRule<T> = Arc<dyn Rule<T>>;

impl<T: ?Sized> fmt::Debug for dyn Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Adapts a plain predicate closure into a [`Rule`].
pub struct FnRule<F> {
    name: String,
    predicate: F,
}

impl<F> FnRule<F> {
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<T, F> Rule<T> for FnRule<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn evaluate(&self, value: &T) -> Result<bool, RuleError> {
        Ok((self.predicate)(value))
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Outcome of evaluating a value against a [`Ruleset`].
///
/// Holds the rejecting rules in registration order.
pub struct Verdict<T: ?Sized> {
    rejected: Vec<SharedRule<T>>,
}

impl<T: ?Sized> Verdict<T> {
    /// `true` when no rule rejected the value.
    pub fn is_valid(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn rejected(&self) -> &[SharedRule<T>] {
        &self.rejected
    }

    pub fn into_rejected(self) -> Vec<SharedRule<T>> {
        self.rejected
    }

    /// Descriptions of the rejecting rules, in registration order.
    pub fn descriptions(&self) -> Vec<String> {
        self.rejected.iter().map(|rule| rule.describe()).collect()
    }
}

impl<T: ?Sized> fmt::Debug for Verdict<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verdict")
            .field("rejected", &self.rejected)
            .finish()
    }
}

/// Ordered collection of rules with per-rule rejection tracking.
///
/// Rules are appended in registration order and never removed. Registering
/// the same rule twice evaluates it twice.
pub struct Ruleset<T: ?Sized> {
    rules: Vec<SharedRule<T>>,
    errors: Vec<SharedRule<T>>,
}

impl<T: ?Sized> Ruleset<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Append a rule. Returns `self` so registrations can be chained.
    pub fn add_rule<R>(&mut self, rule: R) -> &mut Self
    where
        R: Rule<T> + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append a rule that may also be registered elsewhere.
    pub fn add_shared(&mut self, rule: SharedRule<T>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules, preserving the order given.
    pub fn add_rules<I>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = SharedRule<T>>,
    {
        self.rules.extend(rules);
        self
    }

    /// Owned variant of [`add_rule`](Self::add_rule) for building inline.
    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        self.add_rule(rule);
        self
    }

    pub fn rules(&self) -> &[SharedRule<T>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that rejected the value passed to the most recent
    /// [`validate`](Self::validate) call. Empty before the first call.
    pub fn errors(&self) -> &[SharedRule<T>] {
        &self.errors
    }

    /// Evaluate every rule against `value` without touching stored state.
    ///
    /// A rule error aborts evaluation and is returned as-is.
    pub fn check(&self, value: &T) -> Result<Verdict<T>, RuleError> {
        let mut rejected = Vec::new();
        for rule in &self.rules {
            if !rule.evaluate(value)? {
                tracing::trace!(rule = %rule.describe(), "Rule rejected value");
                rejected.push(Arc::clone(rule));
            }
        }
        Ok(Verdict { rejected })
    }

    /// Evaluate every rule against `value` and record the rejecting ones.
    ///
    /// Returns `true` iff no rule rejected. The recorded errors are replaced
    /// on every call; if a rule fails they are left empty.
    pub fn validate(&mut self, value: &T) -> Result<bool, RuleError> {
        self.errors.clear();
        let verdict = self.check(value)?;
        let is_valid = verdict.is_valid();
        self.errors = verdict.into_rejected();
        Ok(is_valid)
    }
}

impl<T: ?Sized> Default for Ruleset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Ruleset<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Ruleset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ruleset")
            .field("rules", &self.rules)
            .field("errors", &self.errors)
            .finish()
    }
}
