//! Behavioural tests for `Ruleset` using the concrete string rules.

use std::sync::Arc;

use keel_core::validation::rules::{MinLength, StartsWith};
use keel_core::validation::{FnRule, Ruleset, SharedRule};

fn ids(rules: &[SharedRule<str>]) -> Vec<String> {
    rules.iter().map(|rule| rule.describe()).collect()
}

// ---------------------------------------------------------------------------
// Test: min-length and prefix rules report exactly the rules that rejected
// ---------------------------------------------------------------------------

#[test]
fn min_length_and_prefix_scenario() {
    let min_length: SharedRule<str> = Arc::new(MinLength::new(4));
    let prefix: SharedRule<str> = Arc::new(StartsWith::new("foo"));

    let mut ruleset = Ruleset::new();
    ruleset
        .add_shared(Arc::clone(&min_length))
        .add_shared(Arc::clone(&prefix));

    assert!(!ruleset.validate("foo").unwrap());
    assert_eq!(ruleset.errors().len(), 1);
    assert!(Arc::ptr_eq(&ruleset.errors()[0], &min_length));

    assert!(!ruleset.validate("barfoo").unwrap());
    assert_eq!(ruleset.errors().len(), 1);
    assert!(Arc::ptr_eq(&ruleset.errors()[0], &prefix));

    assert!(!ruleset.validate("bar").unwrap());
    assert_eq!(
        ids(ruleset.errors()),
        vec!["must be at least 4 characters", "must start with 'foo'"]
    );

    assert!(ruleset.validate("foobar").unwrap());
    assert!(ruleset.errors().is_empty());
}

// ---------------------------------------------------------------------------
// Test: the pure `check` agrees with `validate` on every input
// ---------------------------------------------------------------------------

#[test]
fn check_agrees_with_validate() {
    let mut ruleset = Ruleset::<str>::new();
    ruleset.add_rules([
        Arc::new(MinLength::new(4)) as SharedRule<str>,
        Arc::new(StartsWith::new("foo")),
        Arc::new(FnRule::new("no spaces", |s: &str| !s.contains(' '))),
    ]);

    for input in ["", "foo", "foo bar", "barfoo", "foobar", "f o o"] {
        let verdict = ruleset.check(input).unwrap();
        let valid = ruleset.validate(input).unwrap();

        assert_eq!(verdict.is_valid(), valid, "input {input:?}");
        assert_eq!(ids(verdict.rejected()), ids(ruleset.errors()), "input {input:?}");
    }
}

// ---------------------------------------------------------------------------
// Test: a ruleset behind an Arc can be checked from several threads
// ---------------------------------------------------------------------------

#[test]
fn shared_ruleset_checks_concurrently() {
    let ruleset = Arc::new(
        Ruleset::<str>::new()
            .with_rule(MinLength::new(4))
            .with_rule(StartsWith::new("foo")),
    );

    let handles: Vec<_> = ["foo", "foobar", "bar", "barfoo"]
        .into_iter()
        .map(|input| {
            let ruleset = Arc::clone(&ruleset);
            std::thread::spawn(move || ruleset.check(input).unwrap().rejected().len())
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![1, 0, 2, 1]);
}
