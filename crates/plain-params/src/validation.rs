//! # Validation
//!
//! The rule set a [`Schema`](crate::Schema) carries and the per-field error
//! collection an instance fills in when it is validated.
//!
//! Every real field gets a presence rule when the schema is built. Models may
//! add format rules on top. Registration is idempotent: registering the same
//! rule twice for one field keeps a single copy, so declaring
//! `validates_presence_of("name")` on a real field never doubles its message.

use regex::Regex;
use serde_json::Value;
use std::fmt;

use crate::error::ParamsError;
use crate::params::Params;

/// Message recorded by a failing presence rule.
pub const BLANK_MESSAGE: &str = "can't be blank";

/// Message recorded by a failing format rule.
pub const INVALID_MESSAGE: &str = "is invalid";

/// A single check applied to one field's current value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Fails when the value is blank (see [`is_blank`]).
    Presence,
    /// Fails when the value's text does not match `pattern`.
    ///
    /// `null` reads as the empty string. With `allow_blank` set, blank values
    /// pass without being matched.
    Format { pattern: Regex, allow_blank: bool },
}

impl Rule {
    /// Compiles a format rule. Blank values are matched like any other.
    pub fn format(field: &str, pattern: &str) -> Result<Self, ParamsError> {
        Regex::new(pattern)
            .map(|pattern| Rule::Format {
                pattern,
                allow_blank: false,
            })
            .map_err(|e| ParamsError::InvalidRule {
                field: field.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Lets blank values through a format rule. No-op for presence.
    pub fn allow_blank(self) -> Self {
        match self {
            Rule::Format { pattern, .. } => Rule::Format {
                pattern,
                allow_blank: true,
            },
            other => other,
        }
    }

    /// Returns the failure message, or `None` when the value passes.
    pub fn check(&self, value: &Value) -> Option<&'static str> {
        match self {
            Rule::Presence => is_blank(value).then_some(BLANK_MESSAGE),
            Rule::Format {
                allow_blank: true, ..
            } if is_blank(value) => None,
            Rule::Format { pattern, .. } => {
                let matched = match value {
                    Value::Null => pattern.is_match(""),
                    Value::String(s) => pattern.is_match(s),
                    Value::Number(n) => pattern.is_match(&n.to_string()),
                    Value::Bool(b) => pattern.is_match(&b.to_string()),
                    _ => false,
                };
                (!matched).then_some(INVALID_MESSAGE)
            }
        }
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Rule::Presence, Rule::Presence) => true,
            (
                Rule::Format {
                    pattern: a,
                    allow_blank: a_blank,
                },
                Rule::Format {
                    pattern: b,
                    allow_blank: b_blank,
                },
            ) => a.as_str() == b.as_str() && a_blank == b_blank,
            _ => false,
        }
    }
}

/// Whether a value counts as absent for presence checks.
///
/// `null`, `false`, whitespace-only strings, empty arrays and empty objects
/// are blank. Numbers never are.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

/// Ordered, de-duplicated rules keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct Validations {
    rules: Vec<(String, Rule)>,
}

impl Validations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a presence rule. Returns `false` if it was already present.
    pub fn register_presence_rule(&mut self, field: impl Into<String>) -> bool {
        self.register(field, Rule::Presence)
    }

    /// Registers `rule` for `field`. Returns `false` if an identical rule was already present.
    pub fn register(&mut self, field: impl Into<String>, rule: Rule) -> bool {
        let field = field.into();
        if self.rules.iter().any(|(f, r)| *f == field && *r == rule) {
            return false;
        }
        self.rules.push((field, rule));
        true
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(f, r)| (f.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule against the instance's current values.
    pub fn run(&self, params: &Params) -> Errors {
        let mut errors = Errors::default();
        for (field, rule) in &self.rules {
            let value = params.get(field.as_str()).unwrap_or(Value::Null);
            if let Some(message) = rule.check(&value) {
                errors.add(field.clone(), message);
            }
        }
        errors
    }
}

/// Messages collected by the last validation run, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: Vec<(String, Vec<String>)>,
}

impl Errors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    /// Messages recorded against `field`; empty when it passed.
    pub fn get(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(f, messages)| (f.as_str(), messages.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One `"<Field> <message>"` line per message, e.g. `"Age can't be blank"`.
    pub fn full_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(field, messages)| {
                let label = humanize(field);
                messages.iter().map(move |m| format!("{} {}", label, m))
            })
            .collect()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

/// `"age_in_days"` -> `"Age in days"`. A trailing `_id` is dropped.
pub fn humanize(name: &str) -> String {
    let name = name.strip_suffix("_id").unwrap_or(name);
    let spaced = name.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!(false)));
        assert!(is_blank(&json!("   ")));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(true)));
        assert!(!is_blank(&json!("John")));
    }

    #[test]
    fn registration_is_idempotent() {
        let mut validations = Validations::new();
        assert!(validations.register_presence_rule("name"));
        assert!(!validations.register_presence_rule("name"));
        assert!(validations.register("phone", Rule::format("phone", r"\A\d{10,11}\z").unwrap()));
        assert!(!validations.register("phone", Rule::format("phone", r"\A\d{10,11}\z").unwrap()));
        assert_eq!(validations.len(), 2);
    }

    #[test]
    fn format_rule_checks_blank_and_numbers() {
        let rule = Rule::format("phone", r"\A\d{10,11}\z").unwrap();
        assert_eq!(rule.check(&Value::Null), Some(INVALID_MESSAGE));
        assert_eq!(rule.check(&json!("  ")), Some(INVALID_MESSAGE));
        assert_eq!(rule.check(&json!("11987654321")), None);
        assert_eq!(rule.check(&json!(1198765432)), None);
        assert_eq!(rule.check(&json!("123")), Some(INVALID_MESSAGE));
        assert_eq!(rule.check(&json!(["123"])), Some(INVALID_MESSAGE));
    }

    #[test]
    fn format_rule_allowing_blank() {
        let strict = Rule::format("code", r"\A[A-Z]{3}\z").unwrap();
        let lenient = strict.clone().allow_blank();
        assert_ne!(strict, lenient);
        assert_eq!(lenient.check(&Value::Null), None);
        assert_eq!(lenient.check(&json!("")), None);
        assert_eq!(lenient.check(&json!("euro")), Some(INVALID_MESSAGE));

        // A pattern accepting the empty string passes null as "".
        let optional = Rule::format("code", r"\A[A-Z]*\z").unwrap();
        assert_eq!(optional.check(&Value::Null), None);
        assert_eq!(Rule::Presence.allow_blank(), Rule::Presence);
    }

    #[test]
    fn bad_pattern_is_rejected() {
        let err = Rule::format("email", "(unclosed").unwrap_err();
        assert!(matches!(err, ParamsError::InvalidRule { ref field, .. } if field == "email"));
    }

    #[test]
    fn full_messages_humanize_fields() {
        let mut errors = Errors::default();
        errors.add("age", BLANK_MESSAGE);
        errors.add("age_in_days", INVALID_MESSAGE);
        errors.add("age", INVALID_MESSAGE);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("age"), &["can't be blank", "is invalid"]);
        assert_eq!(
            errors.full_messages(),
            vec![
                "Age can't be blank",
                "Age is invalid",
                "Age in days is invalid"
            ]
        );
        assert!(errors.get("name").is_empty());
    }

    #[test]
    fn humanize_drops_id_suffix() {
        assert_eq!(humanize("owner_id"), "Owner");
        assert_eq!(humanize("name"), "Name");
    }
}
