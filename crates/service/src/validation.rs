//! Declarative field validation.
//!
//! Each request type carries a static rule table mapping field names to
//! [`Rule`]s. Running the table yields [`ValidationErrors`]: every violated
//! rule on a field is reported as its own message, in rule order.
//!
//! Lengths count characters of the trimmed value. Fields without
//! `Required` are skipped entirely when empty. A non-empty value that fails
//! `Email` reports only the email message for that field.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use validator::{ValidateEmail, ValidateLength};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Min(usize),
    Max(usize),
    Between(usize, usize),
    Email,
}

pub type RuleTable = &'static [(&'static str, &'static [Rule])];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rule token: {0}")]
pub struct RuleParseError(pub String);

impl FromStr for Rule {
    type Err = RuleParseError;

    /// Parses `required`, `email`, `min:N`, `max:N` and `between:N,M`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let err = || RuleParseError(token.to_string());
        let (name, arg) = match token.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (token.trim(), None),
        };
        let number = |raw: &str| raw.trim().parse::<usize>().map_err(|_| err());
        match (name, arg) {
            ("required", None) => Ok(Rule::Required),
            ("email", None) => Ok(Rule::Email),
            ("min", Some(n)) => Ok(Rule::Min(number(n)?)),
            ("max", Some(n)) => Ok(Rule::Max(number(n)?)),
            ("between", Some(range)) => {
                let (lo, hi) = range.split_once(',').ok_or_else(err)?;
                let (lo, hi) = (number(lo)?, number(hi)?);
                if lo > hi {
                    return Err(err());
                }
                Ok(Rule::Between(lo, hi))
            }
            _ => Err(err()),
        }
    }
}

impl Rule {
    fn message(&self, field: &str) -> String {
        match self {
            Rule::Required => format!("The {field} field is required"),
            Rule::Min(n) => format!("The {field} field must be minimum {n} char"),
            Rule::Max(n) => format!("The {field} field must be maximum {n} char"),
            Rule::Between(lo, hi) => format!("The {field} field must be between {lo} and {hi} chars"),
            Rule::Email => format!("The {field} field must be a valid email address"),
        }
    }
}

/// Field name to ordered violation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single message on a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check one value against its rules, returning the violation messages.
pub fn check_field(field: &str, raw: &str, rules: &[Rule]) -> Vec<String> {
    let value = raw.trim();
    if value.is_empty() && !rules.contains(&Rule::Required) {
        return Vec::new();
    }
    let owned = value.to_string();
    let within = |min: Option<usize>, max: Option<usize>| {
        ValidateLength::<u64>::validate_length(&owned, min.map(|n| n as u64), max.map(|n| n as u64), None)
    };
    let mut messages = Vec::new();
    for rule in rules {
        let violated = match *rule {
            Rule::Required => value.is_empty(),
            Rule::Min(n) => !within(Some(n), None),
            Rule::Max(n) => !within(None, Some(n)),
            Rule::Between(lo, hi) => !within(Some(lo), Some(hi)),
            Rule::Email => {
                if !value.is_empty() && !owned.validate_email() {
                    return vec![rule.message(field)];
                }
                false
            }
        };
        if violated {
            messages.push(rule.message(field));
        }
    }
    messages
}

/// Implemented by input types that validate against a rule table.
pub trait Validate {
    fn rules(&self) -> RuleTable;

    /// Raw value of `field`; `None` is treated as empty.
    fn field_value(&self, field: &str) -> Option<&str>;

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for &(field, rules) in self.rules() {
            let value = self.field_value(field).unwrap_or("");
            for message in check_field(field, value, rules) {
                errors.add(field, message);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
