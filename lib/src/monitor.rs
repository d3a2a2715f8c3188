// Copyright 2025 sway-scenes contributors
// SPDX-License-Identifier: MPL-2.0

//! Identity matching of connected outputs against labeled rules.

use indexmap::IndexMap;
use regex::Regex;

use crate::shell::Output;
use crate::Error;

/// A labeled identity predicate over output properties.
///
/// Every populated pattern must match for an output to satisfy the rule;
/// fields left unset are not checked. Patterns use search semantics, so
/// `S242HL` matches a model string containing it anywhere.
#[derive(Clone, Debug)]
pub struct MonitorRule {
    label: &'static str,
    name: Option<Regex>,
    model: Option<Regex>,
    serial: Option<Regex>,
    make: Option<Regex>,
}

impl MonitorRule {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            name: None,
            model: None,
            serial: None,
            make: None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Requires the port name (for example `eDP-1`) to match.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is not a valid regular expression.
    pub fn name(mut self, pattern: &str) -> Result<Self, Error> {
        self.name = Some(compile(pattern)?);
        Ok(self)
    }

    /// Requires the model string to match.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is not a valid regular expression.
    pub fn model(mut self, pattern: &str) -> Result<Self, Error> {
        self.model = Some(compile(pattern)?);
        Ok(self)
    }

    /// Requires the serial number to match.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is not a valid regular expression.
    pub fn serial(mut self, pattern: &str) -> Result<Self, Error> {
        self.serial = Some(compile(pattern)?);
        Ok(self)
    }

    /// Requires the manufacturer string to match.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is not a valid regular expression.
    pub fn make(mut self, pattern: &str) -> Result<Self, Error> {
        self.make = Some(compile(pattern)?);
        Ok(self)
    }

    /// Whether this output satisfies every populated pattern.
    #[must_use]
    pub fn matches(&self, output: &Output) -> bool {
        fn check(pattern: Option<&Regex>, value: &str) -> bool {
            pattern.is_none_or(|pattern| pattern.is_match(value))
        }

        check(self.name.as_ref(), &output.name)
            && check(self.model.as_ref(), &output.model)
            && check(self.serial.as_ref(), &output.serial)
            && check(self.make.as_ref(), &output.make)
    }

    /// First output, in enumeration order, satisfying the rule.
    ///
    /// A rule with no patterns at all matches the first output
    /// unconditionally.
    #[must_use]
    pub fn find<'a>(&self, outputs: &'a [Output]) -> Option<&'a Output> {
        if self.is_empty() {
            tracing::warn!(
                label = self.label,
                "monitor rule has no patterns and will match the first output"
            );
        }

        outputs.iter().find(|output| self.matches(output))
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.model.is_none() && self.serial.is_none() && self.make.is_none()
    }
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_owned(),
        source,
    })
}

/// Outputs matched by rule label, in rule-evaluation order.
#[derive(Debug, Default)]
pub struct Matched<'a> {
    map: IndexMap<&'static str, &'a Output>,
}

impl<'a> Matched<'a> {
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&'a Output> {
        self.map.get(label).copied()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'a Output)> {
        self.map.iter().map(|(label, output)| (*label, *output))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Evaluates every rule against the output list.
///
/// Each rule binds to the first output it matches; rules matching nothing
/// are simply absent from the result. Two rules may bind the same output.
#[must_use]
pub fn detect<'a>(rules: &[MonitorRule], outputs: &'a [Output]) -> Matched<'a> {
    let mut map = IndexMap::with_capacity(rules.len());

    for rule in rules {
        if let Some(output) = rule.find(outputs) {
            tracing::debug!(label = rule.label, output = %output.name, "monitor rule matched");
            map.insert(rule.label, output);
        }
    }

    Matched { map }
}
