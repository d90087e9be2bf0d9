// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Registry`] of [`StepDefinition`]s and the resolution of step lines.

use std::{fmt, slice, sync::Arc};

use crate::{
    error::{
        AmbiguousDefinition, DuplicateDefinition, MissingDefinition,
        ResolutionError,
    },
    step::StepDefinition,
};

/// Ordered collection of [`StepDefinition`]s.
///
/// Only ever appended to. Every step line is expected to match exactly one
/// [`StepDefinition`]: zero or several matches are reported as errors rather
/// than resolved by registration order.
pub struct Registry<W> {
    definitions: Vec<Arc<StepDefinition<W>>>,
}

// Implemented manually to omit redundant `W: Debug` trait bound, imposed by
// `#[derive(Debug)]`.
impl<W> fmt::Debug for Registry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.definitions).finish()
    }
}

// Implemented manually to omit redundant `W: Default` trait bound, imposed
// by `#[derive(Default)]`.
impl<W> Default for Registry<W> {
    fn default() -> Self {
        Self { definitions: Vec::new() }
    }
}

// Implemented manually to omit redundant `W: Clone` trait bound, imposed by
// `#[derive(Clone)]`.
impl<W> Clone for Registry<W> {
    fn clone(&self) -> Self {
        Self { definitions: self.definitions.clone() }
    }
}

impl<W> Registry<W> {
    /// Creates a new empty [`Registry`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the given [`StepDefinition`].
    ///
    /// Only the new definition is checked against the existing ones.
    ///
    /// # Errors
    ///
    /// With [`DuplicateDefinition`] if an already registered
    /// [`StepDefinition`] has the same [`Pattern`].
    ///
    /// [`Pattern`]: crate::step::Pattern
    pub fn register(
        &mut self,
        definition: StepDefinition<W>,
    ) -> Result<Arc<StepDefinition<W>>, DuplicateDefinition> {
        if let Some(existing) =
            self.definitions.iter().find(|d| d.conflicts_with(&definition))
        {
            return Err(DuplicateDefinition {
                pattern: definition.pattern().clone(),
                existing: existing.location(),
                new: definition.location(),
            });
        }

        tracing::debug!(
            pattern = %definition.pattern(),
            location = %definition.location(),
            adverb = definition.adverb(),
            "registered step definition",
        );
        let definition = Arc::new(definition);
        self.definitions.push(Arc::clone(&definition));
        Ok(definition)
    }

    /// Resolves the given step `text` into the only [`StepDefinition`]
    /// matching it.
    ///
    /// Scans the whole [`Registry`] on every call.
    ///
    /// # Errors
    ///
    /// - [`MissingDefinition`] if nothing matches.
    /// - [`AmbiguousDefinition`] if more than one [`StepDefinition`] matches.
    pub fn resolve(
        &self,
        text: &str,
    ) -> Result<Arc<StepDefinition<W>>, ResolutionError> {
        let mut found = self
            .definitions
            .iter()
            .filter(|d| d.is_match(text))
            .collect::<Vec<_>>();

        match found.len() {
            0 => {
                tracing::debug!(step = text, "no step definition matches");
                Err(MissingDefinition { step: text.to_owned() }.into())
            }
            // Instead of `.unwrap()` to avoid documenting `# Panics`.
            1 => Ok(Arc::clone(found.pop().unwrap_or_else(|| unreachable!()))),
            n => {
                tracing::debug!(
                    step = text,
                    matches = n,
                    "step matches several definitions",
                );
                Err(AmbiguousDefinition {
                    step: text.to_owned(),
                    candidates: found
                        .into_iter()
                        .map(|d| (d.pattern().clone(), d.location()))
                        .collect(),
                }
                .into())
            }
        }
    }

    /// Iterates over the registered [`StepDefinition`]s in registration
    /// order.
    pub fn iter(&self) -> slice::Iter<'_, Arc<StepDefinition<W>>> {
        self.definitions.iter()
    }

    /// Returns the number of registered [`StepDefinition`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Indicates whether no [`StepDefinition`] is registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'r, W> IntoIterator for &'r Registry<W> {
    type Item = &'r Arc<StepDefinition<W>>;
    type IntoIter = slice::Iter<'r, Arc<StepDefinition<W>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{Location, Pattern};

    struct State;

    fn definition(pattern: &str, line: u32) -> StepDefinition<State> {
        StepDefinition::new(
            Pattern::regex(pattern).unwrap(),
            |_, _| Ok(()),
            Location::new("steps.rs", line, 1),
        )
    }

    #[test]
    fn rejects_identical_pattern() {
        let mut registry = Registry::new();
        _ = registry.register(definition(r"^I have (\d+) cukes$", 1)).unwrap();

        let err = registry
            .register(definition(r"^I have (\d+) cukes$", 2))
            .unwrap_err();

        assert_eq!(err.existing.line, 1);
        assert_eq!(err.new.line, 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn keeps_registration_order() {
        let mut registry = Registry::new();
        _ = registry.register(definition("^b$", 1)).unwrap();
        _ = registry.register(definition("^a$", 2)).unwrap();

        let patterns = registry
            .iter()
            .map(|d| d.pattern().as_str().to_owned())
            .collect::<Vec<_>>();

        assert_eq!(patterns, ["^b$", "^a$"]);
    }

    #[test]
    fn resolves_single_match() {
        let mut registry = Registry::new();
        let registered =
            registry.register(definition(r"^I have (\d+) cukes$", 1)).unwrap();
        _ = registry.register(definition(r"^I eat (\d+) cukes$", 2)).unwrap();

        let found = registry.resolve("I have 7 cukes").unwrap();

        assert!(Arc::ptr_eq(&found, &registered));
    }

    #[test]
    fn reports_missing() {
        let mut registry = Registry::new();
        _ = registry.register(definition(r"^I have (\d+) cukes$", 1)).unwrap();

        let err = registry.resolve("I have no cukes").unwrap_err();

        assert!(matches!(
            err,
            ResolutionError::Missing(MissingDefinition { ref step }) if step == "I have no cukes",
        ));
        assert!(Registry::<State>::new().resolve("anything").is_err());
    }

    #[test]
    fn reports_every_ambiguous_candidate() {
        let mut registry = Registry::new();
        _ = registry.register(definition(r"^I have (\d+) cukes$", 1)).unwrap();
        _ = registry.register(definition(r"^I have (.*) cukes$", 2)).unwrap();
        _ = registry.register(definition(r"^I eat (.*) cukes$", 3)).unwrap();

        let ResolutionError::Ambiguous(err) =
            registry.resolve("I have 7 cukes").unwrap_err()
        else {
            panic!("expected ambiguity");
        };

        assert_eq!(err.candidates.len(), 2);
        assert_eq!(
            err.candidates.iter().map(|(_, l)| l.line).collect::<Vec<_>>(),
            [1, 2],
        );
        assert!(registry.resolve("I have many cukes").is_ok());
    }
}
