// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of resolving a step line into a [`StepDefinition`].
//!
//! [`StepDefinition`]: crate::StepDefinition

use std::fmt;

use derive_more::with_trait::{Display, Error, From};
use itertools::Itertools as _;

use crate::step::{Location, Pattern};

/// Error of a step line matching no [`StepDefinition`] at all.
///
/// [`StepDefinition`]: crate::StepDefinition
#[derive(Clone, Debug, Display, Error)]
#[display("undefined step `{step}`")]
pub struct MissingDefinition {
    /// The unmatched step text.
    #[error(not(source))]
    pub step: String,
}

/// Error of a step line matching multiple [`StepDefinition`]s.
///
/// No implicit tie-break is ever applied.
///
/// [`StepDefinition`]: crate::StepDefinition
#[derive(Clone, Debug, Error)]
pub struct AmbiguousDefinition {
    /// The ambiguous step text.
    #[error(not(source))]
    pub step: String,

    /// Every colliding [`Pattern`] along with its registration [`Location`],
    /// in registration order.
    pub candidates: Vec<(Pattern, Location)>,
}

impl AmbiguousDefinition {
    /// Iterates over the colliding [`Pattern`]s.
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.candidates.iter().map(|(p, _)| p)
    }
}

impl fmt::Display for AmbiguousDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ambiguous step `{}` matches {} step definitions:",
            self.step,
            self.candidates.len(),
        )?;
        for (pattern, loc) in self.candidates.iter().sorted() {
            write!(f, "\n{pattern} --> {loc}")?;
        }
        Ok(())
    }
}

/// Error of resolving a step line.
#[derive(Clone, Debug, Display, Error, From)]
pub enum ResolutionError {
    /// Nothing matched.
    Missing(MissingDefinition),

    /// More than one definition matched.
    Ambiguous(AmbiguousDefinition),
}

impl ResolutionError {
    /// Returns the step text that failed to resolve.
    #[must_use]
    pub fn step(&self) -> &str {
        match self {
            Self::Missing(e) => &e.step,
            Self::Ambiguous(e) => &e.step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_lists_sorted_candidates() {
        let err = AmbiguousDefinition {
            step: "I have 7 cukes".into(),
            candidates: vec![
                (
                    Pattern::regex(r"^I have (\d+) cukes$").unwrap(),
                    Location::new("steps.rs", 3, 5),
                ),
                (
                    Pattern::regex(r"^I have (.*) cukes$").unwrap(),
                    Location::new("steps.rs", 9, 5),
                ),
            ],
        };

        assert_eq!(
            err.to_string(),
            "ambiguous step `I have 7 cukes` matches 2 step definitions:\n\
             ^I have (.*) cukes$ --> steps.rs:9:5\n\
             ^I have (\\d+) cukes$ --> steps.rs:3:5",
        );
        assert_eq!(err.patterns().count(), 2);
    }

    #[test]
    fn resolution_error_keeps_step_text() {
        let err = ResolutionError::from(MissingDefinition {
            step: "I have no cukes".into(),
        });

        assert_eq!(err.step(), "I have no cukes");
        assert_eq!(err.to_string(), "undefined step `I have no cukes`");
    }
}
