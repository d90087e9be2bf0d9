// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Pattern`] a [`StepDefinition`] is matched by.
//!
//! [`StepDefinition`]: super::StepDefinition

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    ops::Range,
};

use derive_more::with_trait::{Debug, Display, Error};
use regex::Regex;
use sealed::sealed;

/// Name of a capturing group inside a [`Pattern`].
pub type CaptureName = Option<String>;

/// Capturing group of a [`Pattern`] applied to some text: its name and the
/// byte range it matched, if it participated in the match.
pub type Capture = (CaptureName, Option<Range<usize>>);

/// Textual pattern of a [`StepDefinition`].
///
/// Always backed by a compiled [`Regex`]. When constructed from a
/// [Cucumber Expression][0], the original expression is kept for display.
///
/// Two [`Pattern`]s are equal if their [`Regex`] sources are equal, which is
/// what duplicate detection relies on.
///
/// [`StepDefinition`]: super::StepDefinition
/// [0]: https://github.com/cucumber/cucumber-expressions#readme
#[derive(Clone, Debug, Display)]
#[display("{}", expression.as_deref().unwrap_or(regex.as_str()))]
pub struct Pattern {
    /// Compiled [`Regex`] doing the actual matching.
    regex: Regex,

    /// [Cucumber Expression][0] this [`Pattern`] was translated from, if any.
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    expression: Option<String>,
}

impl Pattern {
    /// Compiles a [`Pattern`] out of a raw regular expression.
    ///
    /// The regex is used as is: it isn't anchored implicitly.
    ///
    /// # Errors
    ///
    /// If the `source` is not a valid [`Regex`].
    pub fn regex(source: &str) -> Result<Self, PatternError> {
        Ok(Regex::new(source)?.into())
    }

    /// Compiles a [`Pattern`] out of a [Cucumber Expression][0], like
    /// `I have {int} cukes`.
    ///
    /// # Errors
    ///
    /// If the `source` is not a valid [Cucumber Expression][0].
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    #[cfg(feature = "expressions")]
    pub fn expression(source: &str) -> Result<Self, PatternError> {
        let regex = cucumber_expressions::Expression::regex(source).map_err(
            |e| PatternError::Expression {
                expression: source.to_owned(),
                reason: e.to_string(),
            },
        )?;
        Ok(Self { regex, expression: Some(source.to_owned()) })
    }

    /// Returns the source of the underlying [`Regex`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the underlying [`Regex`].
    #[must_use]
    pub const fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the [Cucumber Expression][0] this [`Pattern`] was built from.
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    #[must_use]
    pub fn expression_source(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Checks whether this [`Pattern`] matches the given `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Applies this [`Pattern`] to the given `text`, returning all its
    /// capturing groups. The first one is always the whole match.
    ///
    /// [`None`] if the `text` doesn't match.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<Capture>> {
        let mut locs = self.regex.capture_locations();
        _ = self.regex.captures_read(&mut locs, text)?;

        Some(
            self.regex
                .capture_names()
                .enumerate()
                .map(|(i, name)| {
                    (name.map(str::to_owned), locs.get(i).map(|(s, e)| s..e))
                })
                .collect(),
        )
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self { regex, expression: None }
    }
}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl PartialOrd for Pattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

/// Error of compiling a [`Pattern`].
#[derive(Clone, Debug, Display, Error)]
pub enum PatternError {
    /// Source is not a valid regular expression.
    #[display("invalid regex: {_0}")]
    Regex(regex::Error),

    /// Source is not a valid [Cucumber Expression][0].
    ///
    /// [0]: https://github.com/cucumber/cucumber-expressions#readme
    #[display("invalid Cucumber Expression `{expression}`: {reason}")]
    Expression {
        /// The rejected expression.
        expression: String,

        /// Why it was rejected.
        reason: String,
    },
}

impl From<regex::Error> for PatternError {
    fn from(e: regex::Error) -> Self {
        Self::Regex(e)
    }
}

/// Conversion into a [`Pattern`], accepted by every registration method.
///
/// Strings are treated as raw regular expressions. Use
/// [`Pattern::expression()`] for [Cucumber Expressions][0].
///
/// [0]: https://github.com/cucumber/cucumber-expressions#readme
#[sealed]
pub trait IntoPattern {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// If the source doesn't compile.
    fn into_pattern(self) -> Result<Pattern, PatternError>;
}

#[sealed]
impl IntoPattern for Pattern {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Ok(self)
    }
}

#[sealed]
impl IntoPattern for Regex {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Ok(self.into())
    }
}

#[sealed]
impl<'s> IntoPattern for &'s str {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Pattern::regex(self)
    }
}

#[sealed]
impl IntoPattern for String {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        Pattern::regex(&self)
    }
}
