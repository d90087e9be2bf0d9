// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`StepDefinition`]: a [`Pattern`] bound to an executable body.

use std::fmt;

use super::{
    argument::Argument,
    context::Context,
    format::{self, ArgFormat},
    location::Location,
    pattern::Pattern,
};
use crate::{
    error::{MissingDefinition, StepError},
    World,
};

/// Executable body of a [`StepDefinition`].
pub type Body<W> =
    dyn Fn(&mut World<W>, &Context) -> anyhow::Result<()> + Send + Sync;

/// Registered step: a [`Pattern`] along with the body to execute for any step
/// line it matches.
///
/// Immutable once constructed.
pub struct StepDefinition<W> {
    pattern: Pattern,
    body: Box<Body<W>>,
    location: Location,
    adverb: Option<String>,
}

impl<W> fmt::Debug for StepDefinition<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("pattern", &self.pattern)
            .field("body", &format_args!("{:p}", self.body))
            .field("location", &self.location)
            .field("adverb", &self.adverb)
            .finish()
    }
}

impl<W> StepDefinition<W> {
    /// Creates a new [`StepDefinition`] registered at the given [`Location`].
    #[must_use]
    pub fn new<F>(pattern: Pattern, body: F, location: Location) -> Self
    where
        F: Fn(&mut World<W>, &Context) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        Self { pattern, body: Box::new(body), location, adverb: None }
    }

    /// Records the adverb this [`StepDefinition`] was registered through.
    #[must_use]
    pub fn with_adverb(mut self, adverb: impl Into<String>) -> Self {
        self.adverb = Some(adverb.into());
        self
    }

    /// Returns the [`Pattern`] of this [`StepDefinition`].
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns where this [`StepDefinition`] was registered.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Returns the adverb this [`StepDefinition`] was registered through, if
    /// any. Purely informational: it has no effect on matching.
    #[must_use]
    pub fn adverb(&self) -> Option<&str> {
        self.adverb.as_deref()
    }

    /// Checks whether the given step `text` matches this [`StepDefinition`].
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Checks whether another [`StepDefinition`] claims the same [`Pattern`].
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }

    /// Runs the body against the `world` for the given step `text`.
    ///
    /// # Errors
    ///
    /// - [`StepError::Undefined`] if the `text` doesn't match.
    /// - Whatever the body returns, classified by [`StepError`].
    pub fn execute(
        &self,
        world: &mut World<W>,
        text: &str,
        arguments: Vec<Argument>,
    ) -> Result<(), StepError> {
        let captures = self.pattern.captures(text).ok_or_else(|| {
            MissingDefinition { step: text.to_owned() }
        })?;
        let ctx = Context::new(text, &captures, arguments);
        (self.body)(world, &ctx).map_err(StepError::from_body)
    }

    /// Renders the step `text` with every matched argument passed through the
    /// given [`ArgFormat`]. Returns the `text` unchanged if it doesn't match.
    #[must_use]
    pub fn format_args<'f>(
        &self,
        text: &str,
        format: impl Into<ArgFormat<'f>>,
    ) -> String {
        self.pattern.captures(text).map_or_else(
            || text.to_owned(),
            |caps| format::format_args(text, &caps, format.into()),
        )
    }
}
