// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Invocation`] of a resolved [`StepDefinition`].

use std::{fmt, sync::Arc};

use crate::{
    error::StepError,
    step::{ArgFormat, Argument, Location, StepDefinition},
    World,
};

/// Step line resolved to its [`StepDefinition`] and bound to the [`World`] it
/// is going to be executed against.
///
/// Transient: built by [`Dispatcher::dispatch()`] and consumed by
/// [`Invocation::execute()`].
///
/// [`Dispatcher::dispatch()`]: crate::Dispatcher::dispatch
pub struct Invocation<'w, W> {
    world: &'w mut World<W>,
    definition: Arc<StepDefinition<W>>,
    step: String,
}

impl<W> fmt::Debug for Invocation<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("definition", &self.definition)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}

impl<'w, W> Invocation<'w, W> {
    pub(crate) fn new(
        world: &'w mut World<W>,
        definition: Arc<StepDefinition<W>>,
        step: impl Into<String>,
    ) -> Self {
        Self { world, definition, step: step.into() }
    }

    /// Returns the resolved [`StepDefinition`].
    #[must_use]
    pub const fn definition(&self) -> &Arc<StepDefinition<W>> {
        &self.definition
    }

    /// Returns the literal step text.
    #[must_use]
    pub fn step(&self) -> &str {
        &self.step
    }

    /// Returns the bound [`World`].
    #[must_use]
    pub fn world(&self) -> &World<W> {
        self.world
    }

    /// Executes the step body against the bound [`World`], passing it the
    /// captured arguments along with the given multiline `arguments`.
    ///
    /// Neither failures nor panics of the body are caught here: reporting
    /// them is up to the caller.
    ///
    /// # Errors
    ///
    /// - [`StepError::NestingLimit`] if a nesting limit is configured and
    ///   this invocation would exceed it.
    /// - [`StepError::Pending`] if the body declared itself unimplemented.
    /// - Any error of a nested invocation the body propagated.
    /// - [`StepError::Failed`] with whatever else the body returned.
    pub fn execute(
        self,
        arguments: impl IntoIterator<Item = Argument>,
    ) -> Result<(), StepError> {
        let Self { world, definition, step } = self;

        if let Some(limit) = world.dispatcher().max_nesting() {
            if world.depth > limit {
                return Err(StepError::NestingLimit { step, limit });
            }
        }

        let span = tracing::debug_span!(
            "step",
            step = %step,
            depth = world.depth,
            location = %definition.location(),
        );
        let _entered = span.enter();

        world.depth += 1;
        let result =
            definition.execute(world, &step, arguments.into_iter().collect());
        world.depth -= 1;

        match &result {
            Ok(()) => tracing::debug!("step passed"),
            Err(e) if e.is_pending() => {
                tracing::debug!(error = %e, "step pending");
            }
            Err(e) => tracing::debug!(error = %e, "step failed"),
        }
        result
    }

    /// Renders the step text with every matched argument passed through the
    /// given [`ArgFormat`]: either a template with `{}` placeholders or a
    /// function.
    #[must_use]
    pub fn format_args<'f>(&self, format: impl Into<ArgFormat<'f>>) -> String {
        self.definition.format_args(&self.step, format)
    }

    /// Returns where the resolved [`StepDefinition`] was registered.
    #[must_use]
    pub fn location(&self) -> Location {
        self.definition.location()
    }

    /// Returns the `file:line` of the resolved [`StepDefinition`].
    #[must_use]
    pub fn file_colon_line(&self) -> String {
        self.location().file_colon_line()
    }
}
