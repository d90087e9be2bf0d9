// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-scenario execution context.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use derive_more::with_trait::{Deref, DerefMut};

use crate::{
    dispatch::Dispatcher,
    error::StepError,
    step::{self, Argument},
};

/// Mutable state of a single [scenario][0], shared by all its steps and
/// discarded once it finishes.
///
/// Derefs to the user-defined state `W`, built by the registered world
/// factories. On top of it, a [`World`] is able to invoke other steps by name
/// ([`World::invoke()`]) and carries optional capabilities attached by the
/// host framework ([`World::capability()`]).
///
/// This crate deliberately provides no way of sharing a [`World`] between
/// scenarios.
///
/// [0]: https://cucumber.io/docs/gherkin/reference#example
#[derive(Deref, DerefMut)]
pub struct World<W> {
    /// User-defined state.
    #[deref]
    #[deref_mut]
    state: W,

    /// Back-reference for invoking steps by name.
    dispatcher: Arc<Dispatcher<W>>,

    /// Scenario this [`World`] was built for.
    scenario: ScenarioInfo,

    /// Capabilities attached by the host framework.
    extensions: Extensions,

    /// Number of step invocations currently executing against this [`World`].
    pub(crate) depth: usize,
}

impl<W: fmt::Debug> fmt::Debug for World<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("state", &self.state)
            .field("scenario", &self.scenario)
            .field("extensions", &self.extensions)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl<W> World<W> {
    pub(crate) fn new(
        state: W,
        dispatcher: Arc<Dispatcher<W>>,
        scenario: ScenarioInfo,
    ) -> Self {
        Self {
            state,
            dispatcher,
            scenario,
            extensions: Extensions::default(),
            depth: 0,
        }
    }

    /// Returns the user-defined state.
    #[must_use]
    pub const fn state(&self) -> &W {
        &self.state
    }

    /// Returns the user-defined state mutably.
    #[must_use]
    pub fn state_mut(&mut self) -> &mut W {
        &mut self.state
    }

    /// Unwraps the user-defined state, dropping everything else.
    #[must_use]
    pub fn into_state(self) -> W {
        self.state
    }

    /// Returns the scenario this [`World`] was built for.
    #[must_use]
    pub const fn scenario(&self) -> &ScenarioInfo {
        &self.scenario
    }

    /// Returns the [`Dispatcher`] this [`World`] invokes steps through.
    #[must_use]
    pub const fn dispatcher(&self) -> &Arc<Dispatcher<W>> {
        &self.dispatcher
    }

    /// Returns how many step invocations are currently executing against
    /// this [`World`]: `1` inside a top-level step body, `2` inside a step it
    /// invoked, and so on.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the attached capability of type `T`, if the host framework
    /// provided one.
    #[must_use]
    pub fn capability<T: Any>(&self) -> Option<&T> {
        self.extensions.get()
    }

    /// Returns the attached capability of type `T` mutably, if the host
    /// framework provided one.
    #[must_use]
    pub fn capability_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.extensions.get_mut()
    }

    pub(crate) fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// Invokes the step matching the given `text` right away, against this
    /// very [`World`].
    ///
    /// Any mutation made by the invoked step is visible to the caller once
    /// this method returns.
    ///
    /// # Errors
    ///
    /// If the `text` doesn't resolve to exactly one step definition, or the
    /// invoked step fails. Returning the error out of the calling step body
    /// (with `?`) keeps its kind, so a [`Pending`] nested step makes the
    /// outer one pending as well.
    ///
    /// [`Pending`]: crate::error::Pending
    pub fn invoke(
        &mut self,
        text: &str,
        arguments: impl IntoIterator<Item = Argument>,
    ) -> Result<(), StepError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        dispatcher.dispatch(text, self)?.execute(arguments)
    }

    /// Same as [`World::invoke()`], but goes through the given `adverb`, like
    /// `world.invoke_as("Gitt", "I have 3 cukes", [])`.
    ///
    /// # Errors
    ///
    /// If the `adverb` isn't installed, or for the same reasons as
    /// [`World::invoke()`].
    pub fn invoke_as(
        &mut self,
        adverb: &str,
        text: &str,
        arguments: impl IntoIterator<Item = Argument>,
    ) -> Result<(), StepError> {
        self.dispatcher.adverbs().check(adverb)?;
        self.invoke(text, arguments)
    }

    /// Marks the calling step body as intentionally unimplemented.
    ///
    /// # Errors
    ///
    /// Always, with a [`Pending`] marker carrying the `message`.
    ///
    /// [`Pending`]: crate::error::Pending
    pub fn pending<T>(&self, message: impl Into<String>) -> anyhow::Result<T> {
        step::pending(message)
    }
}

/// Description of the scenario a [`World`] is built for, handed to world
/// factories and setup hooks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScenarioInfo {
    /// Name of the scenario.
    pub name: String,

    /// Tags of the scenario, without the leading `@`.
    pub tags: Vec<String>,
}

impl ScenarioInfo {
    /// Creates a new untagged [`ScenarioInfo`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), tags: Vec::new() }
    }

    /// Adds the given `tags`.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Checks whether the scenario is tagged with the given `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.strip_prefix('@').unwrap_or(tag);
        self.tags.iter().any(|t| t == tag)
    }
}

impl From<&str> for ScenarioInfo {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&gherkin::Scenario> for ScenarioInfo {
    fn from(scenario: &gherkin::Scenario) -> Self {
        Self::new(scenario.name.clone())
            .with_tags(scenario.tags.iter().cloned())
    }
}

/// Type-indexed map of capabilities attached to a [`World`].
#[derive(Default)]
pub struct Extensions(HashMap<TypeId, Box<dyn Any + Send>>);

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions").field("len", &self.0.len()).finish()
    }
}

impl Extensions {
    /// Attaches the given `value`, replacing the previous one of the same
    /// type.
    pub fn insert<T: Any + Send>(&mut self, value: T) -> Option<T> {
        self.0
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast().ok().map(|b| *b))
    }

    /// Returns the attached value of type `T`.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.get(&TypeId::of::<T>())?.downcast_ref()
    }

    /// Returns the attached value of type `T` mutably.
    #[must_use]
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// Returns the number of attached values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
