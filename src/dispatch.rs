// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Entry surface used by scenario runners.
//!
//! Lifecycle is split in two phases:
//! 1. Load phase: steps, adverbs, world factories and setup hooks are
//!    registered on a mutable [`Steps`].
//! 2. Run phase: [`Steps::finish()`] freezes everything into a read-only
//!    [`Dispatcher`], which builds a [`World`] per scenario and resolves step
//!    lines into [`Invocation`]s.

use std::{any::Any, fmt, sync::Arc};

use crate::{
    adverb::Adverbs,
    cli::Cli,
    error::{RegistrationError, ResolutionError, SetupError, StepError},
    invocation::Invocation,
    registry::Registry,
    step::{Argument, Context, IntoPattern, Location, StepDefinition},
    world::{Extensions, ScenarioInfo, World},
};

/// Function building the next [`World`] state out of the previous one.
pub type WorldFactory<W> =
    dyn Fn(W, &ScenarioInfo) -> anyhow::Result<W> + Send + Sync;

/// Function run against every freshly built [`World`] before its scenario's
/// steps.
pub type SetupHook<W> =
    dyn Fn(&mut World<W>) -> anyhow::Result<()> + Send + Sync;

/// Function attaching a capability to a [`World`].
type Attach = dyn Fn(&mut Extensions) + Send + Sync;

/// Load phase of a [`Dispatcher`]: collects step definitions, adverbs, world
/// factories, setup hooks and capabilities.
///
/// # Example
///
/// ```rust
/// # use cucumber_dispatch::Steps;
/// #[derive(Default)]
/// struct Cukes(u32);
///
/// let mut steps = Steps::<Cukes>::new();
/// steps.given(r"^I have (\d+) cukes$", |w, ctx| {
///     w.0 = ctx.parse(0)?;
///     Ok(())
/// })?;
///
/// let dispatcher = steps.finish();
/// let mut world = dispatcher.build_world("counting")?;
/// dispatcher.dispatch("I have 7 cukes", &mut world)?.execute([])?;
/// assert_eq!(world.0, 7);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct Steps<W> {
    registry: Registry<W>,
    adverbs: Adverbs,
    factories: Vec<Box<WorldFactory<W>>>,
    hooks: Vec<Box<SetupHook<W>>>,
    capabilities: Vec<Box<Attach>>,
    max_nesting: Option<usize>,
}

impl<W> fmt::Debug for Steps<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Steps")
            .field("registry", &self.registry)
            .field("adverbs", &self.adverbs)
            .field("factories", &self.factories.len())
            .field("hooks", &self.hooks.len())
            .field("capabilities", &self.capabilities.len())
            .field("max_nesting", &self.max_nesting)
            .finish()
    }
}

// Implemented manually to omit redundant `W: Default` trait bound, imposed
// by `#[derive(Default)]`.
impl<W> Default for Steps<W> {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            adverbs: Adverbs::default(),
            factories: Vec::new(),
            hooks: Vec::new(),
            capabilities: Vec::new(),
            max_nesting: None,
        }
    }
}

impl<W> Steps<W> {
    /// Creates a new [`Steps`] with no definitions and the default
    /// [`Adverbs`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step definition not tied to any adverb.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::Pattern`] if the `pattern` doesn't compile.
    /// - [`RegistrationError::Duplicate`] if the `pattern` is already taken.
    #[track_caller]
    pub fn step<P, F>(
        &mut self,
        pattern: P,
        body: F,
    ) -> Result<Arc<StepDefinition<W>>, RegistrationError>
    where
        P: IntoPattern,
        F: Fn(&mut World<W>, &Context) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        let location = Location::caller();
        let definition =
            StepDefinition::new(pattern.into_pattern()?, body, location);
        Ok(self.registry.register(definition)?)
    }

    /// Registers a step definition through the given `adverb`.
    ///
    /// The `adverb` only has to be installed: the definition is resolvable
    /// regardless of which adverb later invokes it.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::UnknownAdverb`] if the `adverb` isn't installed.
    /// - Same as [`Steps::step()`].
    #[track_caller]
    pub fn step_as<P, F>(
        &mut self,
        adverb: &str,
        pattern: P,
        body: F,
    ) -> Result<Arc<StepDefinition<W>>, RegistrationError>
    where
        P: IntoPattern,
        F: Fn(&mut World<W>, &Context) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        let location = Location::caller();
        self.adverbs.check(adverb)?;
        let definition =
            StepDefinition::new(pattern.into_pattern()?, body, location)
                .with_adverb(adverb);
        Ok(self.registry.register(definition)?)
    }

    /// Registers a [Given] step definition.
    ///
    /// # Errors
    ///
    /// Same as [`Steps::step()`].
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference#given
    #[track_caller]
    pub fn given<P, F>(
        &mut self,
        pattern: P,
        body: F,
    ) -> Result<Arc<StepDefinition<W>>, RegistrationError>
    where
        P: IntoPattern,
        F: Fn(&mut World<W>, &Context) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.step_as("Given", pattern, body)
    }

    /// Registers a [When] step definition.
    ///
    /// # Errors
    ///
    /// Same as [`Steps::step()`].
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference#when
    #[track_caller]
    pub fn when<P, F>(
        &mut self,
        pattern: P,
        body: F,
    ) -> Result<Arc<StepDefinition<W>>, RegistrationError>
    where
        P: IntoPattern,
        F: Fn(&mut World<W>, &Context) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.step_as("When", pattern, body)
    }

    /// Registers a [Then] step definition.
    ///
    /// # Errors
    ///
    /// Same as [`Steps::step()`].
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference#then
    #[track_caller]
    pub fn then<P, F>(
        &mut self,
        pattern: P,
        body: F,
    ) -> Result<Arc<StepDefinition<W>>, RegistrationError>
    where
        P: IntoPattern,
        F: Fn(&mut World<W>, &Context) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.step_as("Then", pattern, body)
    }

    /// Installs the given `adverb` as a synonym for registering and invoking
    /// steps, like the Norwegian `Gitt`.
    pub fn adverb(&mut self, adverb: impl Into<String>) -> &mut Self {
        let adverb = adverb.into();
        if self.adverbs.insert(adverb.clone()) {
            tracing::debug!(adverb = %adverb, "installed adverb");
        }
        self
    }

    /// Installs all the given `adverbs`, like `["Gitt", "Når", "Så"]`.
    pub fn adverbs<I, S>(&mut self, adverbs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for adverb in adverbs {
            _ = self.adverb(adverb);
        }
        self
    }

    /// Appends a world factory.
    ///
    /// Factories run in registration order, each one receiving the state
    /// returned by the previous one (the first one receives
    /// [`Default::default()`]). A factory may return a wholly different
    /// value.
    pub fn world<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn(W, &ScenarioInfo) -> anyhow::Result<W> + Send + Sync + 'static,
    {
        self.factories.push(Box::new(factory));
        self
    }

    /// Appends a setup hook, run in registration order against every fully
    /// built [`World`] before any step of its scenario.
    pub fn before<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut World<W>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Attaches a capability of type `T`, created by the given function, to
    /// every [`World`]. Step bodies access it via [`World::capability()`].
    pub fn capability<T, F>(&mut self, make: F) -> &mut Self
    where
        T: Any + Send,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.capabilities.push(Box::new(move |ext: &mut Extensions| {
            _ = ext.insert(make());
        }));
        self
    }

    /// Limits how deep steps may invoke other steps. With `0`, steps can't
    /// invoke other steps at all.
    ///
    /// Unlimited by default.
    pub fn max_nesting(
        &mut self,
        limit: impl Into<Option<usize>>,
    ) -> &mut Self {
        self.max_nesting = limit.into();
        self
    }

    /// Applies the given [`Cli`] options.
    pub fn with_cli(&mut self, cli: Cli) -> &mut Self {
        let Cli { max_step_nesting, adverbs } = cli;
        if max_step_nesting.is_some() {
            self.max_nesting = max_step_nesting;
        }
        self.adverbs(adverbs)
    }

    /// Returns the [`Registry`] collected so far.
    #[must_use]
    pub const fn registry(&self) -> &Registry<W> {
        &self.registry
    }

    /// Ends the load phase.
    #[must_use]
    pub fn finish(self) -> Arc<Dispatcher<W>> {
        let Self {
            registry,
            adverbs,
            factories,
            hooks,
            capabilities,
            max_nesting,
        } = self;
        tracing::debug!(
            steps = registry.len(),
            factories = factories.len(),
            hooks = hooks.len(),
            "step registration finished",
        );
        Arc::new(Dispatcher {
            registry,
            adverbs,
            factories,
            hooks,
            capabilities,
            max_nesting,
        })
    }
}

/// Run phase of [`Steps`]: read-only, shared by every [`World`] it builds.
pub struct Dispatcher<W> {
    registry: Registry<W>,
    adverbs: Adverbs,
    factories: Vec<Box<WorldFactory<W>>>,
    hooks: Vec<Box<SetupHook<W>>>,
    capabilities: Vec<Box<Attach>>,
    max_nesting: Option<usize>,
}

impl<W> fmt::Debug for Dispatcher<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("adverbs", &self.adverbs)
            .field("factories", &self.factories.len())
            .field("hooks", &self.hooks.len())
            .field("capabilities", &self.capabilities.len())
            .field("max_nesting", &self.max_nesting)
            .finish()
    }
}

impl<W> Dispatcher<W> {
    /// Returns the [`Registry`] of step definitions.
    #[must_use]
    pub const fn registry(&self) -> &Registry<W> {
        &self.registry
    }

    /// Returns the installed [`Adverbs`].
    #[must_use]
    pub const fn adverbs(&self) -> &Adverbs {
        &self.adverbs
    }

    /// Returns the configured nesting limit, if any.
    #[must_use]
    pub const fn max_nesting(&self) -> Option<usize> {
        self.max_nesting
    }

    /// Resolves the step `text` and binds the result to the given `world`.
    ///
    /// # Errors
    ///
    /// If the `text` doesn't resolve to exactly one step definition.
    pub fn dispatch<'w>(
        &self,
        text: &str,
        world: &'w mut World<W>,
    ) -> Result<Invocation<'w, W>, ResolutionError> {
        let definition = self.registry.resolve(text)?;
        Ok(Invocation::new(world, definition, text))
    }

    /// Same as [`Dispatcher::dispatch()`], but first strips a leading
    /// installed adverb off the `line`, if there is one.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::dispatch()`].
    pub fn dispatch_line<'w>(
        &self,
        line: &str,
        world: &'w mut World<W>,
    ) -> Result<Invocation<'w, W>, ResolutionError> {
        let text = self.adverbs.split(line).map_or(line, |(_, text)| text);
        self.dispatch(text, world)
    }

    /// Resolves and executes an already parsed [`gherkin::Step`], passing its
    /// doc string and table as multiline arguments.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::dispatch()`] and [`Invocation::execute()`].
    pub fn execute_step(
        &self,
        step: &gherkin::Step,
        world: &mut World<W>,
    ) -> Result<(), StepError> {
        self.dispatch(&step.value, world)?
            .execute(Argument::from_step(step))
    }
}

impl<W: Default> Dispatcher<W> {
    /// Builds a fresh [`World`] for the given scenario.
    ///
    /// Threads [`Default::default()`] through every world factory in
    /// registration order, attaches the dispatch back-reference and all the
    /// capabilities, and runs every setup hook in registration order.
    ///
    /// The returned [`World`] should be reused for every step of the
    /// scenario, and dropped afterwards.
    ///
    /// # Errors
    ///
    /// With [`SetupError`] on the first failing factory or hook. Nothing is
    /// retried.
    pub fn build_world(
        self: &Arc<Self>,
        scenario: impl Into<ScenarioInfo>,
    ) -> Result<World<W>, SetupError> {
        let scenario = scenario.into();
        let span = tracing::debug_span!("world", scenario = %scenario.name);
        let _entered = span.enter();

        let mut state = W::default();
        for (index, factory) in self.factories.iter().enumerate() {
            tracing::trace!(index, "applying world factory");
            state = factory(state, &scenario).map_err(|e| {
                SetupError::Factory {
                    index,
                    scenario: scenario.name.clone(),
                    source: e.into(),
                }
            })?;
        }

        let mut world = World::new(state, Arc::clone(self), scenario);
        for attach in &self.capabilities {
            attach(world.extensions_mut());
        }

        for (index, hook) in self.hooks.iter().enumerate() {
            tracing::trace!(index, "running setup hook");
            if let Err(e) = hook(&mut world) {
                return Err(SetupError::Hook {
                    index,
                    scenario: world.scenario().name.clone(),
                    source: e.into(),
                });
            }
        }

        tracing::debug!("world is ready");
        Ok(world)
    }
}
