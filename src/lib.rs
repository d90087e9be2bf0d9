// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step registration and dispatch core of a [Cucumber] test runner.
//!
//! Maps plain-language step lines (like `I have 7 cukes`) onto registered
//! step definitions, and executes them against a per-scenario [`World`].
//!
//! 1. Register step definitions, world factories and setup hooks on
//!    [`Steps`].
//! 2. Call [`Steps::finish()`] to obtain a read-only [`Dispatcher`].
//! 3. For every scenario, build a fresh [`World`] with
//!    [`Dispatcher::build_world()`], and dispatch each of its step lines with
//!    [`Dispatcher::dispatch()`].
//!
//! Step bodies may invoke other steps by name via [`World::invoke()`], sharing
//! the very same [`World`].
//!
//! ```rust
//! use cucumber_dispatch::{error::StepError, Steps};
//!
//! #[derive(Default)]
//! struct Fridge {
//!     cukes: u32,
//! }
//!
//! let mut steps = Steps::<Fridge>::new();
//! steps.given(r"^I have (\d+) cukes$", |w, ctx| {
//!     w.cukes = ctx.parse(0)?;
//!     Ok(())
//! })?;
//! steps.when(r"^I eat (\d+) cukes$", |w, ctx| {
//!     w.cukes -= ctx.parse::<u32>(0)?;
//!     Ok(())
//! })?;
//! steps.when(r"^I have a snack$", |w, _| {
//!     w.invoke("I have 5 cukes", [])?;
//!     w.invoke("I eat 2 cukes", [])?;
//!     Ok(())
//! })?;
//!
//! let dispatcher = steps.finish();
//! let mut world = dispatcher.build_world("snacking")?;
//!
//! dispatcher.dispatch("I have a snack", &mut world)?.execute([])?;
//! assert_eq!(world.cukes, 3);
//!
//! let err = dispatcher.dispatch("I have no cukes", &mut world).unwrap_err();
//! assert!(matches!(StepError::from(err), StepError::Undefined(_)));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! [Cucumber]: https://cucumber.io

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(non_ascii_idents, unsafe_code)]

pub mod adverb;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod invocation;
mod macros;
pub mod registry;
pub mod step;
pub mod world;

pub use gherkin;

#[doc(inline)]
pub use self::{
    adverb::Adverbs,
    cli::Cli,
    dispatch::{Dispatcher, Steps},
    invocation::Invocation,
    registry::Registry,
    step::{
        pending, ArgFormat, Argument, Context, IntoPattern, Location, Pattern,
        StepDefinition, Table,
    },
    world::{Extensions, ScenarioInfo, World},
};
