// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building blocks of a [`StepDefinition`]:
//!
//! - [`pattern`]: [`Pattern`] a step line is matched against;
//! - [`definition`]: the [`StepDefinition`] itself;
//! - [`context`]: [`Context`] handed to a step body;
//! - [`argument`]: multiline [`Argument`]s of a step line;
//! - [`format`]: [`ArgFormat`] for highlighting matched arguments;
//! - [`location`]: [`Location`] of a registration.

pub mod argument;
pub mod context;
pub mod definition;
pub mod format;
pub mod location;
pub mod pattern;

pub use self::{
    argument::{Argument, Table},
    context::Context,
    definition::{Body, StepDefinition},
    format::ArgFormat,
    location::Location,
    pattern::{Capture, CaptureName, IntoPattern, Pattern, PatternError},
};

use crate::error::Pending;

/// Marks the calling step body as intentionally unimplemented.
///
/// ```rust
/// # use cucumber_dispatch::step;
/// fn body() -> anyhow::Result<()> {
///     step::pending("waiting for the fridge API")
/// }
///
/// let err = body().unwrap_err();
/// assert!(err.downcast_ref::<cucumber_dispatch::error::Pending>().is_some());
/// ```
///
/// # Errors
///
/// Always, with a [`Pending`] marker carrying the `message`.
pub fn pending<T>(message: impl Into<String>) -> anyhow::Result<T> {
    Err(Pending::new(message).into())
}
