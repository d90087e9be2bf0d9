// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error taxonomy of step registration and dispatch.
//!
//! Every error is returned synchronously by the operation detecting it and is
//! never swallowed or retried inside this crate:
//!
//! - [`registration`]: [`DuplicateDefinition`] and friends, at load time;
//! - [`resolution`]: [`MissingDefinition`] and [`AmbiguousDefinition`];
//! - [`setup`]: [`SetupError`] of building a [`World`];
//! - [`step`]: [`StepError`] of executing a step, including [`Pending`].
//!
//! [`World`]: crate::World

pub mod registration;
pub mod resolution;
pub mod setup;
pub mod step;

pub use self::{
    registration::{DuplicateDefinition, RegistrationError},
    resolution::{AmbiguousDefinition, MissingDefinition, ResolutionError},
    setup::{BoxError, SetupError},
    step::{Pending, StepError},
};
pub use crate::{adverb::UnknownAdverb, step::PatternError};
