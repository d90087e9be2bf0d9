// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of registering [`StepDefinition`]s.
//!
//! [`StepDefinition`]: crate::StepDefinition

use derive_more::with_trait::{Display, Error, From};

use crate::{
    adverb::UnknownAdverb,
    step::{Location, Pattern, PatternError},
};

/// Error of registering a [`StepDefinition`] whose [`Pattern`] is already
/// taken by another one.
///
/// [`StepDefinition`]: crate::StepDefinition
#[derive(Clone, Debug, Display, Error)]
#[display(
    "duplicate step definition `{pattern}`: already registered at \
     {existing}, registered again at {new}"
)]
pub struct DuplicateDefinition {
    /// [`Pattern`] both definitions share.
    #[error(not(source))]
    pub pattern: Pattern,

    /// [`Location`] of the already registered definition.
    pub existing: Location,

    /// [`Location`] of the rejected definition.
    pub new: Location,
}

/// Error of a registration call.
#[derive(Clone, Debug, Display, Error, From)]
pub enum RegistrationError {
    /// [`Pattern`] conflicts with an existing one.
    Duplicate(DuplicateDefinition),

    /// [`Pattern`] doesn't compile.
    #[display("cannot register step: {_0}")]
    Pattern(PatternError),

    /// Registration went through an adverb nobody installed.
    #[display("cannot register step: {_0}")]
    UnknownAdverb(UnknownAdverb),
}
