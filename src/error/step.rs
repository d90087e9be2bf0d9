// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of executing a step.

use std::error::Error as StdError;

use derive_more::with_trait::{Display, Error, From};

use super::{AmbiguousDefinition, MissingDefinition, ResolutionError};
use crate::adverb::UnknownAdverb;

/// Marker raised by a step body to declare itself intentionally
/// unimplemented.
///
/// Use [`pending()`], [`World::pending()`] or the [`pending!`] macro to raise
/// it.
///
/// [`pending()`]: crate::step::pending
/// [`pending!`]: crate::pending
/// [`World::pending()`]: crate::World::pending
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("pending: {message}")]
pub struct Pending {
    /// Human-readable description of what is left to do.
    #[error(not(source))]
    pub message: String,
}

impl Pending {
    /// Message used when a step body doesn't provide one.
    pub const DEFAULT_MESSAGE: &'static str = "TODO - implement me";

    /// Creates a new [`Pending`] marker with the given `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Default for Pending {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE)
    }
}

/// Error of executing a step, including any nested steps it invoked.
///
/// Step bodies return [`anyhow::Result`]. When the error bubbling out of a
/// body is a [`StepError`] (raised by a nested invocation) or a [`Pending`]
/// marker, it is surfaced as the corresponding variant. Any other error is
/// returned as is inside [`StepError::Failed`].
#[derive(Debug, Display, From)]
pub enum StepError {
    /// Step line matched no definition.
    Undefined(MissingDefinition),

    /// Step line matched several definitions.
    Ambiguous(AmbiguousDefinition),

    /// Step body declared itself unimplemented.
    Pending(Pending),

    /// Step was invoked through an adverb nobody installed.
    UnknownAdverb(UnknownAdverb),

    /// Nested invocations went deeper than allowed.
    #[display("step `{step}` exceeds the nesting limit of {limit}")]
    #[from(ignore)]
    NestingLimit {
        /// Step text whose invocation was refused.
        step: String,

        /// Configured limit.
        limit: usize,
    },

    /// Step body failed.
    #[display("step failed: {_0:#}")]
    #[from(ignore)]
    Failed(anyhow::Error),
}

impl StepError {
    /// Classifies an error returned by a step body.
    pub(crate) fn from_body(err: anyhow::Error) -> Self {
        let err = match err.downcast::<Self>() {
            Ok(e) => return e,
            Err(e) => e,
        };
        let err = match err.downcast::<Pending>() {
            Ok(p) => return Self::Pending(p),
            Err(e) => e,
        };
        match err.downcast::<ResolutionError>() {
            Ok(e) => e.into(),
            Err(e) => Self::Failed(e),
        }
    }

    /// Indicates whether this is a [`Pending`] step rather than a breakage.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the underlying step body error, if this is a
    /// [`StepError::Failed`].
    #[must_use]
    pub const fn as_failure(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResolutionError> for StepError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Missing(e) => Self::Undefined(e),
            ResolutionError::Ambiguous(e) => Self::Ambiguous(e),
        }
    }
}

impl StdError for StepError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Undefined(e) => Some(e),
            Self::Ambiguous(e) => Some(e),
            Self::Pending(e) => Some(e),
            Self::UnknownAdverb(e) => Some(e),
            Self::NestingLimit { .. } => None,
            Self::Failed(e) => Some(e.as_ref()),
        }
    }
}
