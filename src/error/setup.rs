// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of setting up a [`World`] for a scenario.
//!
//! [`World`]: crate::World

use std::error::Error as StdError;

use derive_more::with_trait::{Display, Error};

/// Boxed error returned by a world factory or a setup hook.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error of building a [`World`], failing the whole scenario before any of
/// its steps runs.
///
/// [`World`]: crate::World
#[derive(Debug, Display, Error)]
pub enum SetupError {
    /// World factory failed.
    #[display(
        "world factory #{index} failed for scenario `{scenario}`: \
         {source}"
    )]
    Factory {
        /// Registration index of the failed factory.
        index: usize,

        /// Name of the scenario being set up.
        scenario: String,

        /// Error returned by the factory.
        source: BoxError,
    },

    /// Setup hook failed.
    #[display(
        "setup hook #{index} failed for scenario `{scenario}`: \
         {source}"
    )]
    Hook {
        /// Registration index of the failed hook.
        index: usize,

        /// Name of the scenario being set up.
        scenario: String,

        /// Error returned by the hook.
        source: BoxError,
    },
}

impl SetupError {
    /// Returns the registration index of the failed factory or hook.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Factory { index, .. } | Self::Hook { index, .. } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_index_and_scenario() {
        let err = SetupError::Hook {
            index: 2,
            scenario: "eating cukes".into(),
            source: anyhow::anyhow!("no fridge").into(),
        };

        assert_eq!(err.index(), 2);
        assert_eq!(
            err.to_string(),
            "setup hook #2 failed for scenario `eating cukes`: no fridge",
        );
        assert!(err.source().is_some());
    }
}
