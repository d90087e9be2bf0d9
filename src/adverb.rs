// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Table of step keywords ("adverbs") like `Given`, `When`, `Then` and their
//! localized synonyms.
//!
//! Adverbs carry no behaviour: registering or invoking a step through any of
//! them ends up in the very same [`Registry`].
//!
//! [`Registry`]: crate::Registry

use derive_more::with_trait::{Display, Error};
use lazy_regex::regex_captures;

/// Error of using an adverb that was never installed.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display("unknown adverb `{adverb}`")]
pub struct UnknownAdverb {
    /// The unrecognized adverb.
    #[error(not(source))]
    pub adverb: String,
}

/// Ordered set of recognized adverbs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Adverbs(Vec<String>);

impl Adverbs {
    /// Adverbs every [`Adverbs`] table starts with.
    pub const DEFAULT: [&'static str; 3] = ["Given", "When", "Then"];

    /// Creates an empty [`Adverbs`] table, without even the
    /// [`Adverbs::DEFAULT`] ones.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Installs the given `adverb`.
    ///
    /// Returns `false` if it was already installed.
    pub fn insert(&mut self, adverb: impl Into<String>) -> bool {
        let adverb = adverb.into();
        if self.contains(&adverb) {
            return false;
        }
        self.0.push(adverb);
        true
    }

    /// Checks whether the given `adverb` is installed.
    #[must_use]
    pub fn contains(&self, adverb: &str) -> bool {
        self.0.iter().any(|a| a == adverb)
    }

    /// Ensures the given `adverb` is installed.
    ///
    /// # Errors
    ///
    /// If it's not.
    pub fn check(&self, adverb: &str) -> Result<(), UnknownAdverb> {
        if self.contains(adverb) {
            Ok(())
        } else {
            Err(UnknownAdverb { adverb: adverb.to_owned() })
        }
    }

    /// Splits a step line into its leading adverb and the rest of the text,
    /// like `"Gitt I have 3 cukes"` into `("Gitt", "I have 3 cukes")`.
    ///
    /// [`None`] if the line doesn't start with an installed adverb.
    #[must_use]
    pub fn split<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let (_, adverb, text) =
            regex_captures!(r"^\s*(\S+)\s+(\S.*?)\s*$", line)?;
        self.contains(adverb).then_some((adverb, text))
    }

    /// Iterates over the installed adverbs in installation order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Adverbs {
    fn default() -> Self {
        let mut out = Self::empty();
        out.extend(Self::DEFAULT);
        out
    }
}

impl<S: Into<String>> Extend<S> for Adverbs {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for adverb in iter {
            _ = self.insert(adverb);
        }
    }
}
