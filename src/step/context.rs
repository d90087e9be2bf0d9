// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Context`] handed to a step body.

use std::{any, str::FromStr};

use anyhow::anyhow;

use super::{
    argument::{Argument, Table},
    pattern::{Capture, CaptureName},
};

/// Context of a single step body execution.
#[derive(Clone, Debug)]
pub struct Context {
    /// Literal step text the body was resolved for.
    pub step: String,

    /// [`Pattern`] matches of the [`Context::step`]: the whole match first,
    /// then every capturing group in order. Groups not participating in the
    /// match are empty strings.
    ///
    /// [`Pattern`]: super::Pattern
    pub matches: Vec<(CaptureName, String)>,

    /// Multiline [`Argument`]s supplied by the caller.
    pub arguments: Vec<Argument>,
}

impl Context {
    pub(crate) fn new(
        step: &str,
        captures: &[Capture],
        arguments: Vec<Argument>,
    ) -> Self {
        let matches = captures
            .iter()
            .map(|(name, span)| {
                let value = span.clone().and_then(|s| step.get(s));
                (name.clone(), value.unwrap_or_default().to_owned())
            })
            .collect();
        Self { step: step.to_owned(), matches, arguments }
    }

    /// Iterates over the captured arguments, the whole match excluded.
    pub fn args(&self) -> impl Iterator<Item = &str> + '_ {
        self.matches.iter().skip(1).map(|(_, v)| v.as_str())
    }

    /// Returns the `n`th captured argument (starting from `0`, the whole
    /// match excluded).
    #[must_use]
    pub fn arg(&self, n: usize) -> Option<&str> {
        self.args().nth(n)
    }

    /// Returns the value of the named capturing group, if any.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the `n`th captured argument.
    ///
    /// # Errors
    ///
    /// If there is no such argument, or it doesn't parse into `T`.
    pub fn parse<T>(&self, n: usize) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: Into<anyhow::Error>,
    {
        let raw = self
            .arg(n)
            .ok_or_else(|| {
                anyhow!("step `{}` has no argument {n}", self.step)
            })?;
        raw.parse().map_err(|e: T::Err| {
            Into::<anyhow::Error>::into(e).context(format!(
                "failed to parse argument {n} `{raw}` as `{}`",
                any::type_name::<T>(),
            ))
        })
    }

    /// Returns the first doc string [`Argument`], if any.
    #[must_use]
    pub fn doc_string(&self) -> Option<&str> {
        self.arguments.iter().find_map(Argument::as_doc_string)
    }

    /// Returns the first [`Table`] [`Argument`], if any.
    #[must_use]
    pub fn table(&self) -> Option<&Table> {
        self.arguments.iter().find_map(Argument::as_table)
    }
}
