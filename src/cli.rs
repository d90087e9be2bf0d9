// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) options of a [`Dispatcher`].
//!
//! [`Cli`] is meant to be flattened into the CLI of whatever executes the
//! scenarios, and then applied via [`Steps::with_cli()`].
//!
//! [`Dispatcher`]: crate::Dispatcher
//! [`Steps::with_cli()`]: crate::Steps::with_cli

pub use clap::{Args, Parser};

/// CLI options of a [`Dispatcher`].
///
/// # Example
///
/// ```rust
/// # use cucumber_dispatch::{cli::{self, Parser as _}, Steps};
/// #
/// #[derive(cli::Parser)]
/// struct Opts {
///     #[command(flatten)]
///     steps: cli::Cli,
/// }
///
/// let opts = Opts::parse_from(["test", "--max-step-nesting", "2"]);
///
/// let mut steps = Steps::<()>::new();
/// _ = steps.with_cli(opts.steps);
/// assert_eq!(steps.finish().max_nesting(), Some(2));
/// ```
///
/// [`Dispatcher`]: crate::Dispatcher
#[derive(Args, Clone, Debug, Default)]
#[group(skip)]
pub struct Cli {
    /// Maximum depth of steps invoking other steps.
    ///
    /// `0` forbids steps to invoke other steps at all. Unlimited if not
    /// specified.
    #[arg(long, value_name = "int", global = true)]
    pub max_step_nesting: Option<usize>,

    /// Additional adverb to register and invoke steps with, like `Gitt`.
    ///
    /// May be specified several times.
    #[arg(
        id = "adverb",
        long = "adverb",
        value_name = "word",
        global = true
    )]
    pub adverbs: Vec<String>,
}
