// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Source location of a [`StepDefinition`] registration.
//!
//! [`StepDefinition`]: super::StepDefinition

use std::panic;

use derive_more::with_trait::{Debug, Display};

/// Place in the source code where a [`StepDefinition`] was registered.
///
/// Filled automatically via [`#[track_caller]`][0] by every registration
/// method of [`Steps`].
///
/// [`StepDefinition`]: super::StepDefinition
/// [`Steps`]: crate::Steps
/// [0]: https://doc.rust-lang.org/reference/attributes/codegen.html#the-track_caller-attribute
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}:{column}")]
pub struct Location {
    /// Path to the file where the [`StepDefinition`] was registered.
    ///
    /// [`StepDefinition`]: super::StepDefinition
    pub path: &'static str,

    /// Line of the registration call.
    pub line: u32,

    /// Column of the registration call.
    pub column: u32,
}

impl Location {
    /// Creates a new [`Location`] out of the provided parts.
    #[must_use]
    pub const fn new(path: &'static str, line: u32, column: u32) -> Self {
        Self { path, line, column }
    }

    /// Captures the [`Location`] of the caller.
    ///
    /// Propagates through every `#[track_caller]` function in the call chain,
    /// so the outermost non-tracking caller is reported.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        panic::Location::caller().into()
    }

    /// Returns the `file:line` part of this [`Location`], omitting the column.
    #[must_use]
    pub fn file_colon_line(&self) -> String {
        format!("{}:{}", self.path, self.line)
    }
}

impl From<&panic::Location<'static>> for Location {
    fn from(loc: &panic::Location<'static>) -> Self {
        Self::new(loc.file(), loc.line(), loc.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_points_at_this_file() {
        let loc = Location::caller();

        assert!(loc.path.ends_with("location.rs"), "got {loc}");
        assert_eq!(loc.line, line!() - 3);
    }

    #[test]
    fn tracks_through_annotated_functions() {
        #[track_caller]
        fn register() -> Location {
            Location::caller()
        }

        let expected = line!() + 1;
        let loc = register();
        assert_eq!(loc.line, expected);
    }

    #[test]
    fn displays_path_line_and_column() {
        let loc = Location::new("tests/steps.rs", 42, 10);

        assert_eq!(loc.to_string(), "tests/steps.rs:42:10");
        assert_eq!(loc.file_colon_line(), "tests/steps.rs:42");
    }

    #[test]
    fn orders_by_path_then_line() {
        assert!(Location::new("a.rs", 9, 1) < Location::new("b.rs", 1, 1));
        assert!(Location::new("a.rs", 1, 9) < Location::new("a.rs", 2, 1));
    }
}
