// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Highlighting of matched step arguments for display.

use std::ops::Range;

use derive_more::with_trait::Debug;

use super::pattern::Capture;

/// Way of rendering a single matched argument of a step.
#[derive(Clone, Copy, Debug)]
pub enum ArgFormat<'f> {
    /// Template where every `{}` is substituted with the argument, for
    /// example `"<span class=\"param\">{}</span>"`.
    Template(&'f str),

    /// Function transforming each argument individually.
    With(#[debug("{:p}", _0)] &'f dyn Fn(&str) -> String),
}

impl ArgFormat<'_> {
    /// Renders the given `arg`.
    #[must_use]
    pub fn apply(&self, arg: &str) -> String {
        match self {
            Self::Template(t) => t.replace("{}", arg),
            Self::With(f) => f(arg),
        }
    }
}

impl<'f> From<&'f str> for ArgFormat<'f> {
    fn from(template: &'f str) -> Self {
        Self::Template(template)
    }
}

impl<'f, F: Fn(&str) -> String> From<&'f F> for ArgFormat<'f> {
    fn from(f: &'f F) -> Self {
        Self::With(f)
    }
}

/// Renders the `text` with every top-level capture replaced by its
/// [`ArgFormat`]ted value. Groups nested inside an already rendered one, and
/// groups not participating in the match, are left alone.
pub(crate) fn format_args(
    text: &str,
    captures: &[Capture],
    format: ArgFormat<'_>,
) -> String {
    let spans = captures.iter().skip(1).filter_map(|(_, span)| span.clone());

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for Range { start, end } in spans {
        if start < last {
            continue;
        }
        out.push_str(text.get(last..start).unwrap_or_default());
        out.push_str(&format.apply(text.get(start..end).unwrap_or_default()));
        last = end;
    }
    out.push_str(text.get(last..).unwrap_or_default());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Pattern;

    fn render(pattern: &str, text: &str, format: ArgFormat<'_>) -> String {
        let p = Pattern::regex(pattern).unwrap();
        format_args(text, &p.captures(text).unwrap(), format)
    }

    #[test]
    fn template_wraps_each_argument() {
        let out = render(
            r"^I have (\d+) (\w+) in my (\w+)$",
            "I have 7 cukes in my belly",
            "[{}]".into(),
        );

        assert_eq!(out, "I have [7] [cukes] in my [belly]");
    }

    #[test]
    fn callback_transforms_each_argument() {
        let upper = |s: &str| s.to_uppercase();

        let out = render(r"^I eat (\w+) now$", "I eat cukes now", (&upper).into());

        assert_eq!(out, "I eat CUKES now");
    }

    #[test]
    fn nested_and_absent_groups_are_skipped() {
        let out = render(r"^a ((b) c)( d)?$", "a b c", "<{}>".into());

        assert_eq!(out, "a <b c>");
    }

    #[test]
    fn text_without_groups_is_unchanged() {
        let out = render(r"^plain$", "plain", "<{}>".into());

        assert_eq!(out, "plain");
    }
}
