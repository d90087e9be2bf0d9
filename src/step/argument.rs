// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Multiline [`Argument`]s attached to a step line.

use std::{collections::HashMap, fmt};

use derive_more::with_trait::From;

/// Multiline payload following a step line: a doc string or a data table.
///
/// In practice a step carries at most one of them, but [`Invocation`]s accept
/// any number.
///
/// [`Invocation`]: crate::Invocation
#[derive(Clone, Debug, Eq, From, PartialEq)]
pub enum Argument {
    /// Block of free-form text.
    DocString(String),

    /// Data table.
    Table(Table),
}

impl Argument {
    /// Extracts the multiline [`Argument`]s of an already parsed
    /// [`gherkin::Step`], doc string first.
    #[must_use]
    pub fn from_step(step: &gherkin::Step) -> Vec<Self> {
        step.docstring
            .iter()
            .cloned()
            .map(Self::DocString)
            .chain(step.table.iter().map(|t| Self::Table(t.into())))
            .collect()
    }

    /// Returns the doc string, if this [`Argument`] is one.
    #[must_use]
    pub fn as_doc_string(&self) -> Option<&str> {
        match self {
            Self::DocString(s) => Some(s),
            Self::Table(_) => None,
        }
    }

    /// Returns the [`Table`], if this [`Argument`] is one.
    #[must_use]
    pub const fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            Self::DocString(_) => None,
        }
    }
}

/// Data table argument of a step.
///
/// The first row is treated as a header by [`Table::rows()`] and
/// [`Table::hashes()`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    cells: Vec<Vec<String>>,
}

impl Table {
    /// Creates a new [`Table`] out of the given rows.
    #[must_use]
    pub const fn new(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    /// Returns all the rows, header included.
    #[must_use]
    pub fn raw(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Returns all the rows except the header.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        self.cells.get(1..).unwrap_or_default()
    }

    /// Maps every non-header row into a header-keyed [`HashMap`].
    #[must_use]
    pub fn hashes(&self) -> Vec<HashMap<&str, &str>> {
        let Some(header) = self.cells.first() else {
            return Vec::new();
        };
        self.rows()
            .iter()
            .map(|row| {
                header
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }

    /// Treats a two-column [`Table`] as a key-value list.
    ///
    /// [`None`] if any row is not exactly two cells wide.
    #[must_use]
    pub fn rows_hash(&self) -> Option<HashMap<&str, &str>> {
        self.cells
            .iter()
            .map(|row| match row.as_slice() {
                [k, v] => Some((k.as_str(), v.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Swaps rows with columns. Cells beyond the first row's width are
    /// dropped.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let width = self.cells.first().map_or(0, Vec::len);
        Self::new(
            (0..width)
                .map(|col| {
                    self.cells
                        .iter()
                        .filter_map(|row| row.get(col).cloned())
                        .collect()
                })
                .collect(),
        )
    }
}

impl<S: Into<String>> From<Vec<Vec<S>>> for Table {
    fn from(rows: Vec<Vec<S>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

impl From<&gherkin::Table> for Table {
    fn from(table: &gherkin::Table) -> Self {
        Self::new(table.rows.clone())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            writeln!(f, "| {} |", row.join(" | "))?;
        }
        Ok(())
    }
}
