// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expected output, and the name → status mappings built from it.

use crate::{errors::ExpectationReadError, log_line::NamedResult};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use tracing::debug;

/// Expected output for a test, read up front from a file.
///
/// Line mode compares against [`Self::lines`] verbatim. Name mode builds [`NamedResults`] out of
/// the non-blank lines via [`Self::named_results`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpectationSource {
    path: Option<Utf8PathBuf>,
    lines: Vec<String>,
}

impl ExpectationSource {
    /// Reads expected output from a file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, matching how captured output is treated.
    pub fn from_path(path: impl Into<Utf8PathBuf>) -> Result<Self, ExpectationReadError> {
        let path = path.into();
        let contents =
            std::fs::read(&path).map_err(|err| ExpectationReadError::new(path.clone(), err))?;
        let mut source = Self::from_text(&String::from_utf8_lossy(&contents));
        source.path = Some(path);
        Ok(source)
    }

    /// Creates expected output from in-memory text.
    pub fn from_text(text: &str) -> Self {
        Self {
            path: None,
            lines: text.lines().map(ToOwned::to_owned).collect(),
        }
    }

    /// Returns the file this was read from, if any.
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Returns the raw lines, including blank ones.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Parses the non-blank lines into a name → status mapping.
    pub fn named_results(&self) -> NamedResults {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(NamedResult::parse)
            .collect()
    }
}

/// A mapping from result names to statuses, in first-seen order.
///
/// If two results share a name, the later status wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NamedResults {
    statuses: IndexMap<String, String>,
}

impl NamedResults {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a result, returning the status it replaced if the name was already present.
    pub fn insert(&mut self, result: NamedResult<'_>) -> Option<String> {
        let prev = self
            .statuses
            .insert(result.name.to_owned(), result.status.to_owned());
        if let Some(prev) = &prev {
            debug!(
                "result `{}` seen again: status `{}` replaces `{}`",
                result.name, result.status, prev,
            );
        }
        prev
    }

    /// Returns the status recorded for a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.statuses.get(name).map(|status| status.as_str())
    }

    /// Returns true if a result with this name was recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.statuses.contains_key(name)
    }

    /// Iterates over `(name, status)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.statuses
            .iter()
            .map(|(name, status)| (name.as_str(), status.as_str()))
    }

    /// Returns the number of distinct names.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns true if no results were recorded.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl<'a> FromIterator<NamedResult<'a>> for NamedResults {
    fn from_iter<T: IntoIterator<Item = NamedResult<'a>>>(iter: T) -> Self {
        let mut results = Self::new();
        for result in iter {
            results.insert(result);
        }
        results
    }
}
