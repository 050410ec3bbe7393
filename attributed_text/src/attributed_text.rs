// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::{Endpoint, Error};

/// A block of text whose byte positions are covered by contiguous attribute runs.
///
/// Invariant: the ranges of the runs are non-empty, sorted, adjacent, and together cover
/// `0..text.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedText<Attr: Debug> {
    text: String,
    runs: Vec<(Range<usize>, Attr)>,
}

impl<Attr: Debug> Default for AttributedText<Attr> {
    fn default() -> Self {
        Self {
            text: String::new(),
            runs: Vec::new(),
        }
    }
}

impl<Attr: Debug> AttributedText<Attr> {
    /// Create an empty `AttributedText`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AttributedText` from `text` and a list of runs.
    ///
    /// The runs must be non-empty, in order, adjacent, lie on UTF-8 boundaries, and cover the
    /// whole text.
    pub fn from_runs(
        text: impl Into<String>,
        runs: impl IntoIterator<Item = (Range<usize>, Attr)>,
    ) -> Result<Self, Error> {
        let text = text.into();
        let mut expected_start = 0;
        let mut collected = Vec::new();
        for (range, attr) in runs {
            validate_range(&text, &range)?;
            if range.start != expected_start || range.is_empty() {
                return Err(Error::discontiguous(range.start, range.end, text.len()));
            }
            expected_start = range.end;
            collected.push((range, attr));
        }
        if expected_start != text.len() {
            return Err(Error::discontiguous(expected_start, text.len(), text.len()));
        }
        Ok(Self {
            text,
            runs: collected,
        })
    }

    /// Borrow the underlying text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the underlying text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the underlying text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append `text` as a new run carrying `attribute`.
    ///
    /// Appending an empty string is a no-op.
    pub fn push(&mut self, text: &str, attribute: Attr) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        self.runs.push((start..self.text.len(), attribute));
    }

    /// Iterate over all runs in text order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = (&Range<usize>, &Attr)> + Clone {
        self.runs.iter().map(|(range, attr)| (range, attr))
    }

    /// Returns the number of runs.
    pub fn runs_len(&self) -> usize {
        self.runs.len()
    }

    /// Returns the index of the run containing byte `index`, if any.
    pub fn run_index_at(&self, index: usize) -> Option<usize> {
        if index >= self.text.len() {
            return None;
        }
        Some(self.runs.partition_point(|(range, _)| range.end <= index))
    }

    /// Returns the attribute that applies at byte `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&Attr> {
        self.run_index_at(index).map(|ix| &self.runs[ix].1)
    }

    /// Returns the run containing byte `index`, with its full range.
    pub fn run_at(&self, index: usize) -> Option<(&Range<usize>, &Attr)> {
        self.run_index_at(index).map(|ix| {
            let (range, attr) = &self.runs[ix];
            (range, attr)
        })
    }

    /// Iterate over the runs overlapping `range`, with their ranges clipped to `range`.
    ///
    /// An out-of-bounds `range` is clipped to the text.
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = (Range<usize>, &Attr)> {
        let Range { start, end } = range;
        let first = self.runs.partition_point(|(run, _)| run.end <= start);
        self.runs[first..]
            .iter()
            .take_while(move |(run, _)| run.start < end)
            .map(move |(run, attr)| (run.start.max(start)..run.end.min(end), attr))
    }

    /// Consume the text, returning the string and its runs.
    pub fn into_parts(self) -> (String, Vec<(Range<usize>, Attr)>) {
        (self.text, self.runs)
    }
}

impl<Attr: Debug + Clone> AttributedText<Attr> {
    /// Edit the attributes over `range` in place.
    ///
    /// Runs straddling either endpoint are split first, so `edit` only ever sees attributes
    /// that lie entirely inside `range`. Each run inside the range is passed to `edit` once.
    pub fn update_range(
        &mut self,
        range: Range<usize>,
        mut edit: impl FnMut(&mut Attr),
    ) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        if range.is_empty() {
            return Ok(());
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        for (_, attr) in &mut self.runs[first..last] {
            edit(attr);
        }
        Ok(())
    }

    /// Merge adjacent runs for which `same` returns `true`.
    ///
    /// The merged run keeps the attribute of the earlier run.
    pub fn coalesce_by(&mut self, mut same: impl FnMut(&Attr, &Attr) -> bool) {
        let mut merged: Vec<(Range<usize>, Attr)> = Vec::with_capacity(self.runs.len());
        for (range, attr) in self.runs.drain(..) {
            match merged.last_mut() {
                Some((last_range, last_attr)) if same(last_attr, &attr) => {
                    last_range.end = range.end;
                }
                _ => merged.push((range, attr)),
            }
        }
        self.runs = merged;
    }

    /// Ensure a run boundary exists at `index`, returning the index of the run starting there.
    ///
    /// Returns the run count when `index` is the end of the text.
    fn split_at(&mut self, index: usize) -> usize {
        let ix = self.runs.partition_point(|(range, _)| range.end <= index);
        if ix == self.runs.len() || self.runs[ix].0.start == index {
            return ix;
        }
        let (range, attr) = &mut self.runs[ix];
        let tail = (index..range.end, attr.clone());
        range.end = index;
        self.runs.insert(ix + 1, tail);
        ix + 1
    }
}

impl<Attr: Debug + PartialEq + Clone> AttributedText<Attr> {
    /// Merge adjacent runs with equal attributes.
    pub fn coalesce(&mut self) {
        self.coalesce_by(|a, b| a == b);
    }
}

fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    let len = text.len();
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, len));
    }
    if range.end > len {
        return Err(Error::invalid_bounds(range.start, range.end, len));
    }
    for (which, index) in [(Endpoint::Start, range.start), (Endpoint::End, range.end)] {
        if !text.is_char_boundary(index) {
            return Err(Error::not_on_char_boundary(
                text,
                range.start,
                range.end,
                which,
                index,
            ));
        }
    }
    Ok(())
}
