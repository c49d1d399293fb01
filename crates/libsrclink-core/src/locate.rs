//! Selection locator
//!
//! Maps a text snippet copied out of an editor back to the line/column span
//! it occupies in a file. A selection line matches a file line when the file
//! line contains it as an exact, case-sensitive substring; a multi-line
//! selection must match a contiguous block of file lines.
//!
//! When the caller knows roughly where the selection came from (an editor's
//! cursor line), the search starts there: forward from the hint, then
//! backward from just above it, and only then over the whole file. The first
//! alignment found in that order wins, even if an earlier occurrence exists
//! elsewhere in the file.
//!
//! This module is pure. It performs no I/O and emits no logs.

use thiserror::Error;

use crate::types::span::MatchSpan;

/// Errors raised by the locator. Not finding the selection is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("selection has no lines")]
    InvalidSelection,

    #[error("selection matched at line {line} but its column could not be resolved")]
    ColumnResolution { line: usize },
}

/// Line-split file content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Normalize CRLF to LF and split on LF. Empty text yields one empty line.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Line-split snippet to look for. Always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    lines: Vec<String>,
}

impl Selection {
    /// Same normalization as [`Document::parse`]. An empty snippet is one empty line.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// Build a selection from pre-split lines
    pub fn from_lines(lines: Vec<String>) -> Result<Self, LocateError> {
        if lines.is_empty() {
            return Err(LocateError::InvalidSelection);
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Search for a [`Selection`] inside a [`Document`], optionally near a hint line
#[derive(Debug, Clone, Copy)]
pub struct Locator<'a> {
    document: &'a Document,
    selection: &'a Selection,
    hint_line: Option<usize>,
}

impl<'a> Locator<'a> {
    pub fn new(document: &'a Document, selection: &'a Selection) -> Self {
        Self {
            document,
            selection,
            hint_line: None,
        }
    }

    /// Set the 1-based hint line. Values outside `1..=document.len()` are ignored.
    pub fn with_hint(mut self, hint_line: Option<usize>) -> Self {
        self.hint_line = hint_line;
        self
    }

    /// Locate the selection.
    ///
    /// Returns `Ok(None)` when no alignment exists.
    pub fn find(&self) -> Result<Option<MatchSpan>, LocateError> {
        if self.selection.is_empty() {
            return Err(LocateError::InvalidSelection);
        }
        match self.first_match() {
            Some(index) => self.span_at(index).map(Some),
            None => Ok(None),
        }
    }

    /// 0-based index of the first valid alignment in search order
    pub fn first_match(&self) -> Option<usize> {
        if let Some(hint) = self.hint_index() {
            if let Some(index) = self.scan_forward_from(hint) {
                return Some(index);
            }
            if let Some(index) = self.scan_backward_from(hint) {
                return Some(index);
            }
        }
        self.scan_forward_from(0)
    }

    fn hint_index(&self) -> Option<usize> {
        self.hint_line
            .filter(|line| (1..=self.document.len()).contains(line))
            .map(|line| line - 1)
    }

    /// Last index at which the selection still fits inside the document
    fn last_start(&self) -> Option<usize> {
        self.document.len().checked_sub(self.selection.len())
    }

    fn scan_forward_from(&self, start: usize) -> Option<usize> {
        let last = self.last_start()?;
        (start..=last).find(|&index| self.matches_at(index))
    }

    /// Scans `start - 1` down to 0
    fn scan_backward_from(&self, start: usize) -> Option<usize> {
        (0..start).rev().find(|&index| self.matches_at(index))
    }

    fn matches_at(&self, index: usize) -> bool {
        let wanted = self.selection.lines();
        let Some(window) = self.document.lines().get(index..index + wanted.len()) else {
            return false;
        };
        window
            .iter()
            .zip(wanted)
            .all(|(line, part)| line.contains(part.as_str()))
    }

    fn span_at(&self, index: usize) -> Result<MatchSpan, LocateError> {
        let wanted = self.selection.lines();
        let first = wanted.first().ok_or(LocateError::InvalidSelection)?;
        let last = wanted.last().ok_or(LocateError::InvalidSelection)?;

        let start_line = index + 1;
        let end_line = index + wanted.len();
        let lines = self.document.lines();

        let start_column = lines
            .get(start_line - 1)
            .and_then(|line| char_column(line, first))
            .ok_or(LocateError::ColumnResolution { line: start_line })?;
        let last_column = lines
            .get(end_line - 1)
            .and_then(|line| char_column(line, last))
            .ok_or(LocateError::ColumnResolution { line: end_line })?;

        // An empty final line ends on the column it starts at.
        let end_column = last_column + last.chars().count().saturating_sub(1);

        Ok(MatchSpan {
            start_line,
            start_column,
            end_line,
            end_column,
        })
    }
}

/// Locate `selection_text` in `document_text`, trying `hint_line` (1-based) first.
///
/// Returns `None` when the selection does not occur.
pub fn locate(
    document_text: &str,
    selection_text: &str,
    hint_line: Option<usize>,
) -> Option<MatchSpan> {
    let document = Document::parse(document_text);
    let selection = Selection::parse(selection_text);
    Locator::new(&document, &selection)
        .with_hint(hint_line)
        .find()
        .ok()
        .flatten()
}

fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(str::to_owned)
        .collect()
}

/// 1-based character column of the first occurrence of `needle` in `line`
fn char_column(line: &str, needle: &str) -> Option<usize> {
    line.find(needle)
        .map(|byte_offset| line[..byte_offset].chars().count() + 1)
}
