use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SrclinkError;

/// Location of a located selection. All fields are 1-based and inclusive.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpan {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl fmt::Display for MatchSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

/// Inclusive 1-based line range used for permalink fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self, SrclinkError> {
        if start == 0 {
            return Err(SrclinkError::InvalidArgs(
                "line numbers start at 1".to_string(),
            ));
        }
        if end < start {
            return Err(SrclinkError::InvalidArgs(format!(
                "end line {} is before start line {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single(line: usize) -> Result<Self, SrclinkError> {
        Self::new(line, line)
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl From<MatchSpan> for LineRange {
    fn from(span: MatchSpan) -> Self {
        Self {
            start: span.start_line,
            end: span.end_line,
        }
    }
}
