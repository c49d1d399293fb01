//! Locate a selection inside a file

use std::path::PathBuf;

use libsrclink_core::{MatchSpan, SrclinkError};
use serde::Serialize;

use crate::cli::{Cli, SelectionArgs};
use crate::commands::{find_span, read_selection};
use crate::output::output_success;

#[derive(Serialize)]
struct LocateOutput {
    path: String,
    span: MatchSpan,
}

pub fn run(
    cli: &Cli,
    file: PathBuf,
    selection: SelectionArgs,
    line: Option<usize>,
) -> Result<(), SrclinkError> {
    let text = read_selection(&selection)?.ok_or_else(|| {
        SrclinkError::InvalidArgs("--selection or --selection-file is required".to_string())
    })?;
    let content = std::fs::read_to_string(&file)?;
    let span = find_span(&file, &content, &text, line)?;

    let path = file.display().to_string();
    let human = format!("{}:{}", path, span);
    output_success(cli, LocateOutput { path, span }, &human)
}
