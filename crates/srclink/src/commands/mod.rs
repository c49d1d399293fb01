pub mod branch;
pub mod config;
pub mod locate;
pub mod url;

use std::io::Read;
use std::path::Path;

use libsrclink_core::{Document, LocateError, Locator, MatchSpan, Selection, SrclinkError};
use tracing::{debug, warn};

use crate::cli::SelectionArgs;

/// Selection text from `--selection` or `--selection-file` (`-` reads stdin)
pub fn read_selection(args: &SelectionArgs) -> Result<Option<String>, SrclinkError> {
    if let Some(text) = &args.selection {
        return Ok(Some(text.clone()));
    }
    match &args.selection_file {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(Some(text))
        }
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

/// Locate `selection` in `content`, turning absence into a NotFound error
pub fn find_span(
    path: &Path,
    content: &str,
    selection: &str,
    hint_line: Option<usize>,
) -> Result<MatchSpan, SrclinkError> {
    let document = Document::parse(content);
    let selection = Selection::parse(selection);
    debug!(
        path = %path.display(),
        document_lines = document.len(),
        selection_lines = selection.len(),
        hint_line = ?hint_line,
        "Locating selection"
    );

    match Locator::new(&document, &selection).with_hint(hint_line).find() {
        Ok(Some(span)) => Ok(span),
        Ok(None) => Err(SrclinkError::selection_not_found(&path.display().to_string())),
        Err(LocateError::ColumnResolution { line }) => {
            warn!(path = %path.display(), line, "Selection matched but its columns could not be resolved");
            Err(SrclinkError::selection_not_found(&path.display().to_string()))
        }
        Err(e) => Err(SrclinkError::InvalidArgs(e.to_string())),
    }
}
