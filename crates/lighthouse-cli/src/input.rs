//! Reading the document to analyze.

use crate::error::{CliError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Marker for reading from standard input
pub const STDIN: &str = "-";

/// Read a document from a file path, or stdin for `-`.
///
/// Rejects `.docx` files, anything larger than `max_bytes`, and content that
/// is not UTF-8.
pub fn read_input(source: &str, max_bytes: u64) -> Result<String> {
    if source == STDIN {
        return read_limited(io::stdin().lock(), max_bytes, "stdin");
    }

    let path = Path::new(source);
    let is_docx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    if is_docx {
        return Err(CliError::InvalidInput(format!(
            "{} is a Word document. Save it as plain text (.txt or .md) first.",
            source
        )));
    }

    let size = path.metadata()?.len();
    if size > max_bytes {
        return Err(too_large(source, max_bytes));
    }

    read_limited(File::open(path)?, max_bytes, source)
}

/// Read at most `max_bytes` from `reader` and decode it as UTF-8.
pub fn read_limited<R: Read>(reader: R, max_bytes: u64, source: &str) -> Result<String> {
    let mut bytes = Vec::new();
    reader.take(max_bytes.saturating_add(1)).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Err(too_large(source, max_bytes));
    }

    String::from_utf8(bytes).map_err(|e| {
        CliError::InvalidInput(format!(
            "{} is not valid UTF-8 text (invalid byte at offset {})",
            source,
            e.utf8_error().valid_up_to()
        ))
    })
}

fn too_large(source: &str, max_bytes: u64) -> CliError {
    CliError::InvalidInput(format!(
        "{} exceeds the {} MB size limit",
        source,
        max_bytes as f64 / (1024.0 * 1024.0)
    ))
}
