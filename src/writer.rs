//! JSON output for finished transcripts.
//!
//! Output format:
//! - UTF-8 JSON with two-space indentation
//! - non-ASCII characters written literally (never `\u`-escaped)
//! - a single trailing newline
//!
//! `serde_json` gives us both properties: its pretty printer indents with two
//! spaces and it only escapes characters JSON requires escaping.
//!
//! The to-path variant creates or overwrites the target file. It does not
//! create parent directories and makes no atomic-write guarantee.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::transcript::Transcript;
use crate::{Error, Result};

/// Serialize a transcript as indented JSON into the given writer.
pub fn write_json<W: Write>(mut w: W, transcript: &Transcript) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, transcript)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Serialize a transcript as indented JSON to a file path.
///
/// The file is created if absent and truncated if present. A missing parent
/// directory is an error.
pub fn write_json_to_path(path: impl AsRef<Path>, transcript: &Transcript) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|err| Error::msg(format!("failed to create '{}': {err}", path.display())))?;
    write_json(BufWriter::new(file), transcript)
}
