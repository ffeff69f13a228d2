//! Writing the generated file.

use crate::error::{GenerateError, Result};
use std::path::Path;

/// Separator between rendered entries.
pub const ENTRY_SEPARATOR: &str = "\n\n";

/// Header followed by all blocks, blank-line separated.
pub fn assemble(header: &str, blocks: &[String]) -> String {
    let mut out = String::with_capacity(
        header.len() + blocks.iter().map(|b| b.len() + ENTRY_SEPARATOR.len()).sum::<usize>(),
    );
    out.push_str(header);
    out.push_str(&blocks.join(ENTRY_SEPARATOR));
    out
}

/// Prepend the header file to the blocks and write the result to `output`.
///
/// The output is created or truncated in place; a failed write can leave a
/// partial file behind.
pub fn write_output(header: &Path, blocks: &[String], output: &Path) -> Result<()> {
    let header_text =
        std::fs::read_to_string(header).map_err(|e| GenerateError::io(header, e))?;
    let content = assemble(&header_text, blocks);
    std::fs::write(output, content).map_err(|e| GenerateError::io(output, e))
}
