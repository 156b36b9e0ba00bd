//! Check command implementation.

use pensieve_archive::Pensieve;
use pensieve_core::ErrorCode;
use std::io::{self, Write};
use std::path::Path;

/// Load `path` through the container and report the result kind.
///
/// Prints the numeric code followed by a status line.
pub fn check_file<W: Write>(path: &Path, out: &mut W) -> io::Result<ErrorCode> {
    let result = Pensieve::load_from_path(path);
    let code = ErrorCode::of(&result);

    writeln!(out, "{}", code)?;
    match result {
        Ok(archive) => writeln!(
            out,
            "[Ok]: {}: {} files, {} bytes",
            path.display(),
            archive.len(),
            archive.total_content_size()
        )?,
        Err(e) => {
            tracing::debug!("{}: {}", path.display(), e);
            writeln!(out, "[Error]: {}", code.describe())?;
        }
    }

    Ok(code)
}
