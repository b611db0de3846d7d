//! Checked file opening.
//!
//! Wraps [`std::fs`] opens so callers get one error shape with the path
//! in the message, instead of a bare OS error.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::{CliError, Result};

/// How a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Open an existing file for reading.
    Read,
    /// Create or truncate for writing.
    Write,
    /// Create or extend for appending.
    Append,
}

/// Opens a file, mapping failures to [`CliError::FileAccess`] with the
/// path and a readable reason.
///
/// # Examples
///
/// ```no_run
/// use usage_pattern_cli::{FileMode, open_file};
///
/// let file = open_file("report.txt", FileMode::Read)?;
/// # let _ = file;
/// # Ok::<(), usage_pattern_cli::CliError>(())
/// ```
pub fn open_file(path: impl AsRef<Path>, mode: FileMode) -> Result<File> {
    let path = path.as_ref();
    let opened = match mode {
        FileMode::Read => File::open(path),
        FileMode::Write => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path),
        FileMode::Append => OpenOptions::new().append(true).create(true).open(path),
    };
    opened.map_err(|error| CliError::FileAccess {
        path: path.display().to_string(),
        reason: access_reason(&error),
    })
}

fn access_reason(error: &io::Error) -> String {
    match error.kind() {
        io::ErrorKind::NotFound => "no such file".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => error.to_string(),
    }
}
