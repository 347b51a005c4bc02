//! File backend implementation

use crate::core::{format, LoggerBackend, LoggerError, Result, Severity};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

enum Handle {
    /// Not opened yet; opened on the first accepted write.
    Pending,
    Open(BufWriter<File>),
    /// Shut down. Never reopened, so the file is truncated at most once.
    Closed,
    /// The first open failed. The error was returned once; later writes are dropped.
    Failed,
}

/// Writes formatted lines to a file.
///
/// The file is created (truncating any previous content) on the first
/// message the threshold admits, so a backend that never logs never touches
/// the disk. Every line is flushed as soon as it is written.
///
/// # Examples
///
/// ```no_run
/// use editor_plugin_log::{FileBackend, LogRegistry, Severity};
///
/// let registry = LogRegistry::new();
/// registry.register(FileBackend::new("~/.vim-do.log", Severity::Info)?);
/// # Ok::<(), editor_plugin_log::LoggerError>(())
/// ```
pub struct FileBackend {
    path: PathBuf,
    threshold: Severity,
    handle: Handle,
}

impl FileBackend {
    /// Create a backend for `path`, expanding a leading `~`.
    ///
    /// Fails with [`LoggerError::Log`] if the path can never be opened for
    /// writing: empty, not a regular file, read-only, or inside a missing or
    /// read-only directory.
    pub fn new(path: impl AsRef<Path>, threshold: Severity) -> Result<Self> {
        let path = expand_home(path.as_ref());
        validate_target(&path)?;

        Ok(Self {
            path,
            threshold,
            handle: Handle::Pending,
        })
    }

    /// Create a backend from a numeric level as stored in editor settings.
    pub fn with_level(path: impl AsRef<Path>, level: i64) -> Result<Self> {
        Self::new(path, Severity::try_from(level)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        matches!(self.handle, Handle::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.handle, Handle::Closed)
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.handle, Handle::Failed)
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>> {
        if let Handle::Pending = self.handle {
            let opened = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path);
            match opened {
                Ok(file) => self.handle = Handle::Open(BufWriter::new(file)),
                Err(e) => {
                    self.handle = Handle::Failed;
                    return Err(LoggerError::log_io(&self.path, e));
                }
            }
        }

        match self.handle {
            Handle::Open(ref mut writer) => Ok(writer),
            _ => Err(LoggerError::closed("file")),
        }
    }
}

impl LoggerBackend for FileBackend {
    fn kind(&self) -> &str {
        "file"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn log(&mut self, message: &str, severity: Severity) -> Result<()> {
        if !self.accepts(severity) || self.has_failed() {
            return Ok(());
        }

        let mut line = format(message, severity);
        line.push('\n');

        let writer = self.writer()?;
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Handle::Open(mut writer) = std::mem::replace(&mut self.handle, Handle::Closed) {
            if let Err(e) = writer.flush() {
                eprintln!(
                    "[LOGGER ERROR] Failed to flush '{}' during shutdown: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        if let Handle::Open(ref mut writer) = self.handle {
            let _ = writer.flush();
        }
    }
}

/// Replace a leading `~` with the current user's home directory.
///
/// Only the bare `~` form is expanded. `~user` paths are returned unchanged
/// since resolving another account's home needs the system user database.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn validate_target(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(LoggerError::log(path, "empty path"));
    }

    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => {
            return Err(LoggerError::log(path, "not a regular file"));
        }
        Ok(meta) if meta.permissions().readonly() => {
            return Err(LoggerError::log(path, "file is read-only"));
        }
        Ok(_) => return Ok(()),
        Err(_) => {}
    }

    // The file will be created, so the directory must accept new entries.
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match fs::metadata(parent) {
        Ok(meta) if !meta.is_dir() => Err(LoggerError::log(
            path,
            format!("'{}' is not a directory", parent.display()),
        )),
        Ok(meta) if meta.permissions().readonly() => Err(LoggerError::log(
            path,
            format!("directory '{}' is read-only", parent.display()),
        )),
        Ok(_) => Ok(()),
        Err(e) => Err(LoggerError::log(
            path,
            format!("directory '{}' is not usable: {}", parent.display(), e),
        )),
    }
}
