//! Run configuration.

use crate::classify::TextExtensions;
use crate::error::{Error, Result};
use crate::naming::{sanitize, uppercase_guard};
use std::path::{Path, PathBuf};

/// Configuration for a single generator run
#[derive(Debug, Clone)]
pub struct BakeConfig {
    /// Directory tree to embed
    pub root: PathBuf,
    /// Declaration artifact (the `.h` file)
    pub header_path: PathBuf,
    /// Definition artifact (the `.c` file)
    pub source_path: PathBuf,
    /// Global prefix for every generated symbol
    pub prefix: Option<String>,
    /// Include guard; derived from the header file name when unset
    pub guard: Option<String>,
    /// Extensions whose files get a terminating zero byte
    pub text_extensions: TextExtensions,
    /// Leave incomplete artifacts on disk when the walk fails.
    ///
    /// A missing or non-directory root is rejected before either artifact
    /// is created, so it never leaves output behind.
    pub keep_partial: bool,
    /// Visit directory entries sorted by file name
    pub sort_entries: bool,
}

impl BakeConfig {
    /// Creates a config with default options
    pub fn new(
        root: impl Into<PathBuf>,
        header_path: impl Into<PathBuf>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            header_path: header_path.into(),
            source_path: source_path.into(),
            prefix: None,
            guard: None,
            text_extensions: TextExtensions::default(),
            keep_partial: false,
            sort_entries: true,
        }
    }

    /// Sets the global symbol prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the include guard
    pub fn guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    /// Sets the text extensions
    pub fn text_extensions(mut self, exts: TextExtensions) -> Self {
        self.text_extensions = exts;
        self
    }

    /// Sets whether incomplete artifacts survive a failed walk
    pub fn keep_partial(mut self, keep: bool) -> Self {
        self.keep_partial = keep;
        self
    }

    /// Sets whether directory entries are visited in name order
    pub fn sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Checks the configuration before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.header_path.as_os_str().is_empty() {
            return Err(Error::invalid_config("declaration file path is required"));
        }
        if self.source_path.as_os_str().is_empty() {
            return Err(Error::invalid_config("definition file path is required"));
        }
        if self.header_path == self.source_path {
            return Err(Error::invalid_config(format!(
                "declaration and definition paths are both '{}'",
                self.header_path.display()
            )));
        }
        if self.header_path.file_name().is_none() || self.source_path.file_name().is_none() {
            return Err(Error::invalid_config("output paths must name a file"));
        }
        if matches!(self.prefix.as_deref(), Some("")) {
            return Err(Error::invalid_config("prefix must not be empty"));
        }
        if self.resolved_guard().is_empty() {
            return Err(Error::invalid_config("include guard must not be empty"));
        }
        Ok(())
    }

    /// The include guard written to the declaration artifact.
    ///
    /// An explicit guard is only uppercased. A derived guard is the header
    /// file name without its extension, sanitized and then uppercased.
    pub fn resolved_guard(&self) -> String {
        match &self.guard {
            Some(guard) => uppercase_guard(guard),
            None => uppercase_guard(&sanitize(&header_stem(&self.header_path))),
        }
    }
}

/// Header file name with everything from the last `.` removed
fn header_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(idx) => name[..idx].to_string(),
        None => name,
    }
}
