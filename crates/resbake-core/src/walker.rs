//! Recursive directory walk and per-file emission.
//!
//! Each directory is listed once, then visited in two passes: every regular
//! file is emitted with the directory's prefix, then every subdirectory is
//! walked with the prefix extended by its sanitized name. Symbolic links and
//! special files are ignored.

use crate::artifact::Artifacts;
use crate::config::BakeConfig;
use crate::error::{Error, Result};
use crate::naming::{join_prefix, sanitize_os};
use crate::observer::{BakeObserver, EmbeddedResource, SkipReason};
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, trace};
use walkdir::{DirEntry, WalkDir};

/// Walks a directory tree and writes every resource into the artifacts
pub struct TreeWalker<'a, O: BakeObserver + ?Sized> {
    config: &'a BakeConfig,
    artifacts: &'a mut Artifacts,
    observer: &'a mut O,
}

impl<'a, O: BakeObserver + ?Sized> TreeWalker<'a, O> {
    /// Creates a walker writing into `artifacts`
    pub fn new(config: &'a BakeConfig, artifacts: &'a mut Artifacts, observer: &'a mut O) -> Self {
        Self {
            config,
            artifacts,
            observer,
        }
    }

    /// Walks `dir` with the given symbol prefix.
    ///
    /// The first error aborts the whole walk.
    pub fn walk(&mut self, dir: &Path, prefix: Option<&str>) -> Result<()> {
        debug!("Entering '{}'", dir.display());
        self.observer.on_enter_dir(dir, prefix);

        let entries = self.list(dir)?;

        for entry in entries.iter().filter(|e| e.file_type().is_file()) {
            self.emit_file(dir, entry.file_name(), prefix)?;
        }

        for entry in entries.iter().filter(|e| e.file_type().is_dir()) {
            let child_prefix = join_prefix(prefix, &sanitize_os(entry.file_name()));
            self.walk(entry.path(), Some(&child_prefix))?;
        }

        Ok(())
    }

    /// Direct children of `dir`, without following symlinks
    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        walker
            .into_iter()
            .map(|entry| {
                entry.map_err(|err| {
                    let path = err.path().unwrap_or(dir).to_path_buf();
                    Error::directory_read(path, err.into())
                })
            })
            .collect()
    }

    /// Embeds the regular file `name` found in `dir`.
    ///
    /// Output artifacts and empty files are skipped. Failing to open or read
    /// the file is an error.
    pub fn emit_file(&mut self, dir: &Path, name: &OsStr, prefix: Option<&str>) -> Result<()> {
        let path = dir.join(name);
        let mut file = File::open(&path).map_err(|e| Error::file_read(&path, e))?;

        if self.artifacts.guard().is_output(name, &path, &file)? {
            debug!("Skipping output artifact '{}'", path.display());
            self.observer.on_skipped(&path, SkipReason::OutputArtifact);
            return Ok(());
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::file_read(&path, e))?;
        drop(file);

        if data.is_empty() {
            info!("Ignoring empty file '{}'", path.display());
            self.observer.on_skipped(&path, SkipReason::Empty);
            return Ok(());
        }

        let kind = self.config.text_extensions.classify(&name.to_string_lossy());
        let symbol = join_prefix(prefix, &sanitize_os(name));

        trace!(
            "Embedding '{}' as {} ({} bytes, {:?})",
            path.display(),
            symbol,
            data.len(),
            kind
        );
        self.artifacts.emit(&symbol, kind, &data)?;

        self.observer.on_embedded(&EmbeddedResource {
            path: &path,
            symbol: &symbol,
            kind,
            file_len: data.len() as u64,
        });
        Ok(())
    }
}
