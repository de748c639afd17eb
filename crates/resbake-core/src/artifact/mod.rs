//! Lifecycle of the two generated artifacts.
//!
//! [`Artifacts`] creates the declaration (`.h`) and definition (`.c`) files,
//! writes their framing and captures the filesystem identity of each one
//! right after creation. The identities back the [`OutputGuard`], which keeps
//! the walker from embedding an artifact that lives inside the scanned tree.
//!
//! An artifact that fails during creation is removed before the error is
//! returned, so no half-initialized file is left behind.

mod format;

use crate::classify::ResourceKind;
use crate::config::BakeConfig;
use crate::error::{Error, Result};
use same_file::Handle;
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub use format::{
    write_declaration, write_definition, write_header_epilogue, write_header_prologue,
    write_source_banner, SOURCE_BANNER,
};

/// Filesystem identity of an output artifact
#[derive(Debug)]
pub struct OutputIdentity {
    name: OsString,
    handle: Handle,
}

impl OutputIdentity {
    /// Captures the identity of an open file
    pub fn capture(path: &Path, file: &File) -> Result<Self> {
        let name = path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| Error::invalid_config(format!("'{}' has no file name", path.display())))?;
        let handle = file
            .try_clone()
            .and_then(Handle::from_file)
            .map_err(|e| Error::file_identity(path, e))?;
        Ok(Self { name, handle })
    }

    /// Base name of the artifact
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Returns true if both identities refer to the same underlying file
    pub fn same_file_as(&self, other: &OutputIdentity) -> bool {
        self.handle == other.handle
    }

    /// Returns true if `file` is the same underlying file as this artifact
    pub fn is_same_file(&self, path: &Path, file: &File) -> Result<bool> {
        let candidate = file
            .try_clone()
            .and_then(Handle::from_file)
            .map_err(|e| Error::file_identity(path, e))?;
        Ok(candidate == self.handle)
    }
}

/// Detects input files that are one of the artifacts being written
#[derive(Debug, Clone, Copy)]
pub struct OutputGuard<'a> {
    outputs: [&'a OutputIdentity; 2],
}

impl<'a> OutputGuard<'a> {
    /// Creates a guard over the given identities
    pub fn new(header: &'a OutputIdentity, source: &'a OutputIdentity) -> Self {
        Self {
            outputs: [header, source],
        }
    }

    /// Returns true if the open input `file` named `name` is an output artifact.
    ///
    /// Identity is only queried when the base name matches an artifact's.
    /// A same-named file elsewhere is not an artifact.
    pub fn is_output(&self, name: &OsStr, path: &Path, file: &File) -> Result<bool> {
        for output in self.outputs {
            if output.name() == name && output.is_same_file(path, file)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// A created artifact: buffered writer plus captured identity
#[derive(Debug)]
struct Artifact {
    path: PathBuf,
    out: BufWriter<File>,
    identity: OutputIdentity,
}

impl Artifact {
    /// Creates or truncates `path`, captures its identity, then writes the
    /// framing produced by `init`. Any failure removes the file again.
    fn create(
        path: &Path,
        init: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    ) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::file_create(path, e))?;

        let identity = match OutputIdentity::capture(path, &file) {
            Ok(identity) => identity,
            Err(err) => {
                drop(file);
                remove_quietly(path);
                return Err(err);
            }
        };

        let mut artifact = Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            identity,
        };
        if let Err(err) = artifact.write(init) {
            artifact.discard();
            return Err(err);
        }

        debug!("Opened artifact '{}'", path.display());
        Ok(artifact)
    }

    fn write(&mut self, f: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>) -> Result<()> {
        f(&mut self.out).map_err(|e| Error::file_write(&self.path, e))
    }

    fn flush(&mut self) -> Result<()> {
        self.out
            .flush()
            .map_err(|e| Error::file_write(&self.path, e))?;
        debug!("Closed artifact '{}'", self.path.display());
        Ok(())
    }

    fn discard(self) {
        let Self { path, out, identity } = self;
        // Release both handles before removing the file.
        drop(identity);
        drop(out);
        remove_quietly(&path);
    }
}

/// Removes a generated file. Anything that is not a regular file, such as a
/// device node given as output path, is left alone.
fn remove_quietly(path: &Path) {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            debug!("Not removing '{}': not a regular file", path.display());
            return;
        }
        Err(e) => {
            warn!("Failed to remove '{}': {}", path.display(), e);
            return;
        }
    }
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed '{}'", path.display()),
        Err(e) => warn!("Failed to remove '{}': {}", path.display(), e),
    }
}

/// The open declaration and definition artifacts of a run
#[derive(Debug)]
pub struct Artifacts {
    header: Artifact,
    source: Artifact,
}

impl Artifacts {
    /// Creates both artifacts and writes their opening framing.
    ///
    /// If the definition artifact cannot be created, the declaration
    /// artifact that was already created is removed. Two paths that resolve
    /// to the same file (`r.h` and `./r.h`, hard links) are rejected.
    pub fn open(config: &BakeConfig) -> Result<Self> {
        let guard = config.resolved_guard();
        let header = Artifact::create(&config.header_path, |w| write_header_prologue(w, &guard))?;

        let source = match Artifact::create(&config.source_path, |w| write_source_banner(w)) {
            Ok(source) => source,
            Err(err) => {
                header.discard();
                return Err(err);
            }
        };

        if source.identity.same_file_as(&header.identity) {
            drop(source);
            header.discard();
            return Err(Error::invalid_config(format!(
                "'{}' and '{}' are the same file",
                config.header_path.display(),
                config.source_path.display()
            )));
        }

        Ok(Self { header, source })
    }

    /// Guard over the identities of both artifacts
    pub fn guard(&self) -> OutputGuard<'_> {
        OutputGuard::new(&self.header.identity, &self.source.identity)
    }

    /// Writes the declaration and the definition of one resource
    pub fn emit(&mut self, symbol: &str, kind: ResourceKind, data: &[u8]) -> Result<()> {
        self.header
            .write(|w| write_declaration(w, symbol, kind, data))?;
        self.source
            .write(|w| write_definition(w, symbol, kind, data))
    }

    /// Path of the declaration artifact
    pub fn header_path(&self) -> &Path {
        &self.header.path
    }

    /// Path of the definition artifact
    pub fn source_path(&self) -> &Path {
        &self.source.path
    }

    /// Closes both artifacts with their normal framing.
    ///
    /// If writing the framing or flushing fails, both artifacts are removed
    /// unless `keep_on_error` is set. The first error is returned.
    pub fn finish(self, keep_on_error: bool) -> Result<()> {
        let Self {
            mut header,
            mut source,
        } = self;
        let closed_header = header
            .write(|w| write_header_epilogue(w))
            .and_then(|()| header.flush());
        let closed_source = source.flush();

        match closed_header.and(closed_source) {
            Ok(()) => Ok(()),
            Err(err) => {
                if !keep_on_error {
                    warn!("Failed to close artifacts, removing them");
                    source.discard();
                    header.discard();
                }
                Err(err)
            }
        }
    }

    /// Closes and removes both artifacts
    pub fn discard(self) {
        self.source.discard();
        self.header.discard();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> BakeConfig {
        BakeConfig::new(
            dir.path(),
            dir.path().join("res.h"),
            dir.path().join("res.c"),
        )
    }

    #[test]
    fn test_open_and_finish_writes_framing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let mut artifacts = Artifacts::open(&config).unwrap();
        artifacts.emit("x_bin", ResourceKind::Binary, &[0xab]).unwrap();
        artifacts.finish(false).unwrap();

        let header = fs::read_to_string(dir.path().join("res.h")).unwrap();
        let source = fs::read_to_string(dir.path().join("res.c")).unwrap();
        assert!(header.starts_with("#ifndef RES\n#define RES\n"));
        assert!(header.contains("extern const char x_bin[1];\n"));
        assert!(header.ends_with("#endif\n\n#endif\n"));
        assert_eq!(source, "/* Generated by resbake */\n\nconst char x_bin[1] = {0xab};\n");
    }

    #[test]
    fn test_discard_removes_both() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let artifacts = Artifacts::open(&config).unwrap();
        artifacts.discard();

        assert!(!dir.path().join("res.h").exists());
        assert!(!dir.path().join("res.c").exists());
    }

    #[test]
    fn test_failed_source_removes_header() {
        let dir = TempDir::new().unwrap();
        let config = BakeConfig::new(
            dir.path(),
            dir.path().join("res.h"),
            dir.path().join("missing").join("res.c"),
        );

        let err = Artifacts::open(&config).unwrap_err();
        assert!(matches!(err, Error::FileCreate { .. }));
        assert!(!dir.path().join("res.h").exists());
    }

    #[test]
    fn test_same_file_through_different_paths_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let header = dir.path().join("res.h");
        let config = BakeConfig::new(
            dir.path(),
            &header,
            dir.path().join("sub").join("..").join("res.h"),
        );
        assert!(config.validate().is_ok());

        let err = Artifacts::open(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(!header.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_finish_removes_artifacts() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("res.c");
        let config = BakeConfig::new(dir.path(), full, &source).guard("G");

        let mut artifacts = Artifacts::open(&config).unwrap();
        artifacts.emit("x_bin", ResourceKind::Binary, &[1]).unwrap();
        let err = artifacts.finish(false).unwrap_err();

        assert!(matches!(err, Error::FileWrite { .. }));
        assert!(!source.exists());
        assert!(full.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_finish_keeps_artifacts_when_asked() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("res.h");
        let config = BakeConfig::new(dir.path(), &header, full);

        let mut artifacts = Artifacts::open(&config).unwrap();
        artifacts.emit("x_bin", ResourceKind::Binary, &[1]).unwrap();
        assert!(artifacts.finish(true).is_err());

        let text = fs::read_to_string(&header).unwrap();
        assert!(text.contains("extern const char x_bin[1];"));
        assert!(text.ends_with("#endif\n\n#endif\n"));
    }

    #[test]
    fn test_guard_matches_by_identity() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let artifacts = Artifacts::open(&config).unwrap();

        let other_dir = dir.path().join("other");
        fs::create_dir(&other_dir).unwrap();
        let impostor = other_dir.join("res.h");
        fs::write(&impostor, b"not the header").unwrap();

        let header = File::open(artifacts.header_path()).unwrap();
        let source = File::open(artifacts.source_path()).unwrap();
        let other = File::open(&impostor).unwrap();
        let guard = artifacts.guard();

        assert!(guard
            .is_output(OsStr::new("res.h"), artifacts.header_path(), &header)
            .unwrap());
        assert!(guard
            .is_output(OsStr::new("res.c"), artifacts.source_path(), &source)
            .unwrap());
        assert!(!guard.is_output(OsStr::new("res.h"), &impostor, &other).unwrap());
    }

    #[test]
    fn test_guard_ignores_unmatched_names() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let artifacts = Artifacts::open(&config).unwrap();

        // Same file, different name: only the base name triggers the check.
        let header = File::open(artifacts.header_path()).unwrap();
        assert!(!artifacts
            .guard()
            .is_output(OsStr::new("alias.h"), artifacts.header_path(), &header)
            .unwrap());
    }
}
