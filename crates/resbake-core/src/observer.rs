//! Observation hooks for a generator run.
//!
//! The [`BakeObserver`] trait receives an event for every directory entered
//! and every file embedded or skipped. All methods default to no-ops, so an
//! implementation only overrides what it cares about.

use crate::classify::ResourceKind;
use std::path::Path;

/// A resource that was written to both artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedResource<'a> {
    /// Path of the input file
    pub path: &'a Path,
    /// Generated C symbol, prefix included
    pub symbol: &'a str,
    /// Text or binary
    pub kind: ResourceKind,
    /// Size of the input file in bytes
    pub file_len: u64,
}

impl EmbeddedResource<'_> {
    /// Declared array length, terminator included
    pub fn array_len(&self) -> u64 {
        self.file_len + self.kind.terminator_len()
    }
}

/// Why a regular file was not embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file has no content
    Empty,
    /// The file is one of the artifacts being generated
    OutputArtifact,
}

/// Trait for observing a generator run.
///
/// # Example
///
/// ```
/// use resbake_core::observer::{BakeObserver, EmbeddedResource};
///
/// #[derive(Default)]
/// struct Symbols(Vec<String>);
///
/// impl BakeObserver for Symbols {
///     fn on_embedded(&mut self, resource: &EmbeddedResource<'_>) {
///         self.0.push(resource.symbol.to_string());
///     }
/// }
/// ```
pub trait BakeObserver {
    /// Called when the walker enters a directory
    fn on_enter_dir(&mut self, dir: &Path, prefix: Option<&str>) {
        let _ = (dir, prefix);
    }

    /// Called after a resource has been written to both artifacts
    fn on_embedded(&mut self, resource: &EmbeddedResource<'_>) {
        let _ = resource;
    }

    /// Called when a regular file is skipped
    fn on_skipped(&mut self, path: &Path, reason: SkipReason) {
        let _ = (path, reason);
    }
}

/// A no-op observer
pub struct NullObserver;

impl BakeObserver for NullObserver {}

/// An observer that collects statistics about the run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BakeStats {
    /// Directories visited, root included
    pub directories: usize,
    /// Text resources embedded
    pub text_files: usize,
    /// Binary resources embedded
    pub binary_files: usize,
    /// Input bytes embedded, terminators excluded
    pub bytes: u64,
    /// Zero-byte files skipped
    pub skipped_empty: usize,
    /// Output artifacts found in the tree and skipped
    pub skipped_outputs: usize,
}

impl BakeStats {
    /// Total resources embedded
    pub fn embedded(&self) -> usize {
        self.text_files + self.binary_files
    }
}

impl BakeObserver for BakeStats {
    fn on_enter_dir(&mut self, _dir: &Path, _prefix: Option<&str>) {
        self.directories += 1;
    }

    fn on_embedded(&mut self, resource: &EmbeddedResource<'_>) {
        match resource.kind {
            ResourceKind::Text => self.text_files += 1,
            ResourceKind::Binary => self.binary_files += 1,
        }
        self.bytes += resource.file_len;
    }

    fn on_skipped(&mut self, _path: &Path, reason: SkipReason) {
        match reason {
            SkipReason::Empty => self.skipped_empty += 1,
            SkipReason::OutputArtifact => self.skipped_outputs += 1,
        }
    }
}
