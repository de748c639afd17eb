//! Text/binary classification by file extension.
//!
//! Text resources get a terminating zero byte so they can be used directly
//! as C strings. Classification looks only at the extension, never at the
//! file contents.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Extensions treated as text when none are configured
pub const DEFAULT_TEXT_EXTENSIONS: &str = "ini,txt,json,xml";

/// How a resource is embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Raw bytes, array length equals file length
    Binary,
    /// Bytes followed by a terminating `0x00`
    Text,
}

impl ResourceKind {
    /// Number of bytes appended after the file contents
    pub fn terminator_len(self) -> u64 {
        match self {
            ResourceKind::Binary => 0,
            ResourceKind::Text => 1,
        }
    }

    /// Returns true for text resources
    pub fn is_text(self) -> bool {
        self == ResourceKind::Text
    }
}

/// Ordered set of extensions that classify a file as text.
///
/// Parsed from a comma-joined list. Empty entries are dropped and repeats are
/// kept only once, in first-seen order. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextExtensions {
    exts: Vec<String>,
}

impl Default for TextExtensions {
    fn default() -> Self {
        DEFAULT_TEXT_EXTENSIONS.parse().unwrap_or_else(|e| match e {})
    }
}

impl TextExtensions {
    /// Builds a set from individual extensions.
    ///
    /// Extensions are kept verbatim: `" txt"` only matches a name ending in
    /// `. txt`. Empty entries and duplicates are dropped.
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { exts: Vec::new() };
        for ext in exts {
            let ext = ext.as_ref();
            if !ext.is_empty() && !set.contains(ext) {
                set.exts.push(ext.to_string());
            }
        }
        set
    }

    /// Returns true if `ext` is exactly one of the configured extensions
    pub fn contains(&self, ext: &str) -> bool {
        self.exts.iter().any(|e| e == ext)
    }

    /// Number of configured extensions
    pub fn len(&self) -> usize {
        self.exts.len()
    }

    /// Returns true if no extension is configured
    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    /// Classifies a file name
    pub fn classify(&self, filename: &str) -> ResourceKind {
        match extension(filename) {
            Some(ext) if self.contains(ext) => ResourceKind::Text,
            _ => ResourceKind::Binary,
        }
    }
}

impl FromStr for TextExtensions {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.split(',')))
    }
}

impl fmt::Display for TextExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.exts.join(","))
    }
}

/// Extension of a file name: everything after the last `.`.
///
/// A trailing dot yields no extension.
pub fn extension(filename: &str) -> Option<&str> {
    filename
        .rfind('.')
        .map(|idx| &filename[idx + 1..])
        .filter(|ext| !ext.is_empty())
}

/// Delimiter-aware membership test against a comma-joined extension list.
///
/// A match only counts when it is bounded by the start of the list or a comma
/// on the left, and by a comma or the end of the list on the right.
pub fn is_text(filename: &str, configured_extensions: &str) -> bool {
    let Some(ext) = extension(filename) else {
        return false;
    };
    configured_extensions.split(',').any(|candidate| candidate == ext)
}
