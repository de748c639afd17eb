//! Top-level driver for a generator run.

use crate::artifact::Artifacts;
use crate::config::BakeConfig;
use crate::error::{Error, Result};
use crate::observer::{BakeObserver, BakeStats};
use crate::walker::TreeWalker;
use tracing::{debug, warn};

/// Embeds a directory tree into a declaration/definition artifact pair
#[derive(Debug, Clone)]
pub struct Baker {
    config: BakeConfig,
}

impl Baker {
    /// Creates a baker for the given configuration
    pub fn new(config: BakeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration
    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    /// Runs the generator and returns statistics about the run
    pub fn run(&self) -> Result<BakeStats> {
        let mut stats = BakeStats::default();
        self.run_with(&mut stats)?;
        Ok(stats)
    }

    /// Runs the generator, reporting every event to `observer`.
    ///
    /// Configuration problems are reported before any file is created. A
    /// root that is missing or not a directory is one of them, so even with
    /// `keep_partial` such a run leaves no artifacts behind.
    ///
    /// Once both artifacts are open, any failure (walking, or writing the
    /// closing framing) removes them unless `keep_partial` is set. With
    /// `keep_partial` they are closed with their normal framing and left on
    /// disk incomplete.
    pub fn run_with<O: BakeObserver + ?Sized>(&self, observer: &mut O) -> Result<()> {
        let config = &self.config;
        config.validate()?;
        if !config.root.is_dir() {
            return Err(Error::not_a_directory(&config.root));
        }

        let mut artifacts = Artifacts::open(config)?;
        let walked = TreeWalker::new(config, &mut artifacts, observer)
            .walk(&config.root, config.prefix.as_deref());

        match walked {
            Ok(()) => {
                artifacts.finish(config.keep_partial)?;
                debug!(
                    "Wrote '{}' and '{}'",
                    config.header_path.display(),
                    config.source_path.display()
                );
                Ok(())
            }
            Err(err) if config.keep_partial => {
                warn!("Walk failed, keeping incomplete artifacts");
                if let Err(close_err) = artifacts.finish(true) {
                    warn!("Failed to close artifacts: {}", close_err);
                }
                Err(err)
            }
            Err(err) => {
                warn!("Walk failed, removing incomplete artifacts");
                artifacts.discard();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();
        let header = dir.path().join("r.h");

        let err = Baker::new(BakeConfig::new(&file, &header, dir.path().join("r.c")))
            .run()
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(!header.exists());
    }

    #[test]
    fn test_missing_root_leaves_nothing_even_when_keeping_partial() {
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("r.h");
        let source = dir.path().join("r.c");

        let err = Baker::new(
            BakeConfig::new(dir.path().join("missing"), &header, &source).keep_partial(true),
        )
        .run()
        .unwrap_err();
        assert!(matches!(err, Error::NotADirectory { .. }));
        assert!(!header.exists());
        assert!(!source.exists());
    }

    #[test]
    fn test_invalid_config_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("r.h");

        let err = Baker::new(BakeConfig::new(dir.path(), &header, &header))
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(!header.exists());
    }
}
