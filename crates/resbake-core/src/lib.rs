//! # resbake-core
//!
//! A library for embedding a directory tree of resource files into C source.
//!
//! Every regular file in the tree becomes a `const char` array in a generated
//! definition file (`.c`), with a matching `extern` declaration in a generated
//! declaration file (`.h`). Files with a configured text extension get a
//! terminating zero byte so they can be used as C strings.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`naming`]: Identifier sanitization and include-guard tokens
//! - [`classify`]: Text/binary classification by extension
//! - [`artifact`]: Lifecycle and layout of the generated files, plus the
//!   identity guard that keeps the generator from embedding its own output
//! - [`walker`]: Recursive directory walk and per-file emission
//! - [`observer`]: Hooks for observing a run
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use resbake_core::{BakeConfig, Baker};
//!
//! let config = BakeConfig::new("./resources", "resources.h", "resources.c")
//!     .prefix("app")
//!     .text_extensions("vs,fs,ini".parse()?);
//!
//! let stats = Baker::new(config).run()?;
//! println!("embedded {} files", stats.embedded());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! With the prefix `app`, a file `resources/shaders/main.vs` becomes the symbol
//! `app_shaders_main_vs`.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod artifact;
mod bake;
pub mod classify;
mod config;
pub mod error;
pub mod naming;
pub mod observer;
pub mod walker;

// Re-export primary types for convenience
pub use bake::Baker;
pub use classify::{is_text, ResourceKind, TextExtensions, DEFAULT_TEXT_EXTENSIONS};
pub use config::BakeConfig;
pub use error::{Error, Result};
pub use naming::{sanitize, uppercase_guard};
pub use observer::{BakeObserver, BakeStats, EmbeddedResource, NullObserver, SkipReason};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
