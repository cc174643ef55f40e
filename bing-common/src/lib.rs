//! Shared utilities for the Bing search workspace.
//!
//! Right now this is only the [`observability`] module, which owns the
//! global `tracing` setup used by integration tests and by any binary that
//! embeds the search client.
//!
//! ```no_run
//! use bing_common::observability::{init_logging, LogConfig};
//!
//! let path = init_logging(LogConfig::default()).expect("logging");
//! println!("logging to {}", path.display());
//! ```

pub mod observability;
