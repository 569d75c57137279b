//! IndexScope CLI library.
//!
//! This module exposes internal types for testing purposes.
//! The main entry point is the `indexscope` binary.

pub mod cli;
pub mod config;
pub mod input;
#[cfg(feature = "metadata-provider")]
pub mod metadata;
pub mod output;
#[cfg(feature = "serve")]
pub mod server;

// Re-export commonly used types
pub use cli::Args;
