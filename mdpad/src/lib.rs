//! Expose mdpad's command-line internals for use in integration tests. The
//! rendering API lives in `mdpad_core`; nothing here is meant for reuse.
pub mod cli;
pub mod config;
pub mod error;
pub mod utils;
