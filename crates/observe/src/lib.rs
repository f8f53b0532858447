//! Logging setup shared by the binaries of this workspace. Command line
//! tools print their results on stdout, so every log line goes to stderr.
pub mod config;
pub mod tracing;

pub use config::Config;
