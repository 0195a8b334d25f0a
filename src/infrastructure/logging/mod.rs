//! Logging infrastructure
//!
//! Diagnostic sink built on tracing and tracing-subscriber:
//! - Append-only log file (stdout is reserved for the credential payload)
//! - Text or JSON line format
//! - Secret scrubbing for payloads that reach the log

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::LogSink;
pub use secret_scrubbing::SecretScrubber;
