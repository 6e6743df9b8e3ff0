//! Structured logging setup and JSON line output.

mod format;

pub use format::{RejectedLine, StructuredLogger};
