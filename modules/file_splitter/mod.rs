//! File Splitter
//!
//! Cuts a source file into numbered part files inside a parts directory.
//! Binary mode cuts on fixed byte counts; newline mode keeps whole lines
//! together and bounds each part by the configured size.

pub mod types;
pub mod splitter;
pub mod splitter_types;

// Re-export main types and the FileSplitter
pub use types::*;
pub use splitter::FileSplitter;
