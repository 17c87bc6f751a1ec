//! Splitting strategies for the two split modes
//!
//! - BinarySplitter: fixed-size parts cut on byte boundaries
//! - NewlineSplitter: whole lines per part, bounded by the part size

pub mod binary_splitter;
pub mod newline_splitter;

// Re-export the splitter structs
pub use binary_splitter::BinarySplitter;
pub use newline_splitter::{NewlineSplitter, LINE_ENDING};
