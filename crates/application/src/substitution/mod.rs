//! Placeholder substitution module
//!
//! Finds `%env(<heap>)%` placeholders in arbitrary text and replaces them,
//! innermost first, with the values their heaps resolve to. A literal `%` is
//! written `%%`.

pub mod processor;
pub mod scanner;

pub use processor::StringProcessor;
pub use scanner::{PREFIX, Placeholder, SUFFIX, find_innermost};
