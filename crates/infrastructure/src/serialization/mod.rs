//! Document deserialization for settings files and `require` targets.
//!
//! JSON and YAML are accepted. The format is chosen from the file extension.

mod documents;

pub use documents::*;
