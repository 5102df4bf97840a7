//! Heap parsing module
//!
//! Turns a colon-delimited heap such as `json:base64:direct:W10=` into the
//! ordered list of steps the interpreter executes.
//!
//! # Usage
//!
//! ```
//! use envres_application::heap::parse_heap;
//! use envres_domain::{Modifier, Step};
//!
//! let steps = parse_heap("bool:direct:1").unwrap();
//! assert_eq!(
//!     steps,
//!     vec![
//!         Step::with_argument(Modifier::Direct, "1"),
//!         Step::new(Modifier::Bool),
//!     ]
//! );
//! ```

pub mod parser;

pub use parser::{HeapParser, parse_heap, split_parts};
