//! `clipform` is a library to reshape clipboard text through reusable templates.
//!
//! A template is an ordered list of transformations (trim lines, wrap in a
//! code block, regex replace, capture a value and insert it elsewhere...).
//! [`transforms::apply_all`] runs them over a text, threading a capture context
//! from one step to the next, and [`detector::detect_pattern`] turns a short
//! example such as a timestamp into a pattern able to find its like.
//!
//! Templates are managed through [`catalog::TemplateCatalog`], which merges the
//! built-in presets with the TOML files of the templates directory.
//!
//! "Hello world" example:
//! ```
//! use clipform::template::{Operation, Transformation};
//! use clipform::transforms::apply_all;
//!
//! let steps = vec![
//!     Transformation::new("1", 1, Operation::TrimLines),
//!     Transformation::new("2", 2, Operation::AddPrefix { value: "> ".to_string() }),
//! ];
//!
//! assert_eq!(apply_all("  Hello\n world!  ", &steps).unwrap(), "> Hello\n> world!");
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod context;
pub mod controller;
pub mod detector;
pub mod error;
pub mod log;
pub mod presets;
pub mod reader;
pub mod recent;
pub mod template;
pub mod transforms;
pub mod writer;

/// The clipform prelude
///
/// This module re-exports the most commonly used items from clipform.
/// You can use it with `use clipform::prelude::*;` to bring all common items into scope.
pub mod prelude {
    // Re-export commonly used traits
    pub use crate::transforms::Transform;

    // Re-export commonly used types
    pub use crate::context::TransformContext;
    pub use crate::error::Result;
    pub use crate::template::{Operation, Position, Template, Transformation};

    // Re-export commonly used functions
    pub use crate::detector::detect_pattern;
    pub use crate::transforms::{apply_all, apply_one};
}
