//! Labeled array model
//!
//! This module provides the labeled multi-dimensional array the rest of
//! the crate operates on: named dimensions with coordinate labels, the
//! array itself, and the attribute collection a dimension split produces.

mod dimension;
mod labeled;
mod split_result;

pub use dimension::Dimension;
pub use labeled::LabeledArray;
pub use split_result::{Attribute, SplitResult};
