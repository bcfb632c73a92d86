//! Human readable output: error messages and expression trees.

pub mod error;
pub mod tree;

pub use tree::{print_expr, print_expr_string};
