//! Syntax utilities shared by the parser, printer and transforms.

pub mod operators;
pub mod transform_utils;
