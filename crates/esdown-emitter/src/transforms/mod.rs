//! Tree-to-tree transforms run before printing.

pub mod class_members;
pub mod explicit_constructors;
