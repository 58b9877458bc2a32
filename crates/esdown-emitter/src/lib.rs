//! JavaScript printer and class-member lowering for esdown.
//!
//! - `emitter`: prints a program tree back to JavaScript text
//! - `transforms`: tree-to-tree passes, currently the lowering of class
//!   fields and static blocks into constructors and plain statements

pub mod emitter;
pub use emitter::{Printer, print_to_string};

pub mod transforms;
pub use transforms::class_members::{
    ClassMembersSummary, TranspilationErrorKind, rewrite_class_members,
};
pub use transforms::explicit_constructors::ensure_constructor;
