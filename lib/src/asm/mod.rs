//! Selecting which declared methods get their visitors wrapped
//!
//! When the class file of a type is rewritten, [`ForDeclaredMethods`] sits in front of the class
//! visitor and, for every declared method accepted by an [`ElementMatcher`], swaps the method
//! visitor for one produced by a [`MethodVisitorWrapper`]. Whatever emits the method body (for
//! instance a [stack manipulation](crate::emit::StackManipulation)) is none the wiser.

mod class_visitor;
mod description;
mod for_declared_methods;
mod matcher;

pub use class_visitor::*;
pub use description::*;
pub use for_declared_methods::*;
pub use matcher::*;
