//! Bytecode instructions and the sinks they get emitted into
//!
//! ### Structure
//!
//! Method bodies are emitted top to bottom as a stream of [`Instruction`]s pushed into a
//! [`MethodVisitor`]. Only the straight-line part of the [instruction set][0] is represented,
//! along with method calls and returns, since that is all that stack manipulations ever emit.
//!
//! ### Sinks
//!
//! Visitors are meant to be stacked:
//!
//!   - [`CodeWriter`] is the usual bottom of the stack, encoding instructions into bytes
//!   - [`StackTracker`] measures the operand stack effect of what passes through it
//!   - [`LoggingMethodVisitor`] traces every instruction
//!
//! A plain `Vec<Instruction>` is also a visitor, which is handy for inspecting output.
//!
//! [0]: https://docs.oracle.com/javase/specs/jvms/se18/html/jvms-6.html#jvms-6.5

mod code_writer;
mod instructions;
mod logging;
mod stack_tracker;
mod visitor;

pub use code_writer::*;
pub use instructions::*;
pub use logging::*;
pub use stack_tracker::*;
pub use visitor::*;
