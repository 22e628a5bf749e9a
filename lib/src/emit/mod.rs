//! Stack manipulations and their size accounting
//!
//! A [`StackManipulation`] is a unit of straight-line code with a known effect on the operand
//! stack. [`HandleInvocation`] is the exact call through a `MethodHandle`. The rest are the
//! usual small building blocks needed around it: constants, local variable access, duplicating
//! or dropping the top of the stack, and returning.

mod constant;
mod context;
mod duplication;
mod handle_invocation;
mod method_return;
mod method_type;
mod removal;
mod size;
mod stack_manipulation;
mod variable_access;

pub use constant::*;
pub use context::*;
pub use duplication::*;
pub use handle_invocation::*;
pub use method_return::*;
pub use method_type::*;
pub use removal::*;
pub use size::*;
pub use stack_manipulation::*;
pub use variable_access::*;
