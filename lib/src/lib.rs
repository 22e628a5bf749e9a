//! Low-level JVM bytecode emission
//!
//! Method bodies are built out of [stack manipulations](emit::StackManipulation): small units
//! that append instructions to a [method visitor](jvm::code::MethodVisitor) and report how they
//! change the operand stack. Chaining manipulations chains their [sizes](emit::Size), which is
//! enough to compute `max_stack` for straight-line code without re-reading the bytecode.
//!
//! ```
//! use jvm_emit::emit::*;
//! use jvm_emit::jvm::code::CodeWriter;
//! use jvm_emit::jvm::class_file::Version;
//! use jvm_emit::jvm::{BinaryName, Error};
//!
//! # fn generate() -> Result<(), Error> {
//! let method_type = MethodType::parse("(JJ)V")?;
//! let invocation = HandleInvocation::new(method_type);
//!
//! let mut context = Context::new(BinaryName::OBJECT, Version::JAVA11);
//! let mut code = CodeWriter::new();
//! let size = invocation.apply(&mut code, &mut context)?;
//!
//! assert_eq!(size.size_impact(), -4);
//! assert_eq!(size.maximal_size(), 0);
//! assert_eq!(code.code_array(), &[0xb6, 0x00, 0x06]);
//! # Ok(())
//! # }
//! # generate().unwrap();
//! ```
//!
//! The [`asm`] module decides which declared methods of a type have their visitors wrapped
//! before any instructions get emitted into them.

pub mod asm;
pub mod emit;
pub mod jvm;
pub mod util;
