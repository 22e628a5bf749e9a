//! JVM class file vocabulary
//!
//! ### Simple example
//!
//! Encoding the body of a static method `(Ljava/lang/invoke/MethodHandle;J)J` which calls the
//! handle with its second argument and returns the result:
//!
//! ```
//! use jvm_emit::jvm::code::{CodeWriter, InvokeType, Instruction, MethodVisitor};
//! use jvm_emit::jvm::*;
//!
//! # fn generate_code() -> Result<(), Error> {
//! let mut code = CodeWriter::new();
//! code.visit_instruction(Instruction::ALoad(0))?;
//! code.visit_instruction(Instruction::LLoad(1))?;
//! code.visit_method_insn(
//!     InvokeType::Virtual,
//!     &BinaryName::METHODHANDLE,
//!     &UnqualifiedName::INVOKEEXACT,
//!     "(J)J",
//!     false,
//! )?;
//! code.visit_instruction(Instruction::LReturn)?;
//! code.visit_maxs(3, 3)?;
//!
//! let (code, constants) = code.finish();
//! assert_eq!(code.code_array, vec![0x2a, 0x1f, 0xb6, 0x00, 0x06, 0xad]);
//! assert_eq!(constants.len(), 6);
//! # Ok(())
//! # }
//! # generate_code().unwrap();
//! ```

mod access_flags;
pub mod class_file;
pub mod code;
mod descriptors;
mod errors;
mod names;
mod stack_size;

pub use access_flags::*;
pub use descriptors::*;
pub use errors::*;
pub use names::*;
pub use stack_size::*;
