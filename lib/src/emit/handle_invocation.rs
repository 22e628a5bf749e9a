use super::{Context, MethodType, Size, StackManipulation};
use crate::jvm::code::{InvokeType, MethodVisitor};
use crate::jvm::{BinaryName, Error, UnqualifiedName};
use std::fmt::{Display, Error as FmtError, Formatter};

/// Exact invocation of a `java.lang.invoke.MethodHandle`
///
/// The handle and then the arguments are expected to already be on the stack. This emits one
/// `invokevirtual` of `MethodHandle.invokeExact`, whose descriptor is the method type verbatim
/// (`invokeExact` is signature polymorphic, so the descriptor is not the one it is declared
/// with).
///
/// The method type is not checked in any way. A descriptor the JVM rejects only fails once the
/// class is verified, unless the visitor refuses it first (for instance when it is too long to
/// fit in the constant pool).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct HandleInvocation {
    method_type: MethodType,
}

impl HandleInvocation {
    pub fn new(method_type: MethodType) -> HandleInvocation {
        HandleInvocation { method_type }
    }

    pub fn method_type(&self) -> &MethodType {
        &self.method_type
    }

    /// Size of the invocation
    ///
    /// Parameters are popped and the return value is pushed by the one instruction, so the peak
    /// is the net effect when that is positive. The handle receiver is not counted.
    pub fn size(&self) -> Size {
        let returned = self.method_type.return_stack_size().size() as isize;
        let parameters = self.method_type.parameter_stack_size() as isize;
        let size_impact = returned - parameters;
        Size::new(size_impact, size_impact.max(0) as usize)
    }
}

impl StackManipulation for HandleInvocation {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        visitor.visit_method_insn(
            InvokeType::Virtual,
            &BinaryName::METHODHANDLE,
            &UnqualifiedName::INVOKEEXACT,
            &self.method_type.descriptor(),
            false,
        )?;
        Ok(self.size())
    }
}

impl Display for HandleInvocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "HandleInvocation{{methodType={}}}", self.method_type)
    }
}
