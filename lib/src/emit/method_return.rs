use super::{Context, Size, StackManipulation, VariableKind};
use crate::jvm::code::{Instruction, MethodVisitor};
use crate::jvm::{Error, FieldType, StackSize};

/// Return from the method, with the value on top of the stack if there is one
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MethodReturn {
    Void,
    Integer,
    Long,
    Float,
    Double,
    Reference,
}

impl MethodReturn {
    /// Return matching a (possibly `void`) return type
    pub fn of(return_type: Option<&FieldType>) -> MethodReturn {
        match return_type.map(VariableKind::of) {
            None => MethodReturn::Void,
            Some(VariableKind::Integer) => MethodReturn::Integer,
            Some(VariableKind::Long) => MethodReturn::Long,
            Some(VariableKind::Float) => MethodReturn::Float,
            Some(VariableKind::Double) => MethodReturn::Double,
            Some(VariableKind::Reference) => MethodReturn::Reference,
        }
    }

    fn stack_size(self) -> StackSize {
        match self {
            MethodReturn::Void => StackSize::Zero,
            MethodReturn::Long | MethodReturn::Double => StackSize::Double,
            _ => StackSize::Single,
        }
    }
}

impl StackManipulation for MethodReturn {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        let instruction = match self {
            MethodReturn::Void => Instruction::Return,
            MethodReturn::Integer => Instruction::IReturn,
            MethodReturn::Long => Instruction::LReturn,
            MethodReturn::Float => Instruction::FReturn,
            MethodReturn::Double => Instruction::DReturn,
            MethodReturn::Reference => Instruction::AReturn,
        };
        visitor.visit_instruction(instruction)?;
        Ok(self.stack_size().to_decreasing_size())
    }
}
