use super::{Context, Size, StackManipulation};
use crate::jvm::code::{Instruction, MethodVisitor};
use crate::jvm::{Error, FieldType, StackSize};

/// Drop the value on top of the stack
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Removal {
    Zero,
    Single,
    Double,
}

impl Removal {
    pub fn of(size: StackSize) -> Removal {
        match size {
            StackSize::Zero => Removal::Zero,
            StackSize::Single => Removal::Single,
            StackSize::Double => Removal::Double,
        }
    }

    /// Removal of a value of the given (possibly `void`) type
    pub fn of_type(field_type: Option<&FieldType>) -> Removal {
        Removal::of(StackSize::of(field_type))
    }

    fn stack_size(self) -> StackSize {
        match self {
            Removal::Zero => StackSize::Zero,
            Removal::Single => StackSize::Single,
            Removal::Double => StackSize::Double,
        }
    }
}

impl StackManipulation for Removal {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        match self {
            Removal::Zero => (),
            Removal::Single => visitor.visit_instruction(Instruction::Pop)?,
            Removal::Double => visitor.visit_instruction(Instruction::Pop2)?,
        }
        Ok(self.stack_size().to_decreasing_size())
    }
}
