use super::{Context, Size, StackManipulation};
use crate::jvm::code::{Instruction, MethodVisitor};
use crate::jvm::{Error, StackSize};

/// Duplicate the value on top of the stack
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Duplication {
    Zero,
    Single,
    Double,

    /// Duplicate the top value and insert the copy below the value under it
    ///
    /// The first size is that of the duplicated value, the second that of the value it is
    /// moved under.
    FlipOver(StackSize, StackSize),
}

impl Duplication {
    /// Duplication of a value of the given size
    pub fn of(size: StackSize) -> Duplication {
        match size {
            StackSize::Zero => Duplication::Zero,
            StackSize::Single => Duplication::Single,
            StackSize::Double => Duplication::Double,
        }
    }

    /// Duplication which flips the copy over a value of the given size
    ///
    /// Returns `None` if either value takes no slots, since there would be nothing to flip.
    pub fn flip_over(self, under: StackSize) -> Option<Duplication> {
        let value = match self {
            Duplication::Single => StackSize::Single,
            Duplication::Double => StackSize::Double,
            Duplication::FlipOver(value, _) => value,
            Duplication::Zero => return None,
        };
        if under == StackSize::Zero {
            return None;
        }
        Some(Duplication::FlipOver(value, under))
    }

    /// Size of the duplicated value
    pub fn value_size(self) -> StackSize {
        match self {
            Duplication::Zero => StackSize::Zero,
            Duplication::Single => StackSize::Single,
            Duplication::Double => StackSize::Double,
            Duplication::FlipOver(value, _) => value,
        }
    }

    fn instruction(self) -> Option<Instruction> {
        use StackSize::{Double, Single};
        match self {
            Duplication::Zero => None,
            Duplication::Single => Some(Instruction::Dup),
            Duplication::Double => Some(Instruction::Dup2),
            Duplication::FlipOver(Single, Single) => Some(Instruction::DupX1),
            Duplication::FlipOver(Single, Double) => Some(Instruction::DupX2),
            Duplication::FlipOver(Double, Single) => Some(Instruction::Dup2X1),
            Duplication::FlipOver(Double, Double) => Some(Instruction::Dup2X2),
            Duplication::FlipOver(_, _) => None,
        }
    }
}

impl StackManipulation for Duplication {
    /// Flip-overs involving an empty value can't be expressed
    fn is_valid(&self) -> bool {
        match self {
            Duplication::FlipOver(value, under) => {
                *value != StackSize::Zero && *under != StackSize::Zero
            }
            _ => true,
        }
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        if !self.is_valid() {
            return Err(Error::IllegalStackManipulation);
        }
        if let Some(instruction) = self.instruction() {
            visitor.visit_instruction(instruction)?;
        }
        Ok(self.value_size().to_increasing_size())
    }
}
