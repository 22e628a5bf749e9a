use super::{Compound, Context, Illegal, MethodType, Size, StackManipulation};
use crate::jvm::code::{Instruction, MethodVisitor};
use crate::jvm::{BaseType, Error, FieldType, StackSize};
use crate::util::Width;

/// Which family of load/store instructions a local variable needs
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum VariableKind {
    Integer,
    Long,
    Float,
    Double,
    Reference,
}

impl VariableKind {
    /// `boolean`, `byte`, `char`, and `short` locals are all stored as `int`s
    pub fn of(field_type: &FieldType) -> VariableKind {
        match field_type {
            FieldType::Base(BaseType::Long) => VariableKind::Long,
            FieldType::Base(BaseType::Float) => VariableKind::Float,
            FieldType::Base(BaseType::Double) => VariableKind::Double,
            FieldType::Base(_) => VariableKind::Integer,
            FieldType::Object(_) | FieldType::Array(_) => VariableKind::Reference,
        }
    }

    pub fn stack_size(self) -> StackSize {
        match self {
            VariableKind::Long | VariableKind::Double => StackSize::Double,
            _ => StackSize::Single,
        }
    }
}

impl Width for VariableKind {
    fn width(&self) -> usize {
        self.stack_size().size()
    }
}

/// Load a local variable onto the stack, or store the top of the stack into one
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MethodVariableAccess {
    kind: VariableKind,
    index: u16,
    store: bool,
}

impl MethodVariableAccess {
    pub fn load(kind: VariableKind, index: u16) -> MethodVariableAccess {
        MethodVariableAccess {
            kind,
            index,
            store: false,
        }
    }

    pub fn store(kind: VariableKind, index: u16) -> MethodVariableAccess {
        MethodVariableAccess {
            kind,
            index,
            store: true,
        }
    }

    /// Load every parameter of the method type, starting from the given local
    ///
    /// For an instance method, the first parameter is in local 1 (local 0 is `this`). If the
    /// parameters run past the last addressable local, the result is invalid.
    pub fn all_arguments(method_type: &MethodType, first_index: u16) -> Compound {
        let mut index = first_index as usize;
        let mut loads: Vec<Box<dyn StackManipulation>> = vec![];
        for parameter in method_type.parameter_types() {
            let kind = VariableKind::of(parameter);
            match u16::try_from(index) {
                Ok(local) => loads.push(Box::new(MethodVariableAccess::load(kind, local))),
                Err(_) => {
                    loads.push(Box::new(Illegal));
                    break;
                }
            }
            index += kind.width();
        }
        Compound::new(loads)
    }

    fn instruction(&self) -> Instruction {
        let index = self.index;
        match (self.kind, self.store) {
            (VariableKind::Integer, false) => Instruction::ILoad(index),
            (VariableKind::Long, false) => Instruction::LLoad(index),
            (VariableKind::Float, false) => Instruction::FLoad(index),
            (VariableKind::Double, false) => Instruction::DLoad(index),
            (VariableKind::Reference, false) => Instruction::ALoad(index),
            (VariableKind::Integer, true) => Instruction::IStore(index),
            (VariableKind::Long, true) => Instruction::LStore(index),
            (VariableKind::Float, true) => Instruction::FStore(index),
            (VariableKind::Double, true) => Instruction::DStore(index),
            (VariableKind::Reference, true) => Instruction::AStore(index),
        }
    }
}

impl StackManipulation for MethodVariableAccess {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        visitor.visit_instruction(self.instruction())?;
        let size = self.kind.stack_size();
        if self.store {
            Ok(size.to_decreasing_size())
        } else {
            Ok(size.to_increasing_size())
        }
    }
}
