use crate::jvm::code::{Instruction, InvokeType, MethodInstruction};
use crate::jvm::{BinaryName, Error, UnqualifiedName};

/// Sink for the instructions of one method body
///
/// Instructions are visited in program order. Visitors can be stacked: a visitor that adds some
/// behaviour (logging, stack tracking, ...) typically wraps another visitor and forwards every
/// instruction to it.
pub trait MethodVisitor {
    /// Append one instruction
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error>;

    /// Append one method call instruction
    fn visit_method_insn(
        &mut self,
        invoke_type: InvokeType,
        owner: &BinaryName,
        name: &UnqualifiedName,
        descriptor: &str,
        is_interface: bool,
    ) -> Result<(), Error> {
        self.visit_instruction(Instruction::Invoke(MethodInstruction {
            invoke_type,
            owner: owner.clone(),
            name: name.clone(),
            descriptor: descriptor.to_owned(),
            is_interface,
        }))
    }

    /// Record the maximum operand stack depth and number of local slots of the method
    fn visit_maxs(&mut self, _max_stack: u16, _max_locals: u16) -> Result<(), Error> {
        Ok(())
    }

    /// No more instructions will be visited
    fn visit_end(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<V: MethodVisitor + ?Sized> MethodVisitor for &mut V {
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error> {
        (**self).visit_instruction(instruction)
    }

    fn visit_method_insn(
        &mut self,
        invoke_type: InvokeType,
        owner: &BinaryName,
        name: &UnqualifiedName,
        descriptor: &str,
        is_interface: bool,
    ) -> Result<(), Error> {
        (**self).visit_method_insn(invoke_type, owner, name, descriptor, is_interface)
    }

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> Result<(), Error> {
        (**self).visit_maxs(max_stack, max_locals)
    }

    fn visit_end(&mut self) -> Result<(), Error> {
        (**self).visit_end()
    }
}

impl<V: MethodVisitor + ?Sized> MethodVisitor for Box<V> {
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error> {
        (**self).visit_instruction(instruction)
    }

    fn visit_method_insn(
        &mut self,
        invoke_type: InvokeType,
        owner: &BinaryName,
        name: &UnqualifiedName,
        descriptor: &str,
        is_interface: bool,
    ) -> Result<(), Error> {
        (**self).visit_method_insn(invoke_type, owner, name, descriptor, is_interface)
    }

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> Result<(), Error> {
        (**self).visit_maxs(max_stack, max_locals)
    }

    fn visit_end(&mut self) -> Result<(), Error> {
        (**self).visit_end()
    }
}

/// Collect the instructions as-is
impl MethodVisitor for Vec<Instruction> {
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error> {
        self.push(instruction);
        Ok(())
    }
}
