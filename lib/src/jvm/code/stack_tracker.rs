use crate::emit::Size;
use crate::jvm::code::{Instruction, MethodVisitor};
use crate::jvm::{Error, MethodDescriptor, ParseDescriptor};
use crate::util::Width;

/// Method visitor which tracks the operand stack depth of the instructions flowing through it
///
/// Depths are in slots and relative to the depth when the tracker was created, so they can go
/// negative when instructions consume values that were already on the stack. Every instruction
/// is forwarded to the inner visitor before being accounted for.
pub struct StackTracker<V> {
    inner: V,
    depth: isize,
    peak: isize,
}

impl<V: MethodVisitor> StackTracker<V> {
    pub fn new(inner: V) -> StackTracker<V> {
        StackTracker {
            inner,
            depth: 0,
            peak: 0,
        }
    }

    /// Current depth relative to the starting depth
    pub fn depth(&self) -> isize {
        self.depth
    }

    /// Highest depth reached so far relative to the starting depth (never below 0)
    pub fn max_depth(&self) -> usize {
        self.peak as usize
    }

    /// Net effect and peak of everything visited so far
    pub fn observed(&self) -> Size {
        Size::new(self.depth, self.max_depth())
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: MethodVisitor> MethodVisitor for StackTracker<V> {
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error> {
        let (popped, pushed) = stack_effect(&instruction)?;
        self.inner.visit_instruction(instruction)?;

        self.depth -= popped as isize;
        self.depth += pushed as isize;
        self.peak = self.peak.max(self.depth);
        Ok(())
    }

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> Result<(), Error> {
        self.inner.visit_maxs(max_stack, max_locals)
    }

    fn visit_end(&mut self) -> Result<(), Error> {
        self.inner.visit_end()
    }
}

/// Slots popped and then pushed by an instruction
///
/// The `dup` family is modelled as popping its inputs and pushing them back along with the
/// copies, which gives the right peak since the JVM never has less on the stack mid-instruction.
fn stack_effect(instruction: &Instruction) -> Result<(usize, usize), Error> {
    use Instruction::*;

    let effect = match instruction {
        Nop => (0, 0),
        AConstNull | IConstM1 | IConst0 | IConst1 | IConst2 | IConst3 | IConst4 | IConst5 => {
            (0, 1)
        }
        FConst0 | FConst1 | FConst2 | BiPush(_) | SiPush(_) => (0, 1),
        LConst0 | LConst1 | DConst0 | DConst1 => (0, 2),
        Ldc(constant) => (0, constant.width()),
        ILoad(_) | FLoad(_) | ALoad(_) => (0, 1),
        LLoad(_) | DLoad(_) => (0, 2),
        IStore(_) | FStore(_) | AStore(_) => (1, 0),
        LStore(_) | DStore(_) => (2, 0),
        Pop => (1, 0),
        Pop2 => (2, 0),
        Dup => (1, 2),
        DupX1 => (2, 3),
        DupX2 => (3, 4),
        Dup2 => (2, 4),
        Dup2X1 => (3, 5),
        Dup2X2 => (4, 6),
        Swap => (2, 2),
        IReturn | FReturn | AReturn => (1, 0),
        LReturn | DReturn => (2, 0),
        Return => (0, 0),
        Invoke(method) => {
            let descriptor = MethodDescriptor::parse(&method.descriptor)
                .map_err(|_| Error::BadDescriptor(method.descriptor.clone()))?;
            let popped = descriptor.parameter_length(method.invoke_type.has_receiver());
            let pushed = descriptor.return_type.as_ref().map_or(0, Width::width);
            (popped, pushed)
        }
    };
    Ok(effect)
}
