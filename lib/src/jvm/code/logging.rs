use crate::jvm::code::{Instruction, MethodVisitor};
use crate::jvm::Error;

/// Method visitor which logs every instruction at `trace` level before forwarding it
pub struct LoggingMethodVisitor<V> {
    label: String,
    inner: V,
    visited: usize,
}

impl<V: MethodVisitor> LoggingMethodVisitor<V> {
    /// The label prefixes every log line (typically the method name and descriptor)
    pub fn new(label: impl Into<String>, inner: V) -> LoggingMethodVisitor<V> {
        LoggingMethodVisitor {
            label: label.into(),
            inner,
            visited: 0,
        }
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: MethodVisitor> MethodVisitor for LoggingMethodVisitor<V> {
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error> {
        log::trace!("{} #{}: {:?}", self.label, self.visited, instruction);
        self.visited += 1;
        self.inner.visit_instruction(instruction)
    }

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> Result<(), Error> {
        log::trace!(
            "{}: max_stack = {}, max_locals = {}",
            self.label,
            max_stack,
            max_locals
        );
        self.inner.visit_maxs(max_stack, max_locals)
    }

    fn visit_end(&mut self) -> Result<(), Error> {
        log::trace!("{}: end after {} instructions", self.label, self.visited);
        self.inner.visit_end()
    }
}
