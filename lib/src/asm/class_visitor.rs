use super::{MethodDescription, TypeDescription};
use crate::jvm::code::{LoggingMethodVisitor, MethodVisitor};
use crate::jvm::{Error, MethodAccessFlags};
use bitflags::bitflags;

/// Sink for the members of one class file
pub trait ClassVisitor {
    /// Start visiting a method
    ///
    /// Returns the visitor which will receive the method body, or `None` if this class visitor
    /// is not interested in it.
    fn visit_method(
        &mut self,
        access_flags: MethodAccessFlags,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        exceptions: &[String],
    ) -> Option<Box<dyn MethodVisitor>>;

    /// No more members will be visited
    fn visit_end(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<C: ClassVisitor + ?Sized> ClassVisitor for Box<C> {
    fn visit_method(
        &mut self,
        access_flags: MethodAccessFlags,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        exceptions: &[String],
    ) -> Option<Box<dyn MethodVisitor>> {
        (**self).visit_method(access_flags, name, descriptor, signature, exceptions)
    }

    fn visit_end(&mut self) -> Result<(), Error> {
        (**self).visit_end()
    }
}

/// Substitutes the visitor a declared method's body gets written into
pub trait MethodVisitorWrapper {
    fn wrap(
        &self,
        instrumented_type: &TypeDescription,
        method: &MethodDescription,
        visitor: Box<dyn MethodVisitor>,
    ) -> Box<dyn MethodVisitor>;
}

impl<F> MethodVisitorWrapper for F
where
    F: Fn(&TypeDescription, &MethodDescription, Box<dyn MethodVisitor>) -> Box<dyn MethodVisitor>,
{
    fn wrap(
        &self,
        instrumented_type: &TypeDescription,
        method: &MethodDescription,
        visitor: Box<dyn MethodVisitor>,
    ) -> Box<dyn MethodVisitor> {
        self(instrumented_type, method, visitor)
    }
}

/// Wrapper which traces every instruction written into the method
#[derive(Copy, Clone, Debug, Default)]
pub struct TraceInstructions;

impl MethodVisitorWrapper for TraceInstructions {
    fn wrap(
        &self,
        instrumented_type: &TypeDescription,
        method: &MethodDescription,
        visitor: Box<dyn MethodVisitor>,
    ) -> Box<dyn MethodVisitor> {
        let label = format!(
            "{}.{}{}",
            instrumented_type.name,
            method.internal_name(),
            method.descriptor()
        );
        Box::new(LoggingMethodVisitor::new(label, visitor))
    }
}

bitflags! {
    /// Options for writing class files
    #[derive(Default)]
    pub struct WriterFlags: u32 {
        /// Compute `max_stack` and `max_locals` after the fact
        const COMPUTE_MAXS = 0x1;

        /// Compute stack map frames after the fact (implies `COMPUTE_MAXS`)
        const COMPUTE_FRAMES = 0x2;
    }
}

bitflags! {
    /// Options for reading class files
    #[derive(Default)]
    pub struct ReaderFlags: u32 {
        const SKIP_CODE = 0x1;
        const SKIP_DEBUG = 0x2;
        const SKIP_FRAMES = 0x4;
        const EXPAND_FRAMES = 0x8;
    }
}

/// Hooks into how the class file of a type is read, visited, and written
pub trait AsmVisitorWrapper {
    /// Add whatever writer flags this wrapper needs
    fn merge_writer(&self, flags: WriterFlags) -> WriterFlags;

    /// Add whatever reader flags this wrapper needs
    fn merge_reader(&self, flags: ReaderFlags) -> ReaderFlags;

    /// Wrap the visitor the class file of `instrumented_type` is written into
    fn wrap(
        &self,
        instrumented_type: &TypeDescription,
        class_visitor: Box<dyn ClassVisitor>,
    ) -> Box<dyn ClassVisitor>;
}
