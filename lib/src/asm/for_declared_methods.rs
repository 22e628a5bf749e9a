use super::{
    AsmVisitorWrapper, ClassVisitor, ElementMatcher, MethodDescription, MethodVisitorWrapper,
    ReaderFlags, TypeDescription, WriterFlags,
};
use crate::jvm::code::MethodVisitor;
use crate::jvm::{Error, MethodAccessFlags};
use std::collections::HashMap;
use std::fmt::{Debug, Error as FmtError, Formatter};
use std::rc::Rc;

/// Wraps the visitors of the declared methods that match some predicate
///
/// This is an immutable builder: every method returns a new value and leaves the receiver
/// untouched, so one configuration can be reused as the starting point of several others.
#[derive(Clone, Default)]
pub struct ForDeclaredMethods {
    entries: Vec<Entry>,
    writer_flags: WriterFlags,
    reader_flags: ReaderFlags,
}

#[derive(Clone)]
struct Entry {
    matcher: Rc<dyn ElementMatcher<MethodDescription>>,
    wrapper: Rc<dyn MethodVisitorWrapper>,
}

impl ForDeclaredMethods {
    pub fn new() -> ForDeclaredMethods {
        ForDeclaredMethods::default()
    }

    /// Wrap the visitors of matched methods with `wrapper`
    ///
    /// When several entries match the same method, wrappers are applied in the order the entries
    /// were added (so the last one ends up outermost).
    pub fn method(
        &self,
        matcher: impl ElementMatcher<MethodDescription> + 'static,
        wrapper: impl MethodVisitorWrapper + 'static,
    ) -> ForDeclaredMethods {
        let mut entries = self.entries.clone();
        entries.push(Entry {
            matcher: Rc::new(matcher),
            wrapper: Rc::new(wrapper),
        });
        ForDeclaredMethods {
            entries,
            ..self.clone()
        }
    }

    /// Require additional flags when writing the class file
    pub fn writer_flags(&self, flags: WriterFlags) -> ForDeclaredMethods {
        ForDeclaredMethods {
            writer_flags: self.writer_flags | flags,
            ..self.clone()
        }
    }

    /// Require additional flags when reading the class file
    pub fn reader_flags(&self, flags: ReaderFlags) -> ForDeclaredMethods {
        ForDeclaredMethods {
            reader_flags: self.reader_flags | flags,
            ..self.clone()
        }
    }
}

impl Debug for ForDeclaredMethods {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("ForDeclaredMethods")
            .field("entries", &self.entries.len())
            .field("writer_flags", &self.writer_flags)
            .field("reader_flags", &self.reader_flags)
            .finish()
    }
}

impl AsmVisitorWrapper for ForDeclaredMethods {
    fn merge_writer(&self, flags: WriterFlags) -> WriterFlags {
        flags | self.writer_flags
    }

    fn merge_reader(&self, flags: ReaderFlags) -> ReaderFlags {
        flags | self.reader_flags
    }

    fn wrap(
        &self,
        instrumented_type: &TypeDescription,
        class_visitor: Box<dyn ClassVisitor>,
    ) -> Box<dyn ClassVisitor> {
        let declared_methods = instrumented_type
            .declared_methods()
            .iter()
            .map(|method| {
                let key = format!("{}{}", method.internal_name(), method.descriptor());
                (key, method.clone())
            })
            .collect();
        Box::new(DispatchingVisitor {
            delegate: class_visitor,
            instrumented_type: instrumented_type.clone(),
            entries: self.entries.clone(),
            declared_methods,
        })
    }
}

/// Class visitor which wraps the method visitors returned by its delegate
struct DispatchingVisitor {
    delegate: Box<dyn ClassVisitor>,
    instrumented_type: TypeDescription,
    entries: Vec<Entry>,

    /// Declared methods, keyed by name followed by descriptor
    declared_methods: HashMap<String, MethodDescription>,
}

impl ClassVisitor for DispatchingVisitor {
    fn visit_method(
        &mut self,
        access_flags: MethodAccessFlags,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        exceptions: &[String],
    ) -> Option<Box<dyn MethodVisitor>> {
        let mut visitor =
            self.delegate
                .visit_method(access_flags, name, descriptor, signature, exceptions)?;

        let key = format!("{}{}", name, descriptor);
        if let Some(method) = self.declared_methods.get(&key) {
            for entry in &self.entries {
                if entry.matcher.matches(method) {
                    log::debug!(
                        "Wrapping visitor of {}.{}{}",
                        self.instrumented_type.name,
                        name,
                        descriptor
                    );
                    visitor = entry
                        .wrapper
                        .wrap(&self.instrumented_type, method, visitor);
                }
            }
        }
        Some(visitor)
    }

    fn visit_end(&mut self) -> Result<(), Error> {
        self.delegate.visit_end()
    }
}
