use jvm_emit::asm::*;
use jvm_emit::emit::{Context, HandleInvocation, MethodType, StackManipulation};
use jvm_emit::jvm::class_file::Version;
use jvm_emit::jvm::code::{Instruction, MethodVisitor};
use jvm_emit::jvm::{
    BinaryName, Error, MethodAccessFlags, MethodDescriptor, Name, ParseDescriptor, UnqualifiedName,
};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

const MODIFIERS: MethodAccessFlags = MethodAccessFlags::PUBLIC;

/// Method visitor which records instructions, then passes them on (if it has somewhere to)
struct RecordingVisitor {
    tag: &'static str,
    log: Log,
    inner: Option<Box<dyn MethodVisitor>>,
}

impl MethodVisitor for RecordingVisitor {
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error> {
        self.log
            .borrow_mut()
            .push(format!("{}: {:?}", self.tag, instruction));
        match &mut self.inner {
            Some(inner) => inner.visit_instruction(instruction),
            None => Ok(()),
        }
    }
}

/// Class visitor which hands out a recording visitor for every method (unless told not to)
struct RecordingClassVisitor {
    log: Log,
    calls: Log,
    declines: bool,
}

impl ClassVisitor for RecordingClassVisitor {
    fn visit_method(
        &mut self,
        access_flags: MethodAccessFlags,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        exceptions: &[String],
    ) -> Option<Box<dyn MethodVisitor>> {
        self.calls.borrow_mut().push(format!(
            "{:?} {}{} {:?} {:?}",
            access_flags, name, descriptor, signature, exceptions
        ));
        if self.declines {
            None
        } else {
            Some(Box::new(RecordingVisitor {
                tag: "original",
                log: self.log.clone(),
                inner: None,
            }))
        }
    }

    fn visit_end(&mut self) -> Result<(), Error> {
        self.calls.borrow_mut().push(String::from("end"));
        Ok(())
    }
}

/// Wrapper which puts a recording visitor in front, and records what it was asked to wrap
struct RecordingWrapper {
    tag: &'static str,
    log: Log,
    calls: Log,
}

impl MethodVisitorWrapper for RecordingWrapper {
    fn wrap(
        &self,
        instrumented_type: &TypeDescription,
        method: &MethodDescription,
        visitor: Box<dyn MethodVisitor>,
    ) -> Box<dyn MethodVisitor> {
        self.calls.borrow_mut().push(format!(
            "{} {}.{}{}",
            self.tag,
            instrumented_type.name,
            method.internal_name(),
            method.descriptor()
        ));
        Box::new(RecordingVisitor {
            tag: self.tag,
            log: self.log.clone(),
            inner: Some(visitor),
        })
    }
}

/// Matcher accepting only `foo`, recording every method it is asked about
fn foo_matcher(calls: &Log) -> impl ElementMatcher<MethodDescription> {
    let calls = calls.clone();
    move |method: &MethodDescription| {
        calls.borrow_mut().push(method.internal_name().to_owned());
        method.internal_name() == "foo"
    }
}

fn method(name: &str, descriptor: &str) -> MethodDescription {
    MethodDescription::new(
        UnqualifiedName::from_string(name.to_owned()).unwrap(),
        MethodDescriptor::parse(descriptor).unwrap(),
        MODIFIERS,
    )
}

fn instrumented_type() -> TypeDescription {
    TypeDescription::new(
        BinaryName::from_string(String::from("com/example/Instrumented")).unwrap(),
        vec![method("foo", "(I)V"), method("bar", "()J")],
    )
}

struct Fixture {
    instructions: Log,
    class_calls: Log,
    matcher_calls: Log,
    wrapper_calls: Log,
}

impl Fixture {
    fn new() -> Fixture {
        Fixture {
            instructions: Log::default(),
            class_calls: Log::default(),
            matcher_calls: Log::default(),
            wrapper_calls: Log::default(),
        }
    }

    fn class_visitor(&self, declines: bool) -> Box<dyn ClassVisitor> {
        Box::new(RecordingClassVisitor {
            log: self.instructions.clone(),
            calls: self.class_calls.clone(),
            declines,
        })
    }

    fn wrapper(&self, tag: &'static str) -> RecordingWrapper {
        RecordingWrapper {
            tag,
            log: self.instructions.clone(),
            calls: self.wrapper_calls.clone(),
        }
    }

    /// Standard setup: wrap `foo` with a single wrapper
    fn dispatching_visitor(&self) -> Box<dyn ClassVisitor> {
        ForDeclaredMethods::new()
            .method(foo_matcher(&self.matcher_calls), self.wrapper("wrapped"))
            .wrap(&instrumented_type(), self.class_visitor(false))
    }

    fn instructions(&self) -> Vec<String> {
        self.instructions.borrow().clone()
    }
}

fn visit(
    class_visitor: &mut dyn ClassVisitor,
    name: &str,
    descriptor: &str,
) -> Option<Box<dyn MethodVisitor>> {
    let exceptions = [String::from("java/io/IOException")];
    class_visitor.visit_method(MODIFIERS, name, descriptor, Some("sig"), &exceptions)
}

#[test]
fn matched() {
    let fixture = Fixture::new();
    let mut class_visitor = fixture.dispatching_visitor();

    let mut visitor = visit(&mut *class_visitor, "foo", "(I)V").unwrap();
    visitor.visit_instruction(Instruction::Nop).unwrap();

    assert_eq!(
        fixture.class_calls.borrow().as_slice(),
        &[r#"PUBLIC foo(I)V Some("sig") ["java/io/IOException"]"#]
    );
    assert_eq!(fixture.matcher_calls.borrow().as_slice(), &["foo"]);
    assert_eq!(
        fixture.wrapper_calls.borrow().as_slice(),
        &["wrapped com/example/Instrumented.foo(I)V"]
    );
    assert_eq!(fixture.instructions(), vec!["wrapped: Nop", "original: Nop"]);
}

#[test]
fn not_matched() {
    let fixture = Fixture::new();
    let mut class_visitor = fixture.dispatching_visitor();

    let mut visitor = visit(&mut *class_visitor, "bar", "()J").unwrap();
    visitor.visit_instruction(Instruction::Nop).unwrap();

    assert_eq!(fixture.matcher_calls.borrow().as_slice(), &["bar"]);
    assert!(fixture.wrapper_calls.borrow().is_empty());
    assert_eq!(fixture.instructions(), vec!["original: Nop"]);
}

#[test]
fn unknown() {
    let fixture = Fixture::new();
    let mut class_visitor = fixture.dispatching_visitor();

    // Not declared at all, then declared name with an undeclared descriptor
    for (name, descriptor) in [("foobar", "(I)V"), ("foo", "()V")] {
        let mut visitor = visit(&mut *class_visitor, name, descriptor).unwrap();
        visitor.visit_instruction(Instruction::Nop).unwrap();
    }

    assert_eq!(fixture.class_calls.borrow().len(), 2);
    assert!(fixture.matcher_calls.borrow().is_empty());
    assert!(fixture.wrapper_calls.borrow().is_empty());
    assert_eq!(fixture.instructions(), vec!["original: Nop", "original: Nop"]);
}

#[test]
fn delegate_declines() {
    let fixture = Fixture::new();
    let mut class_visitor = ForDeclaredMethods::new()
        .method(foo_matcher(&fixture.matcher_calls), fixture.wrapper("wrapped"))
        .wrap(&instrumented_type(), fixture.class_visitor(true));

    assert!(visit(&mut *class_visitor, "foo", "(I)V").is_none());
    assert_eq!(fixture.class_calls.borrow().len(), 1);
    assert!(fixture.matcher_calls.borrow().is_empty());
    assert!(fixture.wrapper_calls.borrow().is_empty());
}

#[test]
fn entries_wrap_in_order() {
    let fixture = Fixture::new();
    let mut class_visitor = ForDeclaredMethods::new()
        .method(named("foo"), fixture.wrapper("first"))
        .method(named("bar"), fixture.wrapper("skipped"))
        .method(any::<MethodDescription>(), fixture.wrapper("second"))
        .wrap(&instrumented_type(), fixture.class_visitor(false));

    let mut visitor = visit(&mut *class_visitor, "foo", "(I)V").unwrap();
    visitor.visit_instruction(Instruction::Pop).unwrap();

    assert_eq!(
        fixture.wrapper_calls.borrow().as_slice(),
        &[
            "first com/example/Instrumented.foo(I)V",
            "second com/example/Instrumented.foo(I)V"
        ]
    );
    assert_eq!(
        fixture.instructions(),
        vec!["second: Pop", "first: Pop", "original: Pop"]
    );
}

#[test]
fn visit_end_is_forwarded() {
    let fixture = Fixture::new();
    let mut class_visitor = fixture.dispatching_visitor();
    class_visitor.visit_end().unwrap();
    assert_eq!(fixture.class_calls.borrow().as_slice(), &["end"]);
}

#[test]
fn writer_and_reader_flags() {
    let wrapper = ForDeclaredMethods::new()
        .writer_flags(WriterFlags::COMPUTE_FRAMES)
        .reader_flags(ReaderFlags::SKIP_FRAMES | ReaderFlags::SKIP_DEBUG);

    assert_eq!(
        wrapper.merge_writer(WriterFlags::empty()),
        WriterFlags::COMPUTE_FRAMES
    );
    assert_eq!(
        wrapper.merge_writer(WriterFlags::COMPUTE_MAXS),
        WriterFlags::COMPUTE_MAXS | WriterFlags::COMPUTE_FRAMES
    );
    assert_eq!(
        wrapper.merge_reader(ReaderFlags::empty()),
        ReaderFlags::SKIP_FRAMES | ReaderFlags::SKIP_DEBUG
    );
}

#[test]
fn handle_invocation_into_wrapped_visitor() {
    let fixture = Fixture::new();
    let mut class_visitor = ForDeclaredMethods::new()
        .method(named("foo"), TraceInstructions)
        .method(has_descriptor("(I)V"), fixture.wrapper("wrapped"))
        .wrap(&instrumented_type(), fixture.class_visitor(false));

    let mut visitor = visit(&mut *class_visitor, "foo", "(I)V").unwrap();
    let mut context = Context::new(BinaryName::OBJECT, Version::JAVA11);
    let invocation = HandleInvocation::new(MethodType::parse("(I)V").unwrap());
    let size = invocation.apply(&mut visitor, &mut context).unwrap();

    assert_eq!(size.size_impact(), -1);
    let instructions = fixture.instructions();
    assert_eq!(instructions.len(), 2);
    assert!(instructions[0].starts_with("wrapped: Invoke("));
    assert!(instructions[0].contains("invokeExact"));
    assert!(instructions[1].starts_with("original: Invoke("));
}
