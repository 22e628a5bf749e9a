use jvm_emit::emit::*;
use jvm_emit::jvm::class_file::Version;
use jvm_emit::jvm::code::{CodeWriter, LoggingMethodVisitor, MethodVisitor, StackTracker};
use jvm_emit::jvm::{BinaryName, Error, FieldType, Name};

use clap::{value_parser, Arg, ArgAction, Command};

fn main() -> Result<(), Error> {
    env_logger::init();

    let matches = Command::new("MethodHandle invocation dumper")
        .version(clap::crate_version!())
        .about("Show the bytecode and stack sizes of `MethodHandle.invokeExact` adapters")
        .arg(
            Arg::new("descriptor")
                .long("descriptor")
                .value_name("DESCRIPTOR")
                .required(true)
                .action(ArgAction::Append)
                .help("Method type of the handle (eg. `(JJ)V`), can be repeated"),
        )
        .arg(
            Arg::new("class-version")
                .long("class-version")
                .value_name("MAJOR")
                .value_parser(value_parser!(u16))
                .default_value("55")
                .help("Major class file version to target"),
        )
        .arg(
            Arg::new("owner")
                .long("owner")
                .value_name("CLASS_NAME")
                .default_value("com/example/Handles")
                .help("Class the adapter methods belong to (eg. `foo/bar/Baz`)"),
        )
        .get_matches();

    let version = matches
        .get_one::<u16>("class-version")
        .map_or(Version::JAVA11, |major| Version::major(*major));
    let owner = matches
        .get_one::<String>("owner")
        .map_or(Ok(BinaryName::OBJECT), |owner| {
            BinaryName::from_string(owner.clone()).map_err(Error::InvalidName)
        })?;

    let mut context = Context::new(owner, version);
    log::info!(
        "Generating adapters in '{}' for class file version {}",
        context.instrumented_type(),
        context.version()
    );

    for descriptor in matches.get_many::<String>("descriptor").into_iter().flatten() {
        dump_adapter(descriptor, &mut context)?;
    }

    Ok(())
}

/// Build a static method taking a handle followed by its arguments, which invokes the handle and
/// returns what it returned
fn dump_adapter(descriptor: &str, context: &mut Context) -> Result<(), Error> {
    let method_type = MethodType::parse(descriptor)?;
    let invocation = HandleInvocation::new(method_type.clone());

    let body = Compound::default()
        .then(MethodVariableAccess::load(VariableKind::Reference, 0))
        .then(MethodVariableAccess::all_arguments(&method_type, 1))
        .then(invocation.clone())
        .then(MethodReturn::of(method_type.return_type()));

    let label = format!(
        "{}.invoke{}",
        context.instrumented_type(),
        adapter_descriptor(&method_type)
    );
    let mut code = StackTracker::new(LoggingMethodVisitor::new(label, CodeWriter::new()));
    let declared = body.apply(&mut code, context)?;
    let observed = code.observed();

    let max_stack = u16::try_from(declared.maximal_size())
        .map_err(|_| Error::MethodCodeMaxStackOverflow(declared.maximal_size()))?;
    let max_locals = u16::try_from(1 + method_type.parameter_stack_size())
        .map_err(|_| Error::BadDescriptor(descriptor.to_owned()))?;
    code.visit_maxs(max_stack, max_locals)?;
    code.visit_end()?;

    let (code, constants) = code.into_inner().into_inner().finish();
    let hex: Vec<String> = code
        .code_array
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect();

    println!("{}", descriptor);
    println!("  invocation: {} ({})", invocation, invocation.size());
    println!("  body: declared {}, observed {}", declared, observed);
    println!("  max_stack {}, max_locals {}", code.max_stack, code.max_locals);
    println!("  code: {}", hex.join(" "));
    println!("  constant_pool_count: {}", constants.constant_pool_count());
    Ok(())
}

/// Descriptor of the adapter: the handle comes first, then the handle's own parameters
fn adapter_descriptor(method_type: &MethodType) -> MethodType {
    let mut parameters = vec![FieldType::object(BinaryName::METHODHANDLE)];
    parameters.extend(method_type.parameter_types().iter().cloned());
    MethodType::new(parameters, method_type.return_type().cloned())
}
