use crate::jvm::class_file::Version;
use crate::jvm::BinaryName;

/// State shared by all the stack manipulations applied while generating one type
///
/// The context is threaded explicitly through every [`apply`](super::StackManipulation::apply)
/// call. Manipulations consult it when what they emit depends on the type being generated (for
/// instance, constants which only some class file versions can load).
#[derive(Clone, Debug)]
pub struct Context {
    instrumented_type: BinaryName,
    version: Version,
}

impl Context {
    pub fn new(instrumented_type: BinaryName, version: Version) -> Context {
        Context {
            instrumented_type,
            version,
        }
    }

    /// Type whose methods are being generated
    pub fn instrumented_type(&self) -> &BinaryName {
        &self.instrumented_type
    }

    /// Class file version being targeted
    pub fn version(&self) -> Version {
        self.version
    }
}
