use crate::jvm::{
    BinaryName, MethodAccessFlags, MethodDescriptor, Name, RenderDescriptor, UnqualifiedName,
};

/// Method declared by a type
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MethodDescription {
    pub name: UnqualifiedName,
    pub descriptor: MethodDescriptor,
    pub access_flags: MethodAccessFlags,
}

impl MethodDescription {
    pub fn new(
        name: UnqualifiedName,
        descriptor: MethodDescriptor,
        access_flags: MethodAccessFlags,
    ) -> MethodDescription {
        MethodDescription {
            name,
            descriptor,
            access_flags,
        }
    }

    /// Name as it appears in the class file
    pub fn internal_name(&self) -> &str {
        self.name.as_str()
    }

    /// Rendered method descriptor
    pub fn descriptor(&self) -> String {
        self.descriptor.render()
    }

    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }
}

/// Type whose class file is being visited
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeDescription {
    pub name: BinaryName,
    pub declared_methods: Vec<MethodDescription>,
}

impl TypeDescription {
    pub fn new(name: BinaryName, declared_methods: Vec<MethodDescription>) -> TypeDescription {
        TypeDescription {
            name,
            declared_methods,
        }
    }

    pub fn declared_methods(&self) -> &[MethodDescription] {
        &self.declared_methods
    }
}
