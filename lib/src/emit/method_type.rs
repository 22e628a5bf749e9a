use crate::jvm::{Error, FieldType, MethodDescriptor, ParseDescriptor, RenderDescriptor, StackSize};
use std::fmt::{Display, Error as FmtError, Formatter};

/// Signature of a callable, independent of any named method
///
/// This is the compile-time counterpart of `java.lang.invoke.MethodType`. Two method types are
/// equal (and hash the same) exactly when their descriptors are the same.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MethodType {
    parameter_types: Vec<FieldType>,
    return_type: Option<FieldType>, // `None` is for `void`
}

impl MethodType {
    pub fn new(parameter_types: Vec<FieldType>, return_type: Option<FieldType>) -> MethodType {
        MethodType {
            parameter_types,
            return_type,
        }
    }

    /// Read a method type from a method descriptor such as `(Ljava/lang/Object;I)V`
    pub fn parse(descriptor: &str) -> Result<MethodType, Error> {
        MethodDescriptor::parse(descriptor)
            .map(MethodType::from)
            .map_err(|_| Error::BadDescriptor(descriptor.to_owned()))
    }

    pub fn parameter_types(&self) -> &[FieldType] {
        &self.parameter_types
    }

    pub fn return_type(&self) -> Option<&FieldType> {
        self.return_type.as_ref()
    }

    /// Method descriptor string, as it appears in class files
    pub fn descriptor(&self) -> String {
        let mut descriptor = String::from("(");
        for parameter in &self.parameter_types {
            parameter.render_to(&mut descriptor);
        }
        descriptor.push(')');
        match &self.return_type {
            None => descriptor.push('V'),
            Some(return_type) => return_type.render_to(&mut descriptor),
        }
        descriptor
    }

    /// Slots taken up by the return value
    pub fn return_stack_size(&self) -> StackSize {
        StackSize::of(self.return_type.as_ref())
    }

    /// Slots taken up by all of the parameters
    pub fn parameter_stack_size(&self) -> usize {
        StackSize::sum(&self.parameter_types)
    }
}

impl From<MethodDescriptor> for MethodType {
    fn from(descriptor: MethodDescriptor) -> MethodType {
        MethodType::new(descriptor.parameters, descriptor.return_type)
    }
}

impl From<MethodType> for MethodDescriptor {
    fn from(method_type: MethodType) -> MethodDescriptor {
        MethodDescriptor {
            parameters: method_type.parameter_types,
            return_type: method_type.return_type,
        }
    }
}

impl Display for MethodType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(&self.descriptor())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::BinaryName;

    #[test]
    fn descriptors() {
        let method_type = MethodType::new(
            vec![FieldType::object(BinaryName::OBJECT), FieldType::int()],
            None,
        );
        assert_eq!(method_type.descriptor(), "(Ljava/lang/Object;I)V");
        assert_eq!(method_type.to_string(), "(Ljava/lang/Object;I)V");

        let method_type = MethodType::new(vec![], Some(FieldType::array(FieldType::long())));
        assert_eq!(method_type.descriptor(), "()[J");
    }

    #[test]
    fn parse() {
        let method_type = MethodType::parse("(JD[I)Ljava/lang/String;").unwrap();
        assert_eq!(method_type.parameter_types().len(), 3);
        assert_eq!(
            method_type.return_type(),
            Some(&FieldType::object(BinaryName::STRING))
        );
        assert_eq!(method_type.parameter_stack_size(), 5);
        assert_eq!(method_type.return_stack_size(), StackSize::Single);

        assert!(matches!(
            MethodType::parse("(JD"),
            Err(Error::BadDescriptor(d)) if d == "(JD"
        ));
        assert!(MethodType::parse("()VV").is_err());
    }

    #[test]
    fn structural_equality() {
        let parsed = MethodType::parse("(I)J").unwrap();
        let built = MethodType::new(vec![FieldType::int()], Some(FieldType::long()));
        assert_eq!(parsed, built);
        assert_ne!(parsed, MethodType::parse("(I)D").unwrap());
        assert_ne!(parsed, MethodType::parse("(S)J").unwrap());
    }

    #[test]
    fn descriptor_conversions() {
        let descriptor = MethodDescriptor::parse("(Z)V").unwrap();
        let method_type = MethodType::from(descriptor.clone());
        assert_eq!(method_type.descriptor(), descriptor.render());
        assert_eq!(MethodDescriptor::from(method_type), descriptor);
    }
}
