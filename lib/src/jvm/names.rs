use std::borrow::Cow;
use std::fmt::{Debug, Display, Error as FmtError, Formatter};

/// Validated name found in a class file
pub trait Name: Sized {
    /// Try to construct a name, returning a description of what is wrong with it otherwise
    fn from_string(name: String) -> Result<Self, String>;

    fn as_str(&self) -> &str;
}

/// Name of a method or field, such as `invokeExact`
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.2>
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct UnqualifiedName(Cow<'static, str>);

/// Internal name of a class or interface, such as `java/lang/invoke/MethodHandle`
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.1>
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct BinaryName(Cow<'static, str>);

fn unqualified_problem(segment: &str) -> Option<&'static str> {
    if segment.is_empty() {
        Some("is empty")
    } else if segment.contains(&['.', ';', '[', '/'][..]) {
        Some("contains an illegal character")
    } else {
        None
    }
}

impl Name for UnqualifiedName {
    fn from_string(name: String) -> Result<Self, String> {
        match unqualified_problem(&name) {
            Some(problem) => Err(format!("Unqualified name '{}' {}", name, problem)),
            None => Ok(UnqualifiedName(Cow::Owned(name))),
        }
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Name for BinaryName {
    fn from_string(name: String) -> Result<Self, String> {
        let problem = if name.is_empty() {
            Some("is empty")
        } else {
            name.split('/').find_map(unqualified_problem)
        };
        match problem {
            Some(problem) => Err(format!("Binary name '{}' {}", name, problem)),
            None => Ok(BinaryName(Cow::Owned(name))),
        }
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! name_formatting {
    ($name:ty) => {
        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
                f.write_str(&self.0)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
                f.write_str(&self.0)
            }
        }
    };
}

name_formatting!(UnqualifiedName);
name_formatting!(BinaryName);

impl UnqualifiedName {
    pub const INVOKEEXACT: Self = UnqualifiedName(Cow::Borrowed("invokeExact"));
}

impl BinaryName {
    pub const INTEGER: Self = BinaryName(Cow::Borrowed("java/lang/Integer"));
    pub const METHODHANDLE: Self = BinaryName(Cow::Borrowed("java/lang/invoke/MethodHandle"));
    pub const OBJECT: Self = BinaryName(Cow::Borrowed("java/lang/Object"));
    pub const STRING: Self = BinaryName(Cow::Borrowed("java/lang/String"));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unqualified_names() {
        assert!(UnqualifiedName::from_string(String::from("invokeExact")).is_ok());
        assert!(UnqualifiedName::from_string(String::from("")).is_err());
        assert!(UnqualifiedName::from_string(String::from("java/lang")).is_err());
        assert!(UnqualifiedName::from_string(String::from("a;b")).is_err());
    }

    #[test]
    fn binary_names() {
        let name = BinaryName::from_string(String::from("com/example/Point")).unwrap();
        assert_eq!(name.as_str(), "com/example/Point");
        assert_eq!(name.to_string(), "com/example/Point");
        assert_eq!(
            BinaryName::from_string(String::from("com//Point")),
            Err(String::from("Binary name 'com//Point' is empty"))
        );
        assert!(BinaryName::from_string(String::from("")).is_err());
        assert_eq!(BinaryName::METHODHANDLE.as_str(), "java/lang/invoke/MethodHandle");
    }
}
