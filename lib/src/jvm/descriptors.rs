use super::{BinaryName, Name};
use crate::util::Width;
use std::iter::Peekable;
use std::str::Chars;

/// Descriptors which can be written out in their class file syntax
pub trait RenderDescriptor {
    fn render(&self) -> String {
        let mut rendered = String::new();
        self.render_to(&mut rendered);
        rendered
    }

    fn render_to(&self, out: &mut String);
}

/// Descriptors which can be read back from their class file syntax
///
/// Errors are human readable descriptions of the first problem encountered.
pub trait ParseDescriptor: Sized {
    /// Parse a descriptor, rejecting anything left over after it
    fn parse(source: &str) -> Result<Self, String> {
        let mut cursor = source.chars().peekable();
        let parsed = Self::parse_from(&mut cursor)?;
        match cursor.next() {
            None => Ok(parsed),
            Some(c) => Err(format!("Trailing '{}' in descriptor '{}'", c, source)),
        }
    }

    fn parse_from(cursor: &mut Peekable<Chars>) -> Result<Self, String>;
}

/// Primitive types
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    const ALL: [(BaseType, char); 8] = [
        (BaseType::Byte, 'B'),
        (BaseType::Char, 'C'),
        (BaseType::Double, 'D'),
        (BaseType::Float, 'F'),
        (BaseType::Int, 'I'),
        (BaseType::Long, 'J'),
        (BaseType::Short, 'S'),
        (BaseType::Boolean, 'Z'),
    ];

    pub fn from_char(c: char) -> Option<BaseType> {
        Self::ALL
            .iter()
            .find(|(_, symbol)| *symbol == c)
            .map(|(base_type, _)| *base_type)
    }

    pub fn to_char(self) -> char {
        Self::ALL
            .iter()
            .find(|(base_type, _)| *base_type == self)
            .map_or('V', |(_, symbol)| *symbol)
    }
}

impl Width for BaseType {
    fn width(&self) -> usize {
        match self {
            BaseType::Double | BaseType::Long => 2,
            _ => 1,
        }
    }
}

/// Type of a field, local variable, parameter, or return value
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum FieldType {
    Base(BaseType),
    Object(BinaryName),
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn array(element_type: FieldType) -> FieldType {
        FieldType::Array(Box::new(element_type))
    }

    pub const fn object(class_name: BinaryName) -> FieldType {
        FieldType::Object(class_name)
    }

    pub const fn int() -> FieldType {
        FieldType::Base(BaseType::Int)
    }

    pub const fn long() -> FieldType {
        FieldType::Base(BaseType::Long)
    }

    pub const fn float() -> FieldType {
        FieldType::Base(BaseType::Float)
    }

    pub const fn double() -> FieldType {
        FieldType::Base(BaseType::Double)
    }

    pub const fn boolean() -> FieldType {
        FieldType::Base(BaseType::Boolean)
    }

    /// Whether values of this type are references (objects or arrays)
    pub fn is_reference(&self) -> bool {
        !matches!(self, FieldType::Base(_))
    }
}

impl Width for FieldType {
    fn width(&self) -> usize {
        match self {
            FieldType::Base(base_type) => base_type.width(),
            FieldType::Object(_) | FieldType::Array(_) => 1,
        }
    }
}

impl RenderDescriptor for FieldType {
    fn render_to(&self, out: &mut String) {
        match self {
            FieldType::Base(base_type) => out.push(base_type.to_char()),
            FieldType::Object(class_name) => {
                out.push('L');
                out.push_str(class_name.as_str());
                out.push(';');
            }
            FieldType::Array(element_type) => {
                out.push('[');
                element_type.render_to(out);
            }
        }
    }
}

impl ParseDescriptor for FieldType {
    fn parse_from(cursor: &mut Peekable<Chars>) -> Result<Self, String> {
        match cursor.next() {
            None => Err(String::from("Descriptor ended where a field type was expected")),
            Some('[') => FieldType::parse_from(cursor).map(FieldType::array),
            Some('L') => {
                let mut class_name = String::new();
                loop {
                    match cursor.next() {
                        Some(';') => break,
                        Some(c) => class_name.push(c),
                        None => return Err(format!("Unterminated class name 'L{}'", class_name)),
                    }
                }
                BinaryName::from_string(class_name).map(FieldType::Object)
            }
            Some(c) => BaseType::from_char(c)
                .map(FieldType::Base)
                .ok_or_else(|| format!("Unexpected '{}' where a field type was expected", c)),
        }
    }
}

/// Parameter and return types of a method
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub struct MethodDescriptor {
    pub parameters: Vec<FieldType>,

    /// `None` stands for `void`
    pub return_type: Option<FieldType>,
}

impl MethodDescriptor {
    /// Number of local variable slots taken by the parameters, counting `this` if there is one
    ///
    /// The JVM caps this at 255.
    pub fn parameter_length(&self, has_this_param: bool) -> usize {
        let parameters: usize = self.parameters.iter().map(Width::width).sum();
        parameters + usize::from(has_this_param)
    }
}

impl RenderDescriptor for MethodDescriptor {
    fn render_to(&self, out: &mut String) {
        out.push('(');
        for parameter in &self.parameters {
            parameter.render_to(out);
        }
        out.push(')');
        match &self.return_type {
            None => out.push('V'),
            Some(return_type) => return_type.render_to(out),
        }
    }
}

impl ParseDescriptor for MethodDescriptor {
    fn parse_from(cursor: &mut Peekable<Chars>) -> Result<Self, String> {
        if cursor.next_if_eq(&'(').is_none() {
            return Err(String::from("Method descriptor must start with '('"));
        }

        let mut parameters = vec![];
        while cursor.next_if_eq(&')').is_none() {
            if cursor.peek().is_none() {
                return Err(String::from("Method descriptor is missing ')'"));
            }
            parameters.push(FieldType::parse_from(cursor)?);
        }

        let return_type = match cursor.next_if_eq(&'V') {
            Some(_) => None,
            None => Some(FieldType::parse_from(cursor)?),
        };

        Ok(MethodDescriptor {
            parameters,
            return_type,
        })
    }
}
