use super::class_file::{Constant, Version};

#[derive(Debug)]
pub enum Error {
    ConstantPoolOverflow {
        constant: Constant,
        offset: u16,
    },
    IoError(std::io::Error),

    /// Method code array would be longer than 65535 bytes
    MethodCodeOverflow(usize),
    MethodCodeMaxStackOverflow(usize),

    /// A UTF-8 constant encodes to more bytes than a `CONSTANT_Utf8_info` can hold
    Utf8TooLong(usize),

    /// A descriptor string could not be parsed where its structure was needed
    BadDescriptor(String),

    /// A class or member name is not valid in a class file
    InvalidName(String),

    /// An invalid stack manipulation was applied
    IllegalStackManipulation,

    /// A loadable constant is not supported by the targeted class file version
    UnsupportedConstant {
        constant: String,
        version: Version,
    },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IoError(err)
    }
}
