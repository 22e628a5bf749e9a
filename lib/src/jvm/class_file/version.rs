use super::Serialize;
use byteorder::WriteBytesExt;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::io::Result;

/// Version of the class file, which is used to verify that the JVM has the
/// necessary features to interpret the class
///
/// Note: the major version is declared first so that the derived ordering compares it first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Version {
    pub major_version: u16,
    pub minor_version: u16,
}

impl Version {
    /// JVM class file version corresponding to Java SE 6 (released December 2006)
    pub const JAVA6: Version = Version::major(50);

    /// JVM class file version corresponding to Java SE 7 (released July 2011)
    ///
    /// This is the first version where `CONSTANT_MethodType` and `CONSTANT_MethodHandle` are
    /// loadable.
    pub const JAVA7: Version = Version::major(51);

    /// JVM class file version corresponding to Java SE 8 (released March 2014)
    pub const JAVA8: Version = Version::major(52);

    /// JVM class file version corresponding to Java SE 11 (released September 2018)
    pub const JAVA11: Version = Version::major(55);

    /// JVM class file version corresponding to Java SE 17 (released September 2021)
    pub const JAVA17: Version = Version::major(61);

    /// Class file version with the given major version and no minor version
    pub const fn major(major_version: u16) -> Version {
        Version {
            major_version,
            minor_version: 0,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), FmtError> {
        write!(f, "{}.{}", self.major_version, self.minor_version)
    }
}

impl Serialize for Version {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        self.minor_version.serialize(writer)?;
        self.major_version.serialize(writer)?;
        Ok(())
    }
}
