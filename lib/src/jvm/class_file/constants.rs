use crate::jvm::class_file::Serialize;
use crate::jvm::{BinaryName, Error, Name};
use crate::util::Width;
use byteorder::WriteBytesExt;
use std::collections::HashMap;

/// Index into the constants pool (indexing starts at 1)
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct ConstantIndex(pub u16);

impl Serialize for ConstantIndex {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

/// Entries of the constants pool which method bodies can refer to
///
/// Floating point values are held as their bits so that every constant can be used as a key:
/// `0.0` and `-0.0` (or two different NaNs) are different constants.
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.4>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// Text, stored in modified UTF-8 once serialized
    Utf8(String),
    Integer(i32),
    Float { bits: u32 },
    Long(i64),
    Double { bits: u64 },
    Class(ConstantIndex),
    String(ConstantIndex),

    /// `CONSTANT_Methodref_info`, or `CONSTANT_InterfaceMethodref_info` if `is_interface`
    MethodRef {
        class: ConstantIndex,
        name_and_type: ConstantIndex,
        is_interface: bool,
    },
    NameAndType {
        name: ConstantIndex,
        descriptor: ConstantIndex,
    },
    MethodType { descriptor: ConstantIndex },
}

impl Constant {
    fn tag(&self) -> u8 {
        match self {
            Constant::Utf8(_) => 1,
            Constant::Integer(_) => 3,
            Constant::Float { .. } => 4,
            Constant::Long(_) => 5,
            Constant::Double { .. } => 6,
            Constant::Class(_) => 7,
            Constant::String(_) => 8,
            Constant::MethodRef { is_interface, .. } => {
                if *is_interface {
                    11
                } else {
                    10
                }
            }
            Constant::NameAndType { .. } => 12,
            Constant::MethodType { .. } => 16,
        }
    }
}

/// `long` and `double` entries take up two indices, the second of which is unusable
impl Width for Constant {
    fn width(&self) -> usize {
        match self {
            Constant::Long(_) | Constant::Double { .. } => 2,
            _ => 1,
        }
    }
}

impl Serialize for Constant {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.tag().serialize(writer)?;
        match self {
            Constant::Utf8(text) => {
                let encoded = encode_modified_utf8(text);
                (encoded.len() as u16).serialize(writer)?;
                writer.write_all(&encoded)
            }
            Constant::Integer(value) => value.serialize(writer),
            Constant::Float { bits } => bits.serialize(writer),
            Constant::Long(value) => value.serialize(writer),
            Constant::Double { bits } => {
                ((bits >> 32) as u32).serialize(writer)?;
                (*bits as u32).serialize(writer)
            }
            Constant::Class(name) => name.serialize(writer),
            Constant::String(text) => text.serialize(writer),
            Constant::MethodRef {
                class,
                name_and_type,
                ..
            } => {
                class.serialize(writer)?;
                name_and_type.serialize(writer)
            }
            Constant::NameAndType { name, descriptor } => {
                name.serialize(writer)?;
                descriptor.serialize(writer)
            }
            Constant::MethodType { descriptor } => descriptor.serialize(writer),
        }
    }
}

/// Append-only, deduplicating constants pool
///
/// Asking for a constant which is already in the pool returns its existing index.
#[derive(Default, Debug)]
pub struct ConstantsPool {
    constants: Vec<Constant>,
    interned: HashMap<Constant, ConstantIndex>,
}

impl ConstantsPool {
    pub fn new() -> ConstantsPool {
        ConstantsPool::default()
    }

    /// Number of entries (two-index entries count once)
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Value of `constant_pool_count`: one more than the last usable index
    pub fn constant_pool_count(&self) -> u16 {
        let used: usize = self.constants.iter().map(Width::width).sum();
        (used + 1) as u16
    }

    /// Entries along with the index at which each one lives
    pub fn iter(&self) -> impl Iterator<Item = (ConstantIndex, &Constant)> + '_ {
        self.constants.iter().scan(1u16, |next, constant| {
            let index = ConstantIndex(*next);
            *next = next.wrapping_add(constant.width() as u16);
            Some((index, constant))
        })
    }

    fn intern(&mut self, constant: Constant) -> Result<ConstantIndex, Error> {
        if let Some(index) = self.interned.get(&constant) {
            return Ok(*index);
        }
        let offset = self.constant_pool_count();
        if offset.checked_add(constant.width() as u16).is_none() {
            return Err(Error::ConstantPoolOverflow { constant, offset });
        }
        let index = ConstantIndex(offset);
        self.interned.insert(constant.clone(), index);
        self.constants.push(constant);
        Ok(index)
    }

    /// Text whose modified UTF-8 encoding is longer than 65535 bytes is rejected
    pub fn get_utf8(&mut self, text: &str) -> Result<ConstantIndex, Error> {
        let encoded_len = encode_modified_utf8(text).len();
        if encoded_len > u16::MAX as usize {
            return Err(Error::Utf8TooLong(encoded_len));
        }
        self.intern(Constant::Utf8(text.to_owned()))
    }

    pub fn get_class(&mut self, class: &BinaryName) -> Result<ConstantIndex, Error> {
        let name = self.get_utf8(class.as_str())?;
        self.intern(Constant::Class(name))
    }

    pub fn get_string(&mut self, text: &str) -> Result<ConstantIndex, Error> {
        let utf8 = self.get_utf8(text)?;
        self.intern(Constant::String(utf8))
    }

    pub fn get_integer(&mut self, value: i32) -> Result<ConstantIndex, Error> {
        self.intern(Constant::Integer(value))
    }

    pub fn get_float(&mut self, value: f32) -> Result<ConstantIndex, Error> {
        self.intern(Constant::Float {
            bits: value.to_bits(),
        })
    }

    pub fn get_long(&mut self, value: i64) -> Result<ConstantIndex, Error> {
        self.intern(Constant::Long(value))
    }

    pub fn get_double(&mut self, value: f64) -> Result<ConstantIndex, Error> {
        self.intern(Constant::Double {
            bits: value.to_bits(),
        })
    }

    /// Method reference, along with the class, name, and descriptor entries it points to
    ///
    /// The descriptor is not checked for well-formedness.
    pub fn get_method_ref(
        &mut self,
        owner: &BinaryName,
        name: &str,
        descriptor: &str,
        is_interface: bool,
    ) -> Result<ConstantIndex, Error> {
        let class = self.get_class(owner)?;
        let name = self.get_utf8(name)?;
        let descriptor = self.get_utf8(descriptor)?;
        let name_and_type = self.intern(Constant::NameAndType { name, descriptor })?;
        self.intern(Constant::MethodRef {
            class,
            name_and_type,
            is_interface,
        })
    }

    pub fn get_method_type(&mut self, descriptor: &str) -> Result<ConstantIndex, Error> {
        let descriptor = self.get_utf8(descriptor)?;
        self.intern(Constant::MethodType { descriptor })
    }
}

/// `constant_pool_count` followed by the entries
impl Serialize for ConstantsPool {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.constant_pool_count().serialize(writer)?;
        for constant in &self.constants {
            constant.serialize(writer)?;
        }
        Ok(())
    }
}

/// Encode text the way `DataOutput.writeUTF` does
///
/// This differs from UTF-8 in two places: `\u{0000}` takes two bytes (so encoded text never
/// contains a zero byte), and characters outside the basic multilingual plane are written as a
/// surrogate pair of three-byte sequences.
pub fn encode_modified_utf8(text: &str) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(text.len());
    let mut units = [0u16; 2];
    for c in text.chars() {
        for unit in c.encode_utf16(&mut units).iter().map(|unit| *unit as u32) {
            match unit {
                0x0001..=0x007F => encoded.push(unit as u8),
                0x0000 | 0x0080..=0x07FF => {
                    encoded.push(0xC0 | (unit >> 6) as u8);
                    encoded.push(0x80 | (unit & 0x3F) as u8);
                }
                _ => {
                    encoded.push(0xE0 | (unit >> 12) as u8);
                    encoded.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                    encoded.push(0x80 | (unit & 0x3F) as u8);
                }
            }
        }
    }
    encoded
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn modified_utf8() {
        assert_eq!(encode_modified_utf8("(JJ)V"), b"(JJ)V".to_vec());
        assert_eq!(encode_modified_utf8("a\x00a"), vec![97, 192, 128, 97]);
        assert_eq!(encode_modified_utf8("ĄǍ"), vec![196, 132, 199, 141]);
        assert_eq!(
            encode_modified_utf8("ऄअ"),
            vec![224, 164, 132, 224, 164, 133]
        );
        assert_eq!(
            encode_modified_utf8("\u{10000}\u{10FFFF}"),
            vec![237, 160, 128, 237, 176, 128, 237, 175, 191, 237, 191, 191]
        );
    }

    #[test]
    fn deduplicates_entries() {
        let mut pool = ConstantsPool::new();
        let first = pool
            .get_method_ref(&BinaryName::METHODHANDLE, "invokeExact", "()V", false)
            .unwrap();
        let second = pool
            .get_method_ref(&BinaryName::METHODHANDLE, "invokeExact", "()V", false)
            .unwrap();
        assert_eq!(first, ConstantIndex(6));
        assert_eq!(first, second);

        // utf8 x3, class, name and type, method ref
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.constant_pool_count(), 7);

        // Same name and type, but now an interface method
        let interface = pool
            .get_method_ref(&BinaryName::METHODHANDLE, "invokeExact", "()V", true)
            .unwrap();
        assert_eq!(interface, ConstantIndex(7));
    }

    #[test]
    fn wide_constants_take_two_indices() {
        let mut pool = ConstantsPool::new();
        assert_eq!(pool.get_long(42).unwrap(), ConstantIndex(1));
        assert_eq!(pool.get_integer(42).unwrap(), ConstantIndex(3));
        assert_eq!(pool.get_double(1.5).unwrap(), ConstantIndex(4));
        assert_eq!(pool.get_float(1.5).unwrap(), ConstantIndex(6));
        assert_eq!(pool.constant_pool_count(), 7);

        let indices: Vec<u16> = pool.iter().map(|(index, _)| index.0).collect();
        assert_eq!(indices, vec![1, 3, 4, 6]);
    }

    #[test]
    fn signed_zero_floats_are_distinct() {
        let mut pool = ConstantsPool::new();
        let positive = pool.get_float(0.0).unwrap();
        let negative = pool.get_float(-0.0).unwrap();
        assert_ne!(positive, negative);
        assert_eq!(pool.get_float(0.0).unwrap(), positive);
    }

    #[test]
    fn oversized_utf8_is_rejected() {
        let mut pool = ConstantsPool::new();
        let huge = "x".repeat(u16::MAX as usize + 1);
        match pool.get_utf8(&huge) {
            Err(Error::Utf8TooLong(len)) => assert_eq!(len, u16::MAX as usize + 1),
            other => panic!("Expected oversized utf8 error, got {:?}", other),
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn serialized_layout() {
        let mut pool = ConstantsPool::new();
        pool.get_string("hi").unwrap();
        pool.get_double(1.0).unwrap();

        let mut bytes = vec![];
        pool.serialize(&mut bytes).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x00, 0x05, // constant_pool_count
                0x01, 0x00, 0x02, b'h', b'i', // CONSTANT_Utf8
                0x08, 0x00, 0x01, // CONSTANT_String
                0x06, 0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // CONSTANT_Double
            ]
        );
    }
}
