use byteorder::{BigEndian, WriteBytesExt};
use std::io::Result;

/// Big-endian binary encoding of the pieces of a class file
///
/// Constant pool tags and opcodes are single bytes, and most lengths and indices are `u16`, so
/// everything funnels through the fixed-width integer impls below.
pub trait Serialize: Sized {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()>;
}

impl Serialize for u8 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(*self)
    }
}

impl Serialize for i8 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        writer.write_i8(*self)
    }
}

macro_rules! big_endian {
    ($($typ:ty => $write:ident),* $(,)?) => {
        $(
            impl Serialize for $typ {
                fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
                    writer.$write::<BigEndian>(*self)
                }
            }
        )*
    };
}

big_endian! {
    u16 => write_u16,
    u32 => write_u32,
    i16 => write_i16,
    i32 => write_i32,
    i64 => write_i64,
    f32 => write_f32,
    f64 => write_f64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn big_endian_layout() {
        let mut bytes = vec![];
        0xCAFEu16.serialize(&mut bytes).unwrap();
        (-2i8).serialize(&mut bytes).unwrap();
        1i32.serialize(&mut bytes).unwrap();
        assert_eq!(bytes, vec![0xCA, 0xFE, 0xFE, 0x00, 0x00, 0x00, 0x01]);
    }
}
