use super::{Context, MethodType, Size, StackManipulation};
use crate::jvm::class_file::Version;
use crate::jvm::code::{Instruction, LdcConstant, MethodVisitor};
use crate::jvm::{Error, StackSize};

/// Push an `int` using the shortest encoding available
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct IntegerConstant(pub i32);

impl IntegerConstant {
    fn instruction(self) -> Instruction {
        match self.0 {
            -1 => Instruction::IConstM1,
            0 => Instruction::IConst0,
            1 => Instruction::IConst1,
            2 => Instruction::IConst2,
            3 => Instruction::IConst3,
            4 => Instruction::IConst4,
            5 => Instruction::IConst5,
            value => {
                if let Ok(byte) = i8::try_from(value) {
                    Instruction::BiPush(byte)
                } else if let Ok(short) = i16::try_from(value) {
                    Instruction::SiPush(short)
                } else {
                    Instruction::Ldc(LdcConstant::Integer(value))
                }
            }
        }
    }
}

impl StackManipulation for IntegerConstant {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        visitor.visit_instruction(self.instruction())?;
        Ok(StackSize::Single.to_increasing_size())
    }
}

/// Push a `long`
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct LongConstant(pub i64);

impl StackManipulation for LongConstant {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        let instruction = match self.0 {
            0 => Instruction::LConst0,
            1 => Instruction::LConst1,
            value => Instruction::Ldc(LdcConstant::Long(value)),
        };
        visitor.visit_instruction(instruction)?;
        Ok(StackSize::Double.to_increasing_size())
    }
}

/// Push a `float`
///
/// Only positive zero gets `fconst_0`: negative zero is loaded from the constant pool.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FloatConstant(pub f32);

impl StackManipulation for FloatConstant {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        let value = self.0;
        let instruction = if value.to_bits() == 0f32.to_bits() {
            Instruction::FConst0
        } else if value == 1.0 {
            Instruction::FConst1
        } else if value == 2.0 {
            Instruction::FConst2
        } else {
            Instruction::Ldc(LdcConstant::Float(value))
        };
        visitor.visit_instruction(instruction)?;
        Ok(StackSize::Single.to_increasing_size())
    }
}

/// Push a `double`
///
/// Only positive zero gets `dconst_0`: negative zero is loaded from the constant pool.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DoubleConstant(pub f64);

impl StackManipulation for DoubleConstant {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        let value = self.0;
        let instruction = if value.to_bits() == 0f64.to_bits() {
            Instruction::DConst0
        } else if value == 1.0 {
            Instruction::DConst1
        } else {
            Instruction::Ldc(LdcConstant::Double(value))
        };
        visitor.visit_instruction(instruction)?;
        Ok(StackSize::Double.to_increasing_size())
    }
}

/// Push `null`
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NullConstant;

impl StackManipulation for NullConstant {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        visitor.visit_instruction(Instruction::AConstNull)?;
        Ok(StackSize::Single.to_increasing_size())
    }
}

/// Push a `java.lang.String` constant
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TextConstant(pub String);

impl StackManipulation for TextConstant {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        visitor.visit_instruction(Instruction::Ldc(LdcConstant::String(self.0.clone())))?;
        Ok(StackSize::Single.to_increasing_size())
    }
}

/// Push a `java.lang.invoke.MethodType` constant
///
/// Method type constants are only loadable from Java 7 class files onwards. Applying this to an
/// older class file fails with [`Error::UnsupportedConstant`] before anything is emitted.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MethodTypeConstant(pub MethodType);

impl StackManipulation for MethodTypeConstant {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, visitor: &mut dyn MethodVisitor, context: &mut Context) -> Result<Size, Error> {
        if context.version() < Version::JAVA7 {
            return Err(Error::UnsupportedConstant {
                constant: format!("MethodType {}", self.0),
                version: context.version(),
            });
        }
        let descriptor = self.0.descriptor();
        visitor.visit_instruction(Instruction::Ldc(LdcConstant::MethodType(descriptor)))?;
        Ok(StackSize::Single.to_increasing_size())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::BinaryName;

    fn emit(manipulation: impl StackManipulation) -> (Vec<Instruction>, Size) {
        let mut context = Context::new(BinaryName::OBJECT, Version::JAVA11);
        let mut code: Vec<Instruction> = vec![];
        let size = manipulation.apply(&mut code, &mut context).unwrap();
        (code, size)
    }

    #[test]
    fn integers() {
        assert_eq!(emit(IntegerConstant(-1)).0, vec![Instruction::IConstM1]);
        assert_eq!(emit(IntegerConstant(5)).0, vec![Instruction::IConst5]);
        assert_eq!(emit(IntegerConstant(-128)).0, vec![Instruction::BiPush(-128)]);
        assert_eq!(emit(IntegerConstant(128)).0, vec![Instruction::SiPush(128)]);
        assert_eq!(
            emit(IntegerConstant(1 << 20)).0,
            vec![Instruction::Ldc(LdcConstant::Integer(1 << 20))]
        );
        assert_eq!(emit(IntegerConstant(7)).1, Size::new(1, 1));
    }

    #[test]
    fn longs() {
        assert_eq!(emit(LongConstant(1)).0, vec![Instruction::LConst1]);
        assert_eq!(
            emit(LongConstant(-1)).0,
            vec![Instruction::Ldc(LdcConstant::Long(-1))]
        );
        assert_eq!(emit(LongConstant(0)).1, Size::new(2, 2));
    }

    #[test]
    fn floating_point() {
        assert_eq!(emit(FloatConstant(0.0)).0, vec![Instruction::FConst0]);
        assert_eq!(emit(FloatConstant(2.0)).0, vec![Instruction::FConst2]);
        assert_eq!(
            emit(FloatConstant(-0.0)).0,
            vec![Instruction::Ldc(LdcConstant::Float(-0.0))]
        );
        assert_eq!(emit(DoubleConstant(1.0)).0, vec![Instruction::DConst1]);
        assert_eq!(
            emit(DoubleConstant(0.5)).0,
            vec![Instruction::Ldc(LdcConstant::Double(0.5))]
        );
        assert_eq!(emit(DoubleConstant(0.0)).1, Size::new(2, 2));
    }

    #[test]
    fn references() {
        assert_eq!(emit(NullConstant).0, vec![Instruction::AConstNull]);
        assert_eq!(
            emit(TextConstant(String::from("hello"))).0,
            vec![Instruction::Ldc(LdcConstant::String(String::from("hello")))]
        );
    }

    #[test]
    fn method_type_needs_java7() {
        let constant = MethodTypeConstant(MethodType::parse("(I)V").unwrap());
        assert_eq!(
            emit(constant.clone()).0,
            vec![Instruction::Ldc(LdcConstant::MethodType(String::from("(I)V")))]
        );

        let mut context = Context::new(BinaryName::OBJECT, Version::JAVA6);
        let mut code: Vec<Instruction> = vec![];
        let result = constant.apply(&mut code, &mut context);
        assert!(matches!(
            result,
            Err(Error::UnsupportedConstant { version, .. }) if version == Version::JAVA6
        ));
        assert!(code.is_empty());
    }
}
