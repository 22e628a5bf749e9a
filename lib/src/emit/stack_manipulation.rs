use super::{Context, Size};
use crate::jvm::code::MethodVisitor;
use crate::jvm::Error;
use std::fmt::Debug;

/// Unit of bytecode emission with a known effect on the operand stack
///
/// Applying a manipulation appends its instructions to the visitor, in program order, and
/// returns the [`Size`] of those instructions alone. Applying manipulations one after another
/// has the effect of the [aggregate](Size::aggregate) of their sizes.
///
/// Invalid manipulations must never be applied: they stand for code that cannot be generated in
/// the current setting, and callers are expected to check [`StackManipulation::is_valid`] (or go
/// through [`Compound`], which does) before emitting anything.
pub trait StackManipulation: Debug {
    /// Whether this manipulation can be applied
    fn is_valid(&self) -> bool;

    /// Emit the instructions of this manipulation
    fn apply(&self, visitor: &mut dyn MethodVisitor, context: &mut Context)
        -> Result<Size, Error>;
}

impl<S: StackManipulation + ?Sized> StackManipulation for &S {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut Context,
    ) -> Result<Size, Error> {
        (**self).apply(visitor, context)
    }
}

impl<S: StackManipulation + ?Sized> StackManipulation for Box<S> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut Context,
    ) -> Result<Size, Error> {
        (**self).apply(visitor, context)
    }
}

/// Manipulation that does nothing
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Trivial;

impl StackManipulation for Trivial {
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(&self, _: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        Ok(Size::ZERO)
    }
}

/// Manipulation that can never be applied
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Illegal;

impl StackManipulation for Illegal {
    fn is_valid(&self) -> bool {
        false
    }

    fn apply(&self, _: &mut dyn MethodVisitor, _: &mut Context) -> Result<Size, Error> {
        Err(Error::IllegalStackManipulation)
    }
}

/// Sequence of manipulations applied in order
///
/// A compound is valid only if all of its parts are. Applying an invalid compound fails before
/// any of its parts emit anything.
#[derive(Debug, Default)]
pub struct Compound {
    manipulations: Vec<Box<dyn StackManipulation>>,
}

impl Compound {
    pub fn new(manipulations: Vec<Box<dyn StackManipulation>>) -> Compound {
        Compound { manipulations }
    }

    /// Append one more manipulation at the end
    pub fn then(mut self, manipulation: impl StackManipulation + 'static) -> Compound {
        self.manipulations.push(Box::new(manipulation));
        self
    }

    pub fn len(&self) -> usize {
        self.manipulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manipulations.is_empty()
    }
}

impl FromIterator<Box<dyn StackManipulation>> for Compound {
    fn from_iter<I: IntoIterator<Item = Box<dyn StackManipulation>>>(iter: I) -> Compound {
        Compound::new(iter.into_iter().collect())
    }
}

impl StackManipulation for Compound {
    fn is_valid(&self) -> bool {
        self.manipulations.iter().all(|manipulation| manipulation.is_valid())
    }

    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut Context,
    ) -> Result<Size, Error> {
        if let Some(invalid) = self.manipulations.iter().find(|m| !m.is_valid()) {
            log::debug!("Refusing to apply compound with invalid part {:?}", invalid);
            return Err(Error::IllegalStackManipulation);
        }

        let mut size = Size::ZERO;
        for manipulation in &self.manipulations {
            let part = manipulation.apply(visitor, context)?;
            log::trace!("Applied {:?} ({})", manipulation, part);
            size = size.aggregate(part);
        }
        Ok(size)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::emit::{IntegerConstant, Removal};
    use crate::jvm::class_file::Version;
    use crate::jvm::code::Instruction;
    use crate::jvm::BinaryName;

    fn context() -> Context {
        Context::new(BinaryName::OBJECT, Version::JAVA8)
    }

    #[test]
    fn trivial() {
        let mut code: Vec<Instruction> = vec![];
        assert!(Trivial.is_valid());
        assert_eq!(Trivial.apply(&mut code, &mut context()).unwrap(), Size::ZERO);
        assert!(code.is_empty());
    }

    #[test]
    fn illegal() {
        let mut code: Vec<Instruction> = vec![];
        assert!(!Illegal.is_valid());
        assert!(matches!(
            Illegal.apply(&mut code, &mut context()),
            Err(Error::IllegalStackManipulation)
        ));
    }

    #[test]
    fn compound_aggregates() {
        let compound = Compound::default()
            .then(IntegerConstant(1))
            .then(IntegerConstant(200))
            .then(Removal::Single)
            .then(Trivial);
        assert_eq!(compound.len(), 4);
        assert!(compound.is_valid());

        let mut code: Vec<Instruction> = vec![];
        let size = compound.apply(&mut code, &mut context()).unwrap();
        assert_eq!(size, Size::new(1, 2));
        assert_eq!(
            code,
            vec![
                Instruction::IConst1,
                Instruction::SiPush(200),
                Instruction::Pop
            ]
        );
    }

    #[test]
    fn invalid_compound_emits_nothing() {
        let compound = Compound::default()
            .then(IntegerConstant(1))
            .then(Illegal)
            .then(Removal::Single);
        assert!(!compound.is_valid());

        let mut code: Vec<Instruction> = vec![];
        let result = compound.apply(&mut code, &mut context());
        assert!(matches!(result, Err(Error::IllegalStackManipulation)));
        assert!(code.is_empty());
    }

    #[test]
    fn nested_and_borrowed() {
        let inner = Compound::default().then(IntegerConstant(-1)).then(IntegerConstant(5));
        let outer: Compound = vec![
            Box::new(inner) as Box<dyn StackManipulation>,
            Box::new(Removal::Double),
        ]
        .into_iter()
        .collect();
        assert!(outer.is_valid());

        let borrowed: &dyn StackManipulation = &outer;
        let mut code: Vec<Instruction> = vec![];
        let size = borrowed.apply(&mut code, &mut context()).unwrap();
        assert_eq!(size, Size::new(0, 2));
        assert_eq!(code.len(), 3);
    }

    #[test]
    fn empty_compound() {
        let compound = Compound::new(vec![]);
        assert!(compound.is_empty());
        assert!(compound.is_valid());
        let mut code: Vec<Instruction> = vec![];
        assert_eq!(compound.apply(&mut code, &mut context()).unwrap(), Size::ZERO);
    }
}
