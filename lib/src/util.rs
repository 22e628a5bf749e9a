/// Elements with a width in slots
///
/// This comes up in a couple of places when modelling JVM class files:
///
///   - values on the operand stack or in locals (`long` and `double` take two slots)
///   - constant pool entries (`CONSTANT_Long` and `CONSTANT_Double` take two indices)
///   - `ldc`-style constants, which mirror the width of the value they push
///
pub trait Width {
    fn width(&self) -> usize;
}
