use crate::jvm::{BinaryName, UnqualifiedName};
use crate::util::Width;

/// JVM bytecode instructions that stack manipulations emit
///
/// The representation is slightly different from the usual presentation to make it more
/// convenient to construct bytecode. For instance:
///
///   - The "wide" instruction doesn't show up at all, but instead gets merged into the load and
///     store instructions it is allowed to modify
///
///   - `ldc`, `ldc_w`, and `ldc2_w` are one instruction, since the encoding can be picked from
///     the constant and its index in the constant pool
///
///   - Branching instructions (apart from the returns) are omitted, since a stack manipulation
///     always falls through to the next one
///
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Nop,
    AConstNull,
    IConstM1,
    IConst0,
    IConst1,
    IConst2,
    IConst3,
    IConst4,
    IConst5,
    LConst0,
    LConst1,
    FConst0,
    FConst1,
    FConst2,
    DConst0,
    DConst1,
    BiPush(i8),
    SiPush(i16),
    Ldc(LdcConstant), // covers `ldc`, `ldc_w`, and `ldc2_w`
    ILoad(u16),       // covers `iload`, `iload{0,3}`, and `wide iload`
    LLoad(u16),
    FLoad(u16),
    DLoad(u16),
    ALoad(u16),
    IStore(u16), // covers `istore`, `istore{0,3}`, and `wide istore`
    LStore(u16),
    FStore(u16),
    DStore(u16),
    AStore(u16),
    Pop,
    Pop2,
    Dup,
    DupX1,
    DupX2,
    Dup2,
    Dup2X1,
    Dup2X2,
    Swap,
    IReturn,
    LReturn,
    FReturn,
    DReturn,
    AReturn,
    Return,
    Invoke(MethodInstruction),
}

/// Constant loaded by an `ldc`-family instruction
#[derive(Clone, Debug, PartialEq)]
pub enum LdcConstant {
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(String),

    /// `java.lang.invoke.MethodType` with the given descriptor
    MethodType(String),
}

/// Width of the value pushed onto the stack (`long` and `double` need `ldc2_w`)
impl Width for LdcConstant {
    fn width(&self) -> usize {
        match self {
            LdcConstant::Long(_) | LdcConstant::Double(_) => 2,
            _ => 1,
        }
    }
}

/// Method call instruction
///
/// The descriptor is kept as a plain string: the instruction is emitted exactly as requested and
/// it is up to the sink to decide whether it can represent it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodInstruction {
    pub invoke_type: InvokeType,
    pub owner: BinaryName,
    pub name: UnqualifiedName,
    pub descriptor: String,
    pub is_interface: bool,
}

/// Type of method to invoke
///
/// Note: `invokedynamic` is not included since its constant argument is not a method reference.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum InvokeType {
    Virtual,
    Special,
    Static,
    Interface,
}

impl InvokeType {
    pub const fn opcode(self) -> u8 {
        match self {
            InvokeType::Virtual => 0xb6,
            InvokeType::Special => 0xb7,
            InvokeType::Static => 0xb8,
            InvokeType::Interface => 0xb9,
        }
    }

    /// Whether the invocation pops a receiver off the stack before its arguments
    pub const fn has_receiver(self) -> bool {
        !matches!(self, InvokeType::Static)
    }
}
