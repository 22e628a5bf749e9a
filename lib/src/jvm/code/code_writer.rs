use crate::jvm::class_file::{ConstantIndex, ConstantsPool, Serialize};
use crate::jvm::code::{Instruction, InvokeType, LdcConstant, MethodVisitor};
use crate::jvm::{Error, MethodDescriptor, Name, ParseDescriptor};
use byteorder::WriteBytesExt;
use std::io::Result as IoResult;

/// Method visitor which encodes instructions into a bytecode array
///
/// Constants referenced by instructions are interned into the writer's own constants pool. When
/// the method is done, [`CodeWriter::finish`] hands back both the encoded code and the pool.
pub struct CodeWriter {
    constants: ConstantsPool,
    code_array: Vec<u8>,
    max_stack: u16,
    max_locals: u16,
}

/// Encoded method body (the interesting part of a `Code` attribute)
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7.3
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Code {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code_array: Vec<u8>,
}

impl Serialize for Code {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> IoResult<()> {
        self.max_stack.serialize(writer)?;
        self.max_locals.serialize(writer)?;
        (self.code_array.len() as u32).serialize(writer)?;
        writer.write_all(&self.code_array)?;
        0u16.serialize(writer)?; // exception table
        0u16.serialize(writer)?; // attributes
        Ok(())
    }
}

/// Operand that had to be resolved against the constants pool
enum PoolOperand {
    None,
    Constant(ConstantIndex),
    Method(ConstantIndex, Option<u8>),
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    /// Make a writer with a fresh constants pool
    pub fn new() -> CodeWriter {
        CodeWriter::with_constants(ConstantsPool::new())
    }

    /// Make a writer which adds onto an existing constants pool
    pub fn with_constants(constants: ConstantsPool) -> CodeWriter {
        CodeWriter {
            constants,
            code_array: vec![],
            max_stack: 0,
            max_locals: 0,
        }
    }

    /// Bytecode encoded so far
    pub fn code_array(&self) -> &[u8] {
        &self.code_array
    }

    pub fn constants(&self) -> &ConstantsPool {
        &self.constants
    }

    /// Consume the writer, returning the method code and the constants pool it references
    pub fn finish(self) -> (Code, ConstantsPool) {
        let code = Code {
            max_stack: self.max_stack,
            max_locals: self.max_locals,
            code_array: self.code_array,
        };
        (code, self.constants)
    }

    /// Intern whatever the instruction needs from the constants pool
    fn resolve(&mut self, instruction: &Instruction) -> Result<PoolOperand, Error> {
        let operand = match instruction {
            Instruction::Ldc(constant) => {
                let index = match constant {
                    LdcConstant::Integer(integer) => self.constants.get_integer(*integer)?,
                    LdcConstant::Float(float) => self.constants.get_float(*float)?,
                    LdcConstant::Long(long) => self.constants.get_long(*long)?,
                    LdcConstant::Double(double) => self.constants.get_double(*double)?,
                    LdcConstant::String(string) => self.constants.get_string(string)?,
                    LdcConstant::MethodType(descriptor) => {
                        self.constants.get_method_type(descriptor)?
                    }
                };
                PoolOperand::Constant(index)
            }
            Instruction::Invoke(method) => {
                let index = self.constants.get_method_ref(
                    &method.owner,
                    method.name.as_str(),
                    &method.descriptor,
                    method.is_interface,
                )?;

                // `invokeinterface` redundantly encodes the argument slots (receiver included)
                let count = if method.invoke_type == InvokeType::Interface {
                    let descriptor = MethodDescriptor::parse(&method.descriptor)
                        .map_err(|_| Error::BadDescriptor(method.descriptor.clone()))?;
                    let count = u8::try_from(descriptor.parameter_length(true))
                        .map_err(|_| Error::BadDescriptor(method.descriptor.clone()))?;
                    Some(count)
                } else {
                    None
                };
                PoolOperand::Method(index, count)
            }
            _ => PoolOperand::None,
        };
        Ok(operand)
    }
}

impl MethodVisitor for CodeWriter {
    fn visit_instruction(&mut self, instruction: Instruction) -> Result<(), Error> {
        let operand = self.resolve(&instruction)?;

        let mut bytes: Vec<u8> = vec![];
        encode_instruction(&instruction, &operand, &mut bytes).map_err(Error::IoError)?;

        let code_length = self.code_array.len() + bytes.len();
        if code_length > u16::MAX as usize {
            return Err(Error::MethodCodeOverflow(code_length));
        }
        self.code_array.extend(bytes);
        Ok(())
    }

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> Result<(), Error> {
        self.max_stack = max_stack;
        self.max_locals = max_locals;
        Ok(())
    }
}

fn encode_instruction<W: WriteBytesExt>(
    instruction: &Instruction,
    operand: &PoolOperand,
    writer: &mut W,
) -> IoResult<()> {
    /* The load/store instructions follow the same pattern:
     *
     *   - short form (0-3) have special bytes
     *   - normal form (0-255) use `iload` plus a byte operand
     *   - wide form (255-65535) use `wide iload` plus two byte operands
     */
    fn serialize_load_or_store<W: WriteBytesExt>(
        idx: u16,
        short_form_start: u8,
        normal_form: u8,
        writer: &mut W,
    ) -> IoResult<()> {
        match u8::try_from(idx) {
            Ok(n @ 0..=3) => (short_form_start + n).serialize(writer),
            Ok(n) => {
                normal_form.serialize(writer)?;
                n.serialize(writer)
            }
            Err(_) => {
                0xC4u8.serialize(writer)?;
                normal_form.serialize(writer)?;
                idx.serialize(writer)
            }
        }
    }

    match instruction {
        Instruction::Nop => 0x00u8.serialize(writer)?,
        Instruction::AConstNull => 0x01u8.serialize(writer)?,
        Instruction::IConstM1 => 0x02u8.serialize(writer)?,
        Instruction::IConst0 => 0x03u8.serialize(writer)?,
        Instruction::IConst1 => 0x04u8.serialize(writer)?,
        Instruction::IConst2 => 0x05u8.serialize(writer)?,
        Instruction::IConst3 => 0x06u8.serialize(writer)?,
        Instruction::IConst4 => 0x07u8.serialize(writer)?,
        Instruction::IConst5 => 0x08u8.serialize(writer)?,
        Instruction::LConst0 => 0x09u8.serialize(writer)?,
        Instruction::LConst1 => 0x0au8.serialize(writer)?,
        Instruction::FConst0 => 0x0bu8.serialize(writer)?,
        Instruction::FConst1 => 0x0cu8.serialize(writer)?,
        Instruction::FConst2 => 0x0du8.serialize(writer)?,
        Instruction::DConst0 => 0x0eu8.serialize(writer)?,
        Instruction::DConst1 => 0x0fu8.serialize(writer)?,
        Instruction::BiPush(b) => {
            0x10u8.serialize(writer)?;
            b.serialize(writer)?;
        }
        Instruction::SiPush(s) => {
            0x11u8.serialize(writer)?;
            s.serialize(writer)?;
        }
        Instruction::Ldc(constant) => {
            let idx = match operand {
                PoolOperand::Constant(ConstantIndex(idx)) => *idx,
                _ => unreachable!("`ldc` is always resolved to a constant"),
            };
            match (constant, u8::try_from(idx)) {
                (LdcConstant::Long(_) | LdcConstant::Double(_), _) => {
                    0x14u8.serialize(writer)?;
                    idx.serialize(writer)?;
                }
                (_, Ok(b)) => {
                    0x12u8.serialize(writer)?;
                    b.serialize(writer)?;
                }
                (_, Err(_)) => {
                    0x13u8.serialize(writer)?;
                    idx.serialize(writer)?;
                }
            }
        }
        Instruction::ILoad(idx) => serialize_load_or_store(*idx, 0x1a, 0x15, writer)?,
        Instruction::LLoad(idx) => serialize_load_or_store(*idx, 0x1e, 0x16, writer)?,
        Instruction::FLoad(idx) => serialize_load_or_store(*idx, 0x22, 0x17, writer)?,
        Instruction::DLoad(idx) => serialize_load_or_store(*idx, 0x26, 0x18, writer)?,
        Instruction::ALoad(idx) => serialize_load_or_store(*idx, 0x2a, 0x19, writer)?,
        Instruction::IStore(idx) => serialize_load_or_store(*idx, 0x3b, 0x36, writer)?,
        Instruction::LStore(idx) => serialize_load_or_store(*idx, 0x3f, 0x37, writer)?,
        Instruction::FStore(idx) => serialize_load_or_store(*idx, 0x43, 0x38, writer)?,
        Instruction::DStore(idx) => serialize_load_or_store(*idx, 0x47, 0x39, writer)?,
        Instruction::AStore(idx) => serialize_load_or_store(*idx, 0x4b, 0x3a, writer)?,
        Instruction::Pop => 0x57u8.serialize(writer)?,
        Instruction::Pop2 => 0x58u8.serialize(writer)?,
        Instruction::Dup => 0x59u8.serialize(writer)?,
        Instruction::DupX1 => 0x5au8.serialize(writer)?,
        Instruction::DupX2 => 0x5bu8.serialize(writer)?,
        Instruction::Dup2 => 0x5cu8.serialize(writer)?,
        Instruction::Dup2X1 => 0x5du8.serialize(writer)?,
        Instruction::Dup2X2 => 0x5eu8.serialize(writer)?,
        Instruction::Swap => 0x5fu8.serialize(writer)?,
        Instruction::IReturn => 0xacu8.serialize(writer)?,
        Instruction::LReturn => 0xadu8.serialize(writer)?,
        Instruction::FReturn => 0xaeu8.serialize(writer)?,
        Instruction::DReturn => 0xafu8.serialize(writer)?,
        Instruction::AReturn => 0xb0u8.serialize(writer)?,
        Instruction::Return => 0xb1u8.serialize(writer)?,
        Instruction::Invoke(method) => {
            let (idx, count) = match operand {
                PoolOperand::Method(idx, count) => (idx, count),
                _ => unreachable!("invocations are always resolved to a method reference"),
            };
            method.invoke_type.opcode().serialize(writer)?;
            idx.serialize(writer)?;
            if let Some(count) = count {
                count.serialize(writer)?;
                0u8.serialize(writer)?;
            }
        }
    }
    Ok(())
}
