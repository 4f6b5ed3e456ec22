use std::rc::Rc;

use crate::{
    bytecode::DumpSink,
    runtime::compiled_function::{CompiledFunction, Constant},
};

const MAGIC: &[u8; 4] = b"XHFN";
const FORMAT_VERSION: u16 = 1;

const TAG_NUMBER: u8 = 0;
const TAG_TEXT: u8 = 1;
const TAG_FUNCTION: u8 = 2;

/// Dumps a function body, header first, into `sink`.
pub fn dump_function(func: &CompiledFunction, sink: &mut dyn DumpSink) -> Result<(), String> {
    sink.write_chunk(MAGIC)?;
    write_u16(sink, FORMAT_VERSION)?;
    write_function(sink, func)
}

/// Rebuilds a function body from a dumped byte form.
///
/// The error text is surfaced in replication diagnostics, so it names what
/// the stream failed on rather than just failing.
pub fn load_function(bytes: &[u8]) -> Result<Rc<CompiledFunction>, String> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader
        .read_bytes(MAGIC.len())
        .ok_or_else(|| "dump shorter than header".to_string())?;
    if magic != MAGIC {
        return Err("bad magic in function dump".to_string());
    }

    let version = reader
        .read_u16()
        .ok_or_else(|| "dump shorter than header".to_string())?;
    if version != FORMAT_VERSION {
        return Err(format!("unsupported dump format version {}", version));
    }

    read_function(&mut reader)
        .map(Rc::new)
        .ok_or_else(|| "truncated or malformed function body".to_string())
}

fn write_function(sink: &mut dyn DumpSink, func: &CompiledFunction) -> Result<(), String> {
    write_u16(sink, func.num_locals as u16)?;
    write_u16(sink, func.num_parameters as u16)?;
    write_u16(sink, func.num_upvalues as u16)?;

    write_u32(sink, func.constants.len() as u32)?;
    for constant in &func.constants {
        write_constant(sink, constant)?;
    }

    write_u32(sink, func.instructions.len() as u32)?;
    sink.write_chunk(&func.instructions)
}

fn read_function(reader: &mut ByteReader<'_>) -> Option<CompiledFunction> {
    let num_locals = reader.read_u16()? as usize;
    let num_parameters = reader.read_u16()? as usize;
    let num_upvalues = reader.read_u16()? as usize;

    let constants_len = reader.read_u32()? as usize;
    let mut constants = Vec::with_capacity(constants_len.min(reader.remaining()));
    for _ in 0..constants_len {
        constants.push(read_constant(reader)?);
    }

    let instructions_len = reader.read_u32()? as usize;
    let instructions = reader.read_bytes(instructions_len)?.to_vec();

    Some(CompiledFunction::new(
        instructions,
        constants,
        num_locals,
        num_parameters,
        num_upvalues,
    ))
}

fn write_constant(sink: &mut dyn DumpSink, constant: &Constant) -> Result<(), String> {
    match constant {
        Constant::Number(value) => {
            sink.write_chunk(&[TAG_NUMBER])?;
            write_f64(sink, *value)
        }
        Constant::Text(value) => {
            sink.write_chunk(&[TAG_TEXT])?;
            write_string(sink, value)
        }
        Constant::Function(func) => {
            sink.write_chunk(&[TAG_FUNCTION])?;
            write_function(sink, func)
        }
    }
}

fn read_constant(reader: &mut ByteReader<'_>) -> Option<Constant> {
    match reader.read_u8()? {
        TAG_NUMBER => Some(Constant::Number(reader.read_f64()?)),
        TAG_TEXT => Some(Constant::Text(reader.read_string()?)),
        TAG_FUNCTION => Some(Constant::Function(Rc::new(read_function(reader)?))),
        _ => None,
    }
}

fn write_u16(sink: &mut dyn DumpSink, value: u16) -> Result<(), String> {
    sink.write_chunk(&value.to_le_bytes())
}

fn write_u32(sink: &mut dyn DumpSink, value: u32) -> Result<(), String> {
    sink.write_chunk(&value.to_le_bytes())
}

fn write_f64(sink: &mut dyn DumpSink, value: f64) -> Result<(), String> {
    sink.write_chunk(&value.to_le_bytes())
}

fn write_string(sink: &mut dyn DumpSink, value: &str) -> Result<(), String> {
    let bytes = value.as_bytes();
    write_u32(sink, bytes.len() as u32)?;
    sink.write_chunk(bytes)
}

/// Cursor over a dumped byte form.
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        if end > self.bytes.len() {
            return None;
        }
        let chunk = &self.bytes[self.pos..end];
        self.pos = end;
        Some(chunk)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Option<u16> {
        Some(u16::from_le_bytes(self.read_bytes(2)?.try_into().ok()?))
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_bytes(4)?.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_le_bytes(self.read_bytes(8)?.try_into().ok()?))
    }

    fn read_string(&mut self) -> Option<String> {
        let len = self.read_u32()? as usize;
        String::from_utf8(self.read_bytes(len)?.to_vec()).ok()
    }
}
