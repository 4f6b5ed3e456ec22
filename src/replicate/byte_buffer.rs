use crate::bytecode::DumpSink;

/// Growable, append-only byte sink used to capture a dumped closure body.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl DumpSink for ByteBuffer {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), String> {
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_chunks_in_order() {
        let mut buffer = ByteBuffer::new();
        assert!(buffer.is_empty());

        buffer.write_chunk(&[1, 2]).unwrap();
        buffer.write_chunk(&[]).unwrap();
        buffer.write_chunk(&[3]).unwrap();

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);
        assert_eq!(buffer.into_bytes(), vec![1, 2, 3]);
    }
}
