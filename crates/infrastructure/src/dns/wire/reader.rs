use ferrous_recursor_domain::DomainError;

/// Bounds-checked big-endian cursor over a whole DNS message.
///
/// The full buffer stays reachable so compression pointers can be resolved
/// against absolute offsets.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self, DomainError> {
        let mut reader = Self::new(buf);
        reader.seek(pos)?;
        Ok(reader)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn seek(&mut self, pos: usize) -> Result<(), DomainError> {
        if pos > self.buf.len() {
            return Err(DomainError::TruncatedMessage(format!(
                "offset {} is past the end of a {}-byte message",
                pos,
                self.buf.len()
            )));
        }
        self.pos = pos;
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize, what: &str) -> Result<&'a [u8], DomainError> {
        if self.remaining() < len {
            return Err(truncated(what, len, self.pos, self.remaining()));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, what: &str) -> Result<u8, DomainError> {
        Ok(self.read_bytes(1, what)?[0])
    }

    pub fn read_u16(&mut self, what: &str) -> Result<u16, DomainError> {
        let bytes = self.read_bytes(2, what)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self, what: &str) -> Result<u32, DomainError> {
        let bytes = self.read_bytes(4, what)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

pub(super) fn truncated(what: &str, needed: usize, at: usize, available: usize) -> DomainError {
    DomainError::TruncatedMessage(format!(
        "{} needs {} bytes at offset {}, {} available",
        what, needed, at, available
    ))
}
