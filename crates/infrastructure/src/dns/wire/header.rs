use super::reader::WireReader;
use ferrous_recursor_domain::DomainError;

pub const HEADER_LEN: usize = 12;

pub const FLAG_RESPONSE: u16 = 1 << 15;
pub const FLAG_AUTHORITATIVE: u16 = 1 << 10;
pub const FLAG_TRUNCATED: u16 = 1 << 9;
pub const FLAG_RECURSION_DESIRED: u16 = 1 << 8;
const RCODE_MASK: u16 = 0x000F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// Header of an outgoing query: recursion desired, one question.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: FLAG_RECURSION_DESIRED,
            question_count: 1,
            ..Self::default()
        }
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        Ok(Self {
            id: reader.read_u16("header id")?,
            flags: reader.read_u16("header flags")?,
            question_count: reader.read_u16("question count")?,
            answer_count: reader.read_u16("answer count")?,
            authority_count: reader.read_u16("authority count")?,
            additional_count: reader.read_u16("additional count")?,
        })
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&self.question_count.to_be_bytes());
        out.extend_from_slice(&self.answer_count.to_be_bytes());
        out.extend_from_slice(&self.authority_count.to_be_bytes());
        out.extend_from_slice(&self.additional_count.to_be_bytes());
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & FLAG_TRUNCATED != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RECURSION_DESIRED != 0
    }

    pub fn response_code(&self) -> u8 {
        (self.flags & RCODE_MASK) as u8
    }
}
