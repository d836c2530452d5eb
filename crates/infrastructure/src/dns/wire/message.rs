use super::header::Header;
use super::name::{decode_name, encode_name};
use super::reader::{truncated, WireReader};
use ferrous_recursor_domain::{DomainError, RecordType, CLASS_IN};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Fixed part of a resource record after its name: type, class, ttl, rdlength.
const RECORD_FIXED_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub record_type: u16,
    pub class: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.to_u16(),
            class: CLASS_IN,
        }
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let name = decode_name(reader)?;
        let record_type = reader.read_u16("question type")?;
        let class = reader.read_u16("question class")?;
        Ok(Self {
            name,
            record_type,
            class,
        })
    }

    pub(super) fn encode(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        encode_name(&self.name, out)?;
        out.extend_from_slice(&self.record_type.to_be_bytes());
        out.extend_from_slice(&self.class.to_be_bytes());
        Ok(())
    }
}

/// Interpretation of a record's data payload.
///
/// Payloads that do not fit their declared type (an A record without four
/// bytes, an NS record whose target name is malformed) are kept as `Raw`:
/// the record is still parsed, it just carries no usable address or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Address(IpAddr),
    Name(String),
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub record_type: u16,
    pub class: u16,
    pub ttl: u32,
    pub data: Vec<u8>,
    pub parsed: RecordData,
}

impl ResourceRecord {
    pub fn a(name: impl Into<String>, ttl: u32, address: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::A.to_u16(),
            class: CLASS_IN,
            ttl,
            data: address.octets().to_vec(),
            parsed: RecordData::Address(IpAddr::V4(address)),
        }
    }

    pub fn aaaa(name: impl Into<String>, ttl: u32, address: Ipv6Addr) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::AAAA.to_u16(),
            class: CLASS_IN,
            ttl,
            data: address.octets().to_vec(),
            parsed: RecordData::Address(IpAddr::V6(address)),
        }
    }

    pub fn ns(name: impl Into<String>, ttl: u32, nameserver: &str) -> Result<Self, DomainError> {
        Self::with_name_data(name, RecordType::NS, ttl, nameserver)
    }

    pub fn cname(name: impl Into<String>, ttl: u32, canonical: &str) -> Result<Self, DomainError> {
        Self::with_name_data(name, RecordType::CNAME, ttl, canonical)
    }

    fn with_name_data(
        name: impl Into<String>,
        record_type: RecordType,
        ttl: u32,
        target: &str,
    ) -> Result<Self, DomainError> {
        let mut data = Vec::with_capacity(target.len() + 2);
        encode_name(target, &mut data)?;
        Ok(Self {
            name: name.into(),
            record_type: record_type.to_u16(),
            class: CLASS_IN,
            ttl,
            data,
            parsed: RecordData::Name(target.trim_end_matches('.').to_string()),
        })
    }

    /// The record type, when it is one of the supported ones.
    pub fn kind(&self) -> Option<RecordType> {
        RecordType::from_u16(self.record_type)
    }

    pub fn address(&self) -> Option<IpAddr> {
        match self.parsed {
            RecordData::Address(ip) => Some(ip),
            _ => None,
        }
    }

    /// Nameserver or canonical name carried by an NS or CNAME record.
    pub fn target_name(&self) -> Option<&str> {
        match &self.parsed {
            RecordData::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DomainError> {
        let name = decode_name(reader)?;

        if reader.remaining() < RECORD_FIXED_LEN {
            return Err(truncated(
                "resource record fields",
                RECORD_FIXED_LEN,
                reader.position(),
                reader.remaining(),
            ));
        }
        let record_type = reader.read_u16("record type")?;
        let class = reader.read_u16("record class")?;
        let ttl = reader.read_u32("record ttl")?;
        let data_len = reader.read_u16("record data length")? as usize;

        let data_offset = reader.position();
        let data = reader.read_bytes(data_len, "record data")?.to_vec();
        let parsed = interpret_data(reader.buffer(), data_offset, record_type, &data);

        let structured = matches!(
            RecordType::from_u16(record_type),
            Some(RecordType::A | RecordType::AAAA | RecordType::NS | RecordType::CNAME)
        );
        if structured && parsed == RecordData::Raw {
            debug!(
                name = %name,
                record_type = record_type,
                data_len = data_len,
                "Record data does not match its type, keeping raw bytes"
            );
        }

        Ok(Self {
            name,
            record_type,
            class,
            ttl,
            data,
            parsed,
        })
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        encode_name(&self.name, out)?;
        out.extend_from_slice(&self.record_type.to_be_bytes());
        out.extend_from_slice(&self.class.to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());

        let data_len = u16::try_from(self.data.len()).map_err(|_| {
            DomainError::Encoding(format!(
                "record data for '{}' is {} bytes, limit is {}",
                self.name,
                self.data.len(),
                u16::MAX
            ))
        })?;
        out.extend_from_slice(&data_len.to_be_bytes());
        out.extend_from_slice(&self.data);
        Ok(())
    }
}

/// Name-valued payloads are decoded against the whole message so that
/// compression pointers inside them resolve.
fn interpret_data(message: &[u8], offset: usize, record_type: u16, data: &[u8]) -> RecordData {
    match RecordType::from_u16(record_type) {
        Some(RecordType::A) => <[u8; 4]>::try_from(data)
            .map(|octets| RecordData::Address(IpAddr::V4(Ipv4Addr::from(octets))))
            .unwrap_or(RecordData::Raw),
        Some(RecordType::AAAA) => <[u8; 16]>::try_from(data)
            .map(|octets| RecordData::Address(IpAddr::V6(Ipv6Addr::from(octets))))
            .unwrap_or(RecordData::Raw),
        Some(RecordType::NS) | Some(RecordType::CNAME) => {
            let scoped = &message[..offset + data.len()];
            WireReader::at(scoped, offset)
                .and_then(|mut reader| decode_name(&mut reader))
                .map(RecordData::Name)
                .unwrap_or(RecordData::Raw)
        }
        _ => RecordData::Raw,
    }
}

/// A whole DNS message. Section counts live only in the sequences; the
/// header counts are derived from their lengths on encode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub id: u16,
    pub flags: u16,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        let mut reader = WireReader::new(buf);
        let header = Header::decode(&mut reader)?;

        let questions = decode_section(&mut reader, header.question_count, Question::decode)?;
        let answers = decode_section(&mut reader, header.answer_count, ResourceRecord::decode)?;
        let authorities =
            decode_section(&mut reader, header.authority_count, ResourceRecord::decode)?;
        let additionals =
            decode_section(&mut reader, header.additional_count, ResourceRecord::decode)?;

        Ok(Self {
            id: header.id,
            flags: header.flags,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let header = Header {
            id: self.id,
            flags: self.flags,
            question_count: section_count("question", self.questions.len())?,
            answer_count: section_count("answer", self.answers.len())?,
            authority_count: section_count("authority", self.authorities.len())?,
            additional_count: section_count("additional", self.additionals.len())?,
        };

        let mut out = Vec::with_capacity(512);
        header.encode(&mut out);
        for question in &self.questions {
            question.encode(&mut out)?;
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            record.encode(&mut out)?;
        }
        Ok(out)
    }

    pub fn header(&self) -> Header {
        Header {
            id: self.id,
            flags: self.flags,
            question_count: self.questions.len() as u16,
            answer_count: self.answers.len() as u16,
            authority_count: self.authorities.len() as u16,
            additional_count: self.additionals.len() as u16,
        }
    }
}

fn decode_section<T>(
    reader: &mut WireReader<'_>,
    count: u16,
    decode: fn(&mut WireReader<'_>) -> Result<T, DomainError>,
) -> Result<Vec<T>, DomainError> {
    // A hostile count must not drive the allocation: every entry takes at
    // least five bytes (root name plus type and class).
    let mut items = Vec::with_capacity((count as usize).min(reader.remaining() / 5));
    for _ in 0..count {
        items.push(decode(reader)?);
    }
    Ok(items)
}

fn section_count(section: &str, len: usize) -> Result<u16, DomainError> {
    u16::try_from(len).map_err(|_| {
        DomainError::Encoding(format!(
            "{} section holds {} entries, limit is {}",
            section,
            len,
            u16::MAX
        ))
    })
}
