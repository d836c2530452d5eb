//! Domain name encoding and decompression (RFC 1035 §3.1, §4.1.4).

use super::reader::{truncated, WireReader};
use ferrous_recursor_domain::DomainError;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const LABEL_TYPE_MASK: u8 = 0xC0;
const POINTER_TAG: u8 = 0xC0;
const MAX_POINTER_JUMPS: usize = 64;

/// Appends `domain` as length-prefixed labels terminated by a zero-length
/// label. One trailing dot is accepted, so `"example.com."` and
/// `"example.com"` encode identically, and `""` or `"."` is the root name.
/// An empty label anywhere else is an `Encoding` error. No compression.
pub fn encode_name(domain: &str, out: &mut Vec<u8>) -> Result<(), DomainError> {
    let start = out.len();
    let relative = domain.strip_suffix('.').unwrap_or(domain);
    // splitting the root name would yield one empty label
    let labels = relative.split('.').filter(|_| !relative.is_empty());

    for label in labels {
        if label.is_empty() {
            out.truncate(start);
            return Err(DomainError::Encoding(format!(
                "'{}' contains an empty label",
                domain
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            out.truncate(start);
            return Err(DomainError::Encoding(format!(
                "label '{}' in '{}' is {} bytes, limit is {}",
                label,
                domain,
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);

    let encoded_len = out.len() - start;
    if encoded_len > MAX_NAME_LEN {
        out.truncate(start);
        return Err(DomainError::Encoding(format!(
            "'{}' encodes to {} bytes, limit is {}",
            domain, encoded_len, MAX_NAME_LEN
        )));
    }

    Ok(())
}

/// Decodes the name starting at the reader's position and leaves the reader
/// just past the name: past the terminating zero byte, or past the two bytes
/// of the first compression pointer met.
///
/// A pointer must target an offset strictly before its own position. Jumps
/// are capped and the decoded name may not exceed 255 wire bytes, so a
/// crafted pointer chain fails with `MalformedName` instead of looping.
pub fn decode_name(reader: &mut WireReader<'_>) -> Result<String, DomainError> {
    let buf = reader.buffer();
    let mut cursor = reader.position();
    let mut resume_at: Option<usize> = None;
    let mut jumps = 0usize;
    let mut wire_len = 1usize;
    let mut labels: Vec<String> = Vec::new();

    loop {
        let length_byte = *buf
            .get(cursor)
            .ok_or_else(|| truncated("label length", 1, cursor, 0))?;

        match length_byte & LABEL_TYPE_MASK {
            0x00 if length_byte == 0 => {
                cursor += 1;
                break;
            }
            0x00 => {
                let len = length_byte as usize;
                let start = cursor + 1;
                if start + len > buf.len() {
                    return Err(truncated(
                        "label",
                        len,
                        start,
                        buf.len().saturating_sub(start),
                    ));
                }

                wire_len += len + 1;
                if wire_len > MAX_NAME_LEN {
                    return Err(DomainError::MalformedName(format!(
                        "name starting at offset {} exceeds {} bytes",
                        reader.position(),
                        MAX_NAME_LEN
                    )));
                }

                labels.push(String::from_utf8_lossy(&buf[start..start + len]).into_owned());
                cursor = start + len;
            }
            POINTER_TAG => {
                let low = *buf
                    .get(cursor + 1)
                    .ok_or_else(|| truncated("compression pointer", 2, cursor, 1))?;
                let target = (((length_byte & !LABEL_TYPE_MASK) as usize) << 8) | low as usize;

                if target >= cursor {
                    return Err(DomainError::MalformedName(format!(
                        "compression pointer at offset {} targets offset {}, not an earlier one",
                        cursor, target
                    )));
                }

                jumps += 1;
                if jumps > MAX_POINTER_JUMPS {
                    return Err(DomainError::MalformedName(format!(
                        "more than {} compression pointers in one name",
                        MAX_POINTER_JUMPS
                    )));
                }

                if resume_at.is_none() {
                    resume_at = Some(cursor + 2);
                }
                cursor = target;
            }
            other => {
                return Err(DomainError::MalformedName(format!(
                    "unsupported label type {:#04x} at offset {}",
                    other, cursor
                )));
            }
        }
    }

    reader.seek(resume_at.unwrap_or(cursor))?;
    Ok(labels.join("."))
}
