use super::header::Header;
use super::message::Question;
use ferrous_recursor_domain::{DomainError, RecordType};

/// Builds outgoing queries in wire format.
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a query with a random transaction id.
    ///
    /// The message carries the RD flag and a single IN-class question; no
    /// name compression is applied.
    pub fn build_query(domain: &str, record_type: RecordType) -> Result<Vec<u8>, DomainError> {
        Self::build_query_with_id(domain, record_type).map(|(_, bytes)| bytes)
    }

    /// Like [`build_query`](Self::build_query), also returning the id so the
    /// caller can match it against the response.
    pub fn build_query_with_id(
        domain: &str,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);
        let bytes = Self::encode_query(id, domain, record_type)?;
        Ok((id, bytes))
    }

    pub fn encode_query(
        id: u16,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(domain.len() + 18);
        Header::query(id).encode(&mut buf);

        Question::new(domain, record_type).encode(&mut buf)?;

        Ok(buf)
    }
}
