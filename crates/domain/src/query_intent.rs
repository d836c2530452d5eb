use crate::{DomainError, RecordType};

/// What a delegation walk is trying to reach.
///
/// NS and CNAME requests are walked as address lookups: the walk is always
/// driven by address glue, and the original request type only decides what
/// is returned once an answer shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryIntent {
    /// Walk for an address of this family (A or AAAA) and return it.
    Address(RecordType),
    /// Walk for an A record on behalf of the original NS or CNAME request.
    AddressViaGlue(RecordType),
}

impl QueryIntent {
    pub fn from_requested(record_type: RecordType) -> Result<Self, DomainError> {
        match record_type {
            RecordType::A | RecordType::AAAA => Ok(QueryIntent::Address(record_type)),
            RecordType::NS | RecordType::CNAME => Ok(QueryIntent::AddressViaGlue(record_type)),
            RecordType::TXT => Err(DomainError::UnsupportedRecordType(
                "TXT is not resolved over the wire".to_string(),
            )),
        }
    }

    /// The type placed in the question section of every query of the walk.
    pub fn wire_type(&self) -> RecordType {
        match self {
            QueryIntent::Address(record_type) => *record_type,
            QueryIntent::AddressViaGlue(_) => RecordType::A,
        }
    }

    /// The type the caller asked for.
    pub fn requested(&self) -> RecordType {
        match self {
            QueryIntent::Address(record_type) | QueryIntent::AddressViaGlue(record_type) => {
                *record_type
            }
        }
    }

    /// Only plain A answers are ever cached.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, QueryIntent::Address(RecordType::A))
    }
}
