pub mod record_type;

pub use record_type::RecordType;

/// The INTERNET class, the only class this resolver places on the wire.
pub const CLASS_IN: u16 = 1;
