//! DNS message codec (RFC 1035 §4).
//!
//! Encoding never compresses names. Decoding follows compression pointers
//! but only backwards, with a bounded number of jumps.

pub mod header;
pub mod message;
pub mod message_builder;
pub mod name;
pub mod reader;

pub use header::{Header, HEADER_LEN};
pub use message::{Message, Question, RecordData, ResourceRecord};
pub use message_builder::MessageBuilder;
pub use name::{decode_name, encode_name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use reader::WireReader;
