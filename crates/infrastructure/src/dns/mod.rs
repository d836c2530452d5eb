pub mod cache;
pub mod resolver;
pub mod transport;
pub mod wire;

pub use cache::{CacheMetrics, Clock, ManualClock, ResolutionCache, SystemClock};
pub use resolver::{IterativeResolver, ResolverBuilder, WalkConfig};
pub use transport::{DnsTransport, TransportResponse, UdpTransport};
pub use wire::{Message, MessageBuilder, Question, RecordData, ResourceRecord};
