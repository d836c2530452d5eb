pub mod clock;
pub mod metrics;
pub mod resolution_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use metrics::CacheMetrics;
pub use resolution_cache::ResolutionCache;
