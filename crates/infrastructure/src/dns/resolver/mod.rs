pub mod builder;
pub mod config;
pub mod iterative;
pub mod walk;

pub use builder::ResolverBuilder;
pub use config::WalkConfig;
pub use iterative::IterativeResolver;
pub use walk::{classify, ExchangeBudget, Referrer, Step, WalkState};
