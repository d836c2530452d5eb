pub mod resolve_names;

pub use resolve_names::{NameResolutionOutcome, ResolveNamesUseCase};
