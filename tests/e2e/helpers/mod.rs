#![allow(dead_code)]
pub mod mock_nameserver;

pub use mock_nameserver::{MockNameserver, Zone};
