#![allow(dead_code)]
pub mod builders;
pub mod referral_maze;
pub mod stub_transport;

pub use builders::ResponseBuilder;
pub use referral_maze::ReferralMazeTransport;
pub use stub_transport::StubTransport;
