use super::builders::ResponseBuilder;
use async_trait::async_trait;
use ferrous_recursor_domain::DomainError;
use ferrous_recursor_infrastructure::dns::wire::Message;
use ferrous_recursor_infrastructure::dns::{DnsTransport, TransportResponse};
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

/// Transport that never lets a walk finish: every query for a name outside
/// `maze.test` is referred to a freshly named nameserver without glue, and
/// every such nameserver resolves at once to a fresh address.
#[derive(Default)]
pub struct ReferralMazeTransport {
    names: Mutex<Vec<String>>,
}

impl ReferralMazeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchanges(&self) -> usize {
        self.names.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsTransport for ReferralMazeTransport {
    async fn send(
        &self,
        _server: SocketAddr,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let query = Message::decode(message_bytes).expect("resolver sent an undecodable query");
        let name = query.questions[0].name.clone();

        let serial = {
            let mut names = self.names.lock().unwrap();
            names.push(name.clone());
            names.len()
        };

        let response = if name.ends_with(".maze.test") {
            let address = format!("10.9.{}.{}", serial / 256, serial % 256);
            ResponseBuilder::new().answer_a(&name, &address, 60)
        } else {
            ResponseBuilder::new().authority_ns(&name, &format!("ns{}.maze.test", serial))
        };

        Ok(TransportResponse {
            bytes: response.build(),
            protocol_used: "MAZE",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "MAZE"
    }
}
