use async_trait::async_trait;
use ferrous_recursor_domain::DomainError;
use ferrous_recursor_infrastructure::dns::wire::Message;
use ferrous_recursor_infrastructure::dns::{DnsTransport, TransportResponse};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub server: SocketAddr,
    pub name: String,
    pub record_type: u16,
}

/// Transport answering from canned buffers keyed by server and question
/// name. Unknown pairs fail like an unreachable server.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<(IpAddr, String), Result<Vec<u8>, DomainError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, server: &str, name: &str, response: Vec<u8>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((server.parse().unwrap(), name.to_string()), Ok(response));
        self
    }

    pub fn fail(self, server: &str, name: &str, error: DomainError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((server.parse().unwrap(), name.to_string()), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.calls().into_iter().map(|call| call.server).collect()
    }
}

#[async_trait]
impl DnsTransport for StubTransport {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let query = Message::decode(message_bytes).expect("resolver sent an undecodable query");
        let question = query.questions[0].clone();

        self.calls.lock().unwrap().push(RecordedCall {
            server,
            name: question.name.clone(),
            record_type: question.record_type,
        });

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(server.ip(), question.name.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::Transport {
                    server: server.to_string(),
                    reason: "no route to host".to_string(),
                })
            })?;

        Ok(TransportResponse {
            bytes: response,
            protocol_used: "STUB",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "STUB"
    }
}
