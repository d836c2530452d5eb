use ferrous_recursor_infrastructure::dns::wire::header::FLAG_RESPONSE;
use ferrous_recursor_infrastructure::dns::wire::{Message, ResourceRecord};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Canned sections per question name, answered regardless of query type.
#[derive(Default, Clone)]
pub struct Zone {
    entries: HashMap<String, Sections>,
}

#[derive(Default, Clone)]
struct Sections {
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_a(mut self, name: &str, address: Ipv4Addr, ttl: u32) -> Self {
        self.entry(name).answers.push(ResourceRecord::a(name, ttl, address));
        self
    }

    pub fn answer_cname(mut self, name: &str, canonical: &str) -> Self {
        let record = ResourceRecord::cname(name, 300, canonical).unwrap();
        self.entry(name).answers.push(record);
        self
    }

    /// Delegates `name` to `nameserver`, with glue when `glue` is given.
    pub fn delegate(
        mut self,
        name: &str,
        zone: &str,
        nameserver: &str,
        glue: Option<Ipv4Addr>,
    ) -> Self {
        let ns = ResourceRecord::ns(zone, 172800, nameserver).unwrap();
        let sections = self.entry(name);
        sections.authorities.push(ns);
        if let Some(address) = glue {
            sections
                .additionals
                .push(ResourceRecord::a(nameserver, 172800, address));
        }
        self
    }

    fn entry(&mut self, name: &str) -> &mut Sections {
        self.entries.entry(name.to_ascii_lowercase()).or_default()
    }

    fn respond(&self, query: &[u8]) -> Option<Vec<u8>> {
        let query = Message::decode(query).ok()?;
        let question = query.questions.first()?.clone();
        let sections = self
            .entries
            .get(&question.name.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default();

        Message {
            id: query.id,
            flags: FLAG_RESPONSE,
            questions: vec![question],
            answers: sections.answers,
            authorities: sections.authorities,
            additionals: sections.additionals,
        }
        .encode()
        .ok()
    }
}

pub struct MockNameserver {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockNameserver {
    pub async fn start(ip: Ipv4Addr, port: u16, zone: Zone) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from((ip, port))).await?;
        let addr = socket.local_addr()?;
        let zone = Arc::new(zone);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = zone.respond(&buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockNameserver {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Starts one mock per (address, zone) on a single shared port, since the
/// resolver sends every query to the same port.
pub async fn start_all(zones: Vec<(Ipv4Addr, Zone)>) -> (u16, Vec<MockNameserver>) {
    for _ in 0..16 {
        let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = probe.local_addr().unwrap().port();
        drop(probe);

        let mut servers = Vec::with_capacity(zones.len());
        for (ip, zone) in &zones {
            match MockNameserver::start(*ip, port, zone.clone()).await {
                Ok(server) => servers.push(server),
                Err(_) => break,
            }
        }
        if servers.len() == zones.len() {
            return (port, servers);
        }
    }
    panic!("could not find a free port shared by all mock nameservers");
}
