//! The original plain-text socket protocol.
//!
//! One request per connection: the client writes `GAME_ID:POSITION` (or a
//! bare `POSITION`, which targets [`DEFAULT_GAME_ID`]) and the server writes
//! back either one of the four response tokens or an `ERROR: ...` line, then
//! closes the connection.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::{NetConfig, DEFAULT_GAME_ID};
use crate::core::{DefenseStatus, FleetPlan, ResponseCode};
use crate::protocol::{AttackReply, DefenseApi, Rejection};
use crate::service::DefenseService;

/// Largest request the server reads.
pub const MAX_REQUEST_BYTES: usize = 1024;

/// Split a raw request into `(game_id, position)`.
pub fn parse_request(raw: &str) -> (String, String) {
    let raw = raw.trim();
    match raw.split_once(':') {
        Some((game_id, position)) => (game_id.to_string(), position.to_string()),
        None => (DEFAULT_GAME_ID.to_string(), raw.to_string()),
    }
}

/// Text written back for a reply.
pub fn encode_reply(reply: &AttackReply) -> String {
    match reply {
        AttackReply::Resolved { code, .. } => code.token().to_string(),
        AttackReply::Rejected(reason) => format!("ERROR: {}", reason),
    }
}

/// Inverse of [`encode_reply`], as seen by a client.
pub fn decode_reply(position: &str, text: &str) -> anyhow::Result<AttackReply> {
    let text = text.trim();
    if let Some(detail) = text.strip_prefix("ERROR:") {
        let detail = detail.trim();
        if detail == "Game already over" {
            return Ok(AttackReply::Rejected(Rejection::GameOver {
                game_id: String::new(),
            }));
        }
        if let Some(rest) = detail.strip_prefix("Game ID '") {
            if let Some(game_id) = rest.strip_suffix("' not found") {
                return Ok(AttackReply::Rejected(Rejection::NotFound {
                    game_id: game_id.to_string(),
                }));
            }
        }
        return Err(anyhow::anyhow!("Defender error: {}", detail));
    }
    let code: ResponseCode = text.parse()?;
    Ok(AttackReply::Resolved {
        position: position.to_string(),
        code,
    })
}

/// Serve one legacy connection against `service`.
pub async fn handle_connection(
    mut stream: TcpStream,
    service: &DefenseService,
    config: &NetConfig,
) -> anyhow::Result<()> {
    let mut buf = [0u8; MAX_REQUEST_BYTES];
    let n = timeout(config.timeout, stream.read(&mut buf))
        .await
        .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", config.timeout))??;
    let raw = String::from_utf8_lossy(&buf[..n]);
    if raw.trim().is_empty() {
        return Ok(());
    }
    let (game_id, position) = parse_request(&raw);
    log::debug!("legacy request {:?}", raw.trim());
    let reply = service.handle_attack(&game_id, &position);
    timeout(config.timeout, stream.write_all(encode_reply(&reply).as_bytes()))
        .await
        .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", config.timeout))??;
    stream.shutdown().await.ok();
    Ok(())
}

/// Client side of the text protocol. Opens a fresh connection per attack.
pub struct LegacyClient {
    addr: String,
    config: NetConfig,
}

impl LegacyClient {
    pub fn new(addr: impl Into<String>, config: NetConfig) -> Self {
        Self {
            addr: addr.into(),
            config,
        }
    }

    async fn open(&self) -> anyhow::Result<TcpStream> {
        timeout(self.config.timeout, TcpStream::connect(&self.addr))
            .await
            .map_err(|_| anyhow::anyhow!("Timeout connecting to {}", self.addr))?
            .map_err(|e| anyhow::anyhow!("Could not connect to {}: {}", self.addr, e))
    }
}

#[async_trait::async_trait]
impl DefenseApi for LegacyClient {
    async fn attack(&mut self, game_id: &str, position: &str) -> anyhow::Result<AttackReply> {
        let mut stream = self.open().await?;
        let request = format!("{}:{}", game_id, position);
        let mut reply = Vec::new();
        let exchange = async {
            stream.write_all(request.as_bytes()).await?;
            stream.read_to_end(&mut reply).await?;
            anyhow::Ok(())
        };
        timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| anyhow::anyhow!("Timeout waiting for {}", self.addr))??;
        decode_reply(position, &String::from_utf8_lossy(&reply))
    }

    async fn setup(&mut self, _game_id: &str, _plan: FleetPlan) -> anyhow::Result<()> {
        Err(Rejection::Unsupported.into())
    }

    async fn status(&mut self, _game_id: &str) -> anyhow::Result<DefenseStatus> {
        Err(Rejection::Unsupported.into())
    }

    async fn health(&mut self) -> anyhow::Result<()> {
        self.open().await.map(drop)
    }
}
