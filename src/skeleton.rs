#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::protocol::{AttackReply, DefenseApi, Message, Rejection, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Serves a [`DefenseApi`] to one peer over a [`Transport`].
pub struct Skeleton<E: DefenseApi, T: Transport> {
    api: E,
    transport: T,
}

/// Turn an API error into a rejection frame when it is a refusal, or
/// propagate it when it is a real failure.
fn refusal(seq: u64, err: anyhow::Error) -> anyhow::Result<Message> {
    match err.downcast::<Rejection>() {
        Ok(reason) => Ok(Message::Rejected { seq, reason }),
        Err(err) => Err(err),
    }
}

impl<E: DefenseApi, T: Transport> Skeleton<E, T> {
    pub fn new(api: E, transport: T) -> Self {
        Self { api, transport }
    }

    async fn handshake(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::HelloAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await
            }
            Message::Hello { version } => {
                log::warn!(
                    "protocol version mismatch: expected {}, peer sent {}",
                    PROTOCOL_VERSION,
                    version
                );
                Err(anyhow!(
                    "Protocol version mismatch in Hello: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ))
            }
            other => {
                log::warn!("expected Hello, got {:?}", other);
                Err(anyhow!("Expected handshake"))
            }
        }
    }

    /// Answer requests until the peer disconnects.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.handshake().await?;

        while let Ok(msg) = self.transport.recv().await {
            let reply = match msg {
                Message::Attack {
                    seq,
                    game_id,
                    position,
                } => match self.api.attack(&game_id, &position).await? {
                    AttackReply::Resolved { position, code } => Message::AttackResp {
                        seq,
                        position,
                        token: code.token().to_string(),
                    },
                    AttackReply::Rejected(reason) => Message::Rejected { seq, reason },
                },
                Message::Setup { seq, game_id, plan } => {
                    match self.api.setup(&game_id, plan).await {
                        Ok(()) => Message::Ack { seq },
                        Err(e) => refusal(seq, e)?,
                    }
                }
                Message::StatusReq { seq, game_id } => match self.api.status(&game_id).await {
                    Ok(status) => Message::StatusResp { seq, status },
                    Err(e) => refusal(seq, e)?,
                },
                Message::Health { seq } => {
                    self.api.health().await?;
                    Message::HealthOk { seq }
                }
                other => {
                    log::warn!("unexpected request {:?}", other);
                    return Err(anyhow!("Unexpected request (closing session)"));
                }
            };
            self.transport.send(reply).await?;
        }
        Ok(())
    }
}
