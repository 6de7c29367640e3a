#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::core::{DefenseStatus, FleetPlan, ResponseCode};
use crate::protocol::{AttackReply, DefenseApi, Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Client end of the binary protocol: a [`DefenseApi`] whose calls are
/// answered by a remote [`Skeleton`](crate::skeleton::Skeleton).
pub struct Stub<T: Transport> {
    transport: T,
    seq: u64,
    handshaken: bool,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            seq: 0,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::HelloAck { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::HelloAck { version } => Err(anyhow!(
                "Protocol version mismatch in HelloAck: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            other => Err(anyhow!("Expected HelloAck, got {:?}", other)),
        }
    }

    /// Send a request built from the next sequence number and return the
    /// reply, which must carry the same number.
    async fn call(&mut self, build: impl FnOnce(u64) -> Message + Send) -> anyhow::Result<Message> {
        self.ensure_handshake().await?;
        let seq = self.seq;
        self.seq += 1;
        self.transport.send(build(seq)).await?;
        let reply = self.transport.recv().await?;
        let reply_seq = match &reply {
            Message::AttackResp { seq, .. }
            | Message::StatusResp { seq, .. }
            | Message::HealthOk { seq }
            | Message::Ack { seq }
            | Message::Rejected { seq, .. } => *seq,
            other => return Err(anyhow!("Unexpected reply {:?}", other)),
        };
        if reply_seq != seq {
            log::warn!("sequence mismatch: expected {}, got {}", seq, reply_seq);
            return Err(anyhow!(
                "Sequence mismatch: expected {}, got {}",
                seq,
                reply_seq
            ));
        }
        Ok(reply)
    }
}

#[async_trait::async_trait]
impl<T: Transport> DefenseApi for Stub<T> {
    async fn attack(&mut self, game_id: &str, position: &str) -> anyhow::Result<AttackReply> {
        let (game_id, position) = (game_id.to_string(), position.to_string());
        match self
            .call(move |seq| Message::Attack {
                seq,
                game_id,
                position,
            })
            .await?
        {
            Message::AttackResp {
                position, token, ..
            } => {
                let code: ResponseCode = token.parse()?;
                Ok(AttackReply::Resolved { position, code })
            }
            Message::Rejected { reason, .. } => Ok(AttackReply::Rejected(reason)),
            other => Err(anyhow!("Unexpected reply to Attack: {:?}", other)),
        }
    }

    async fn setup(&mut self, game_id: &str, plan: FleetPlan) -> anyhow::Result<()> {
        let game_id = game_id.to_string();
        match self
            .call(move |seq| Message::Setup { seq, game_id, plan })
            .await?
        {
            Message::Ack { .. } => Ok(()),
            Message::Rejected { reason, .. } => Err(reason.into()),
            other => Err(anyhow!("Unexpected reply to Setup: {:?}", other)),
        }
    }

    async fn status(&mut self, game_id: &str) -> anyhow::Result<DefenseStatus> {
        let game_id = game_id.to_string();
        match self
            .call(move |seq| Message::StatusReq { seq, game_id })
            .await?
        {
            Message::StatusResp { status, .. } => Ok(status),
            Message::Rejected { reason, .. } => Err(reason.into()),
            other => Err(anyhow!("Unexpected reply to StatusReq: {:?}", other)),
        }
    }

    async fn health(&mut self) -> anyhow::Result<()> {
        match self.call(|seq| Message::Health { seq }).await? {
            Message::HealthOk { .. } => Ok(()),
            other => Err(anyhow!("Unexpected reply to Health: {:?}", other)),
        }
    }
}
