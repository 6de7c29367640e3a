use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::config::NetConfig;
use crate::protocol::Message;
use crate::transport::Transport;

/// Length-prefixed bincode frames over a TCP stream.
///
/// Each frame is a big-endian `u32` byte count followed by the encoded
/// [`Message`]. Every send and receive is bounded by the configured timeout.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, &NetConfig::default())
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self::with_config(stream, &NetConfig::with_timeout(timeout_duration))
    }

    pub fn with_config(stream: TcpStream, config: &NetConfig) -> Self {
        Self {
            stream,
            timeout_duration: config.timeout,
            max_message_size: config.max_message_size,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        Self::connect_with(addr, &NetConfig::default()).await
    }

    pub async fn connect_with<A: ToSocketAddrs>(
        addr: A,
        config: &NetConfig,
    ) -> anyhow::Result<Self> {
        let stream = timeout(config.timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connect timeout after {:?}", config.timeout))??;
        Ok(Self::with_config(stream, config))
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("Write error: {}", e),
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("Read error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let data = bincode::serialize(&msg)
            .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        if data.len() as u64 > self.max_message_size as u64 {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }
        log::debug!("sending {} byte frame", data.len());

        let send_op = async {
            let len = (data.len() as u32).to_be_bytes();
            self.stream.write_all(&len).await.map_err(write_error)?;
            self.stream.write_all(&data).await.map_err(write_error)?;
            anyhow::Ok(())
        };
        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let max = self.max_message_size;
        let recv_op = async {
            let mut len_buf = [0u8; 4];
            self.stream.read_exact(&mut len_buf).await.map_err(read_error)?;
            let len = u32::from_be_bytes(len_buf);
            if len > max {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    max
                ));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }
            let mut buf = vec![0u8; len as usize];
            self.stream.read_exact(&mut buf).await.map_err(read_error)?;
            log::debug!("received {} byte frame", len);
            bincode::deserialize::<Message>(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
        };
        timeout(self.timeout_duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))?
    }
}
