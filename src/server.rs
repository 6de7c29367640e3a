#![cfg(feature = "std")]

//! Accept loop for a defense process.

use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::time::timeout;

use crate::config::NetConfig;
use crate::service::DefenseService;
use crate::skeleton::Skeleton;
use crate::transport::{legacy, tcp::TcpTransport};

/// Which framing a server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    /// Versioned bincode frames with a session per connection.
    Binary,
    /// One plain-text request per connection.
    Legacy,
}

/// Accept connections and hand each to its own task until every registered
/// game is destroyed, then wait for the open connections to finish so the
/// final replies are written. A failing connection only ends that connection.
/// Binary sessions that stay idle end after `config.timeout`.
pub async fn serve(
    listener: TcpListener,
    service: DefenseService,
    wire: Wire,
    config: NetConfig,
) -> anyhow::Result<()> {
    log::info!("waiting for attacks on {} ({:?})", listener.local_addr()?, wire);
    let mut connections = JoinSet::new();
    while !service.registry().all_destroyed() {
        while let Some(done) = connections.try_join_next() {
            report(done);
        }
        let (stream, addr) = match timeout(config.poll_interval, listener.accept()).await {
            Err(_) => continue,
            Ok(accepted) => accepted?,
        };
        log::debug!("connection from {}", addr);
        let service = service.clone();
        match wire {
            Wire::Binary => {
                let transport = TcpTransport::with_config(stream, &config);
                connections.spawn(async move {
                    let mut skeleton = Skeleton::new(service, transport);
                    if let Err(e) = skeleton.run().await {
                        log::warn!("session with {} ended: {}", addr, e);
                    }
                });
            }
            Wire::Legacy => {
                connections.spawn(async move {
                    if let Err(e) = legacy::handle_connection(stream, &service, &config).await {
                        log::warn!("request from {} failed: {}", addr, e);
                    }
                });
            }
        }
    }
    log::info!("all games are over");
    if !connections.is_empty() {
        log::debug!("waiting for {} open connection(s)", connections.len());
    }
    while let Some(done) = connections.join_next().await {
        report(done);
    }
    Ok(())
}

fn report(done: Result<(), tokio::task::JoinError>) {
    if let Err(e) = done {
        log::warn!("connection task failed: {}", e);
    }
}
