use std::sync::Arc;
use std::time::Duration;

use naval_battle::{
    serve, AttackRegistry, AttackReply, AttackSession, DefenseApi, DefenseService, Fleet,
    FleetPlan, GameRegistry, LegacyClient, NetConfig, Position, Rejection, ResponseCode,
    SessionError, Wire, DEFAULT_GAME_ID,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn fleet() -> Fleet {
    Fleet::from_plan(&FleetPlan::from_lines("E3 E4 E5", "B2 C2", "A1")).unwrap()
}

fn config() -> NetConfig {
    NetConfig {
        timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(20),
        ..NetConfig::default()
    }
}

type Server = JoinHandle<anyhow::Result<()>>;

async fn start(ids: &[&str]) -> anyhow::Result<(String, DefenseService, Server)> {
    let registry = Arc::new(GameRegistry::new());
    for id in ids {
        registry.create(id, fleet())?;
    }
    let service = DefenseService::new(registry);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?.to_string();
    let server = tokio::spawn(serve(listener, service.clone(), Wire::Legacy, config()));
    Ok((addr, service, server))
}

/// Send one raw request and read the whole reply.
async fn raw_request(addr: &str, request: &str) -> anyhow::Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(request.as_bytes()).await?;
    let mut reply = String::new();
    stream.read_to_string(&mut reply).await?;
    Ok(reply)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_raw_requests_get_bare_tokens() -> anyhow::Result<()> {
    let (addr, _service, server) = start(&["alpha"]).await?;

    assert_eq!(raw_request(&addr, "alpha:E3").await?, "202-shocked");
    assert_eq!(raw_request(&addr, "alpha:E3").await?, "404-failed");
    assert_eq!(raw_request(&addr, "alpha:Z9").await?, "404-failed");
    assert_eq!(raw_request(&addr, "alpha:a1\n").await?, "200-sunken");
    assert_eq!(
        raw_request(&addr, "ghost:A1").await?,
        "ERROR: Game ID 'ghost' not found"
    );

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bare_position_targets_default_game() -> anyhow::Result<()> {
    let (addr, service, server) = start(&[DEFAULT_GAME_ID]).await?;

    assert_eq!(raw_request(&addr, "B2").await?, "202-shocked");
    let status = service.registry().status(DEFAULT_GAME_ID).unwrap();
    assert_eq!(status.total_attacks, 1);

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_over_legacy_client_until_server_stops() -> anyhow::Result<()> {
    let (addr, service, server) = start(&["alpha"]).await?;
    let attacks = AttackRegistry::new();
    let client = LegacyClient::new(addr.clone(), config());
    let mut session = AttackSession::new(client, "alpha", attacks.init("me")?);
    session.connect().await?;

    let mut last = None;
    for p in ["E3", "E4", "E5", "B2", "C2", "A1"] {
        last = Some(session.fire(p).await?.1);
    }
    assert_eq!(last, Some(ResponseCode::FleetSunken));
    assert!(session.is_won());
    assert_eq!(session.tracker().stats().hits, 6);

    tokio::time::timeout(Duration::from_secs(5), server).await???;
    assert!(service.registry().all_destroyed());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_finished_game_refuses_further_attacks() -> anyhow::Result<()> {
    let (addr, _service, server) = start(&["alpha", "beta"]).await?;
    let mut client = LegacyClient::new(addr.clone(), config());
    for p in ["E3", "E4", "E5", "B2", "C2", "A1"] {
        client.attack("alpha", p).await?;
    }
    // "beta" keeps the server running.
    assert_eq!(
        raw_request(&addr, "alpha:D4").await?,
        "ERROR: Game already over"
    );
    let reply = client.attack("alpha", "D5").await?;
    assert!(matches!(
        reply,
        AttackReply::Rejected(Rejection::GameOver { .. })
    ));

    let attacks = AttackRegistry::new();
    let mut session = AttackSession::new(client, "ghost", attacks.init("me")?);
    assert!(matches!(
        session.fire("A1").await,
        Err(SessionError::Rejected(Rejection::NotFound { .. }))
    ));
    assert_eq!(session.tracker().total_attacks(), 0);

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_legacy_client_cannot_set_up_games() -> anyhow::Result<()> {
    let (addr, _service, server) = start(&["alpha"]).await?;
    let mut client = LegacyClient::new(addr, config());
    let err = client
        .setup("beta", FleetPlan::from_lines("A1 A2 A3", "C1 D1", "E5"))
        .await
        .unwrap_err();
    assert_eq!(err.downcast_ref::<Rejection>(), Some(&Rejection::Unsupported));
    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_defender_is_not_recorded() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?.to_string();
    drop(listener);

    let attacks = AttackRegistry::new();
    let client = LegacyClient::new(addr, config());
    let mut session = AttackSession::new(client, "alpha", attacks.init("me")?);
    assert!(matches!(
        session.fire("A1").await,
        Err(SessionError::Transport(_))
    ));
    let stats = attacks.stats("me").unwrap();
    assert_eq!(stats.total_attacks, 0);
    assert!(!session.tracker().has_attempted(Position::parse("A1")?));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_reply_token_is_not_recorded() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?.to_string();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut buf = [0u8; 64];
        let _ = socket.read(&mut buf).await?;
        socket.write_all(b"418-teapot").await?;
        anyhow::Ok(())
    });

    let attacks = AttackRegistry::new();
    let client = LegacyClient::new(addr, config());
    let mut session = AttackSession::new(client, "alpha", attacks.init("me")?);
    assert!(matches!(
        session.fire("B2").await,
        Err(SessionError::Transport(_))
    ));
    assert_eq!(attacks.stats("me").unwrap().total_attacks, 0);
    assert!(!session.tracker().has_attempted(Position::parse("B2")?));

    server.await??;
    Ok(())
}
