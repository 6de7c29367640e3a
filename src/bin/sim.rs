use std::sync::Arc;

use naval_battle::{
    AttackSession, DefenseApi, DefenseService, Fleet, InMemoryTransport, Registries, Skeleton,
    Stub, DEFAULT_GAME_ID,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <fleet-seed> <attack-seed>", args[0]);
        std::process::exit(1);
    }
    let fleet_seed: u64 = args[1].parse()?;
    let attack_seed: u64 = args[2].parse()?;

    let mut fleet_rng = SmallRng::seed_from_u64(fleet_seed);
    let mut attack_rng = SmallRng::seed_from_u64(attack_seed);

    let registries = Registries::new();
    registries
        .defense
        .create(DEFAULT_GAME_ID, Fleet::random(&mut fleet_rng)?)?;
    let tracker = registries.attack.init(DEFAULT_GAME_ID)?;

    let (server_end, client_end) = InMemoryTransport::pair();
    let service = DefenseService::new(Arc::clone(&registries.defense));
    let server = tokio::spawn(async move { Skeleton::new(service, server_end).run().await });

    let mut session = AttackSession::new(Stub::new(client_end), DEFAULT_GAME_ID, tracker);
    let mut shots = Vec::new();
    while !session.is_won() {
        let (pos, code) = session.fire_random(&mut attack_rng).await?;
        shots.push(json!({"position": pos, "result": code.token()}));
    }
    let status = session.api_mut().status(DEFAULT_GAME_ID).await?;
    let stats = session.tracker().stats();
    drop(session);
    server.await??;

    let result = json!({
        "stats": stats,
        "defense_state": status.state_code,
        "shots": shots,
        "games": registries.ids(),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
