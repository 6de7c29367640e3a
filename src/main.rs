use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use naval_battle::{
    cli::{prompt, prompt_fleet, run_attack_loop},
    config::{DEFAULT_CONNECT_ADDR, DEFAULT_DEFENSE_ADDR, DEFAULT_GAME_ID},
    init_logging, serve,
    ui::render_defense,
    AttackRegistry, AttackSession, DefenseApi, DefenseService, Fleet, FleetPlan, GameRegistry,
    InMemoryTransport, LegacyClient, NetConfig, Registries, Skeleton, Stub, TcpTransport, Wire,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about = "Two-player naval battle over the network", long_about = None)]
struct Cli {
    /// Per-operation network timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place a fleet and defend it against incoming attacks.
    Defend {
        #[arg(long, default_value = DEFAULT_DEFENSE_ADDR)]
        bind: String,
        #[arg(long, default_value = DEFAULT_GAME_ID)]
        game_id: String,
        /// Battleship cells, e.g. "E3 E4 E5".
        #[arg(long)]
        battleship: Option<String>,
        /// Submarine cells, e.g. "B2 C2".
        #[arg(long)]
        submarine: Option<String>,
        /// Destroyer cell, e.g. "A1".
        #[arg(long)]
        destroyer: Option<String>,
        /// Place the fleet at random instead of asking.
        #[arg(long, conflicts_with = "battleship")]
        random: bool,
        #[arg(long, help = "Fix RNG seed for reproducible placement (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Speak the plain-text `GAME_ID:POSITION` protocol.
        #[arg(long)]
        legacy: bool,
    },
    /// Attack an opponent's defense server.
    Attack {
        #[arg(long, default_value = DEFAULT_CONNECT_ADDR)]
        connect: String,
        /// Id this attack game is tracked under locally.
        #[arg(long, default_value = DEFAULT_GAME_ID)]
        game_id: String,
        #[arg(long, default_value = DEFAULT_GAME_ID)]
        enemy_game_id: String,
        /// Fire at random cells instead of asking.
        #[arg(long)]
        auto: bool,
        #[arg(long, help = "Fix RNG seed for reproducible autoplay (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Speak the plain-text `GAME_ID:POSITION` protocol.
        #[arg(long)]
        legacy: bool,
    },
    /// Random fleet against a random attacker in one process.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = NetConfig::with_timeout(Duration::from_secs(cli.timeout_secs));

    match cli.command {
        Commands::Defend {
            bind,
            game_id,
            battleship,
            submarine,
            destroyer,
            random,
            seed,
            legacy,
        } => {
            println!("╔══════════════════════════════════════════╗");
            println!("║              DEFENSE SERVER              ║");
            println!("╚══════════════════════════════════════════╝");
            let fleet = match (battleship, submarine, destroyer) {
                (Some(b), Some(s), Some(d)) => {
                    Fleet::from_plan(&FleetPlan::from_lines(&b, &s, &d))?
                }
                (None, None, None) if random => Fleet::random(&mut make_rng(seed))?,
                (None, None, None) => prompt_fleet()?,
                _ => anyhow::bail!("--battleship, --submarine and --destroyer go together"),
            };
            let registry = Arc::new(GameRegistry::new());
            let handle = registry.create(&game_id, fleet)?;
            let service = DefenseService::new(Arc::clone(&registry));
            println!("{}", render_defense(&naval_battle::registry::lock(&handle).status()));
            println!("Game registered with id {:?}; attacks must name it.", game_id);

            let listener = TcpListener::bind(&bind).await?;
            let wire = if legacy { Wire::Legacy } else { Wire::Binary };
            serve(listener, service, wire, config).await?;

            if let Some(status) = registry.status(&game_id) {
                println!("{}", render_defense(&status));
                println!("Attack history for game {:?}:", game_id);
                for pos in &status.attack_history {
                    println!("    {}", pos);
                }
            }
        }
        Commands::Attack {
            connect,
            game_id,
            enemy_game_id,
            auto,
            seed,
            legacy,
        } => {
            println!("╔══════════════════════════════════════════╗");
            println!("║               ATTACK CLIENT              ║");
            println!("╚══════════════════════════════════════════╝");
            let rng = auto.then(|| make_rng(seed));
            let attacks = AttackRegistry::new();
            let tracker = attacks.init(&game_id)?;
            if legacy {
                let client = LegacyClient::new(connect.clone(), config);
                let mut session = AttackSession::new(client, enemy_game_id, tracker);
                start_attack(&mut session, &connect).await?;
                run_attack_loop(&mut session, rng).await?;
            } else {
                let transport = TcpTransport::connect_with(&connect, &config).await?;
                let mut session = AttackSession::new(Stub::new(transport), enemy_game_id, tracker);
                start_attack(&mut session, &connect).await?;
                run_attack_loop(&mut session, rng).await?;
            }
        }
        Commands::Local { seed } => {
            println!("Starting local game: random fleet vs random attacker...");
            let mut rng = make_rng(seed);
            let registries = Registries::new();
            registries
                .defense
                .create(DEFAULT_GAME_ID, Fleet::random(&mut rng)?)?;
            let tracker = registries.attack.init(DEFAULT_GAME_ID)?;

            let (server_end, client_end) = InMemoryTransport::pair();
            let service = DefenseService::new(Arc::clone(&registries.defense));
            let server = tokio::spawn(async move {
                let mut skeleton = Skeleton::new(service, server_end);
                skeleton.run().await
            });

            let mut session = AttackSession::new(Stub::new(client_end), DEFAULT_GAME_ID, tracker);
            run_attack_loop(&mut session, Some(rng)).await?;
            let status = session.api_mut().status(DEFAULT_GAME_ID).await?;
            println!("{}", render_defense(&status));
            drop(session);
            server.await??;
            log::debug!("games in this process: {:?}", registries.ids());
        }
    }
    Ok(())
}

async fn start_attack<A: DefenseApi>(
    session: &mut AttackSession<A>,
    addr: &str,
) -> anyhow::Result<()> {
    if let Err(e) = session.connect().await {
        eprintln!("Could not reach {}: {}", addr, e);
        if prompt("Continue anyway? (y/n): ")?.as_deref() != Some("y") {
            return Err(anyhow::anyhow!("defender at {} is unreachable", addr));
        }
    } else {
        println!("Connected to {}, enemy game id {:?}", addr, session.enemy_game_id());
    }
    Ok(())
}
