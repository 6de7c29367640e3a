#![cfg(feature = "std")]

//! Interactive terminal flows for the `defend` and `attack` commands.

use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use crate::core::{Fleet, Grid, Position, ResponseCode, FLEET_CLASSES};
use crate::protocol::DefenseApi;
use crate::session::{AttackSession, SessionError};
use crate::ui::{render_attack_board, render_stats};

/// Print `label` and read one trimmed line. `None` on end of input.
pub fn prompt(label: &str) -> anyhow::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().lock().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// Ask for each ship's cells in turn until every group is valid.
pub fn prompt_fleet() -> anyhow::Result<Fleet> {
    println!("Place your fleet:");
    let mut occupied = Grid::new();
    let mut groups: Vec<Vec<Position>> = Vec::new();
    for class in FLEET_CLASSES {
        loop {
            let label = format!(
                " -> {} ({} cell{}, e.g. {}): ",
                class.name(),
                class.size(),
                if class.size() == 1 { "" } else { "s" },
                ["E3 E4 E5", "B2 C2", "A1"][groups.len()],
            );
            let Some(line) = prompt(&label)? else {
                return Err(anyhow::anyhow!("input closed during fleet setup"));
            };
            let parsed: Result<Vec<Position>, _> =
                line.split_whitespace().map(Position::parse).collect();
            let cells = match parsed {
                Ok(cells) if cells.len() == class.size() => cells,
                Ok(_) => {
                    println!("Error: enter exactly {} valid positions", class.size());
                    continue;
                }
                Err(e) => {
                    println!("Error: {}", e);
                    continue;
                }
            };
            let group: Grid = cells.iter().copied().collect();
            if group.count_ones() != cells.len() || !group.is_disjoint(&occupied) {
                println!("Error: position already taken by another ship");
                continue;
            }
            occupied |= group;
            groups.push(cells);
            break;
        }
    }
    let fleet = Fleet::from_groups([
        groups[0].as_slice(),
        groups[1].as_slice(),
        groups[2].as_slice(),
    ])?;
    Ok(fleet)
}

fn describe(code: ResponseCode) -> String {
    format!("{} ({})", code.token(), code.message())
}

/// Fire until victory, `q`, or end of input. With `auto` set, targets are
/// chosen at random instead of read from the terminal.
pub async fn run_attack_loop<A: DefenseApi>(
    session: &mut AttackSession<A>,
    mut auto: Option<SmallRng>,
) -> anyhow::Result<()> {
    while !session.is_won() {
        let result = if let Some(rng) = auto.as_mut() {
            session.fire_random(rng).await
        } else {
            println!("\n{}", render_attack_board(&session.tracker()));
            print!("{}", render_stats(&session.tracker().stats()));
            let Some(line) = prompt("\nAttack coordinate (e.g. B2) or 'q' to quit: ")? else {
                break;
            };
            if line.eq_ignore_ascii_case("q") {
                println!("Leaving the game...");
                break;
            }
            session.fire(&line).await
        };
        match result {
            Ok((pos, code)) => println!("{} -> {}", pos, describe(code)),
            // Autoplay cannot correct itself, so any failure ends it.
            Err(e) if auto.is_some() => return Err(e.into()),
            Err(SessionError::Transport(e)) => println!("Connection error: {}", e),
            Err(e) => println!("Error: {}", e),
        }
    }
    if session.is_won() {
        println!("\n==================================================");
        println!("VICTORY! The whole enemy fleet has been destroyed.");
        println!("==================================================");
        println!("{}", render_attack_board(&session.tracker()));
        print!("{}", render_stats(&session.tracker().stats()));
        println!(
            "\nGame completed in {} attacks",
            session.tracker().total_attacks()
        );
    }
    Ok(())
}
