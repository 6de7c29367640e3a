#![cfg(feature = "std")]

//! ASCII renderers for the terminal front ends.

use std::fmt::Write;

use crate::core::{
    AttackStats, AttackTracker, DefenseStatus, Symbol, COL_LABELS, GRID_SIZE, ROW_LABELS,
};

fn render_grid(title: &str, grid: &[[Symbol; GRID_SIZE]; GRID_SIZE]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    out.push_str("     ");
    for c in COL_LABELS {
        let _ = write!(out, "{} ", c);
    }
    out.push('\n');
    out.push_str("   ┌───────────┐\n");
    for (r, row) in grid.iter().enumerate() {
        let _ = write!(out, " {} │ ", ROW_LABELS[r]);
        for cell in row {
            let _ = write!(out, "{} ", cell.glyph());
        }
        out.push_str("│\n");
    }
    out.push_str("   └───────────┘\n");
    out.push_str("Legend: ~ = not attacked, O = miss, X = hit, # = sunk\n");
    out
}

/// The defender's view: grid, state and per-ship damage.
pub fn render_defense(status: &DefenseStatus) -> String {
    let mut out = render_grid(
        &format!("Fleet status (game {:?}): {}", status.game_id, status.state),
        &status.grid,
    );
    for ship in &status.ships {
        let cells: Vec<String> = ship.positions.iter().map(ToString::to_string).collect();
        let condition = if ship.is_sunk {
            "SUNK".to_string()
        } else {
            format!("afloat ({}/{} hits)", ship.hit_count, ship.total_positions)
        };
        let _ = writeln!(out, "  {:<10} {:<9} {}", ship.name, cells.join(" "), condition);
    }
    let _ = writeln!(out, "Attacks received: {}", status.total_attacks);
    out
}

/// The attacker's board of everything fired so far.
pub fn render_attack_board(tracker: &AttackTracker) -> String {
    render_grid("Attack board 5x5:", tracker.overlay())
}

pub fn render_stats(stats: &AttackStats) -> String {
    let mut out = String::from("Statistics:\n");
    let _ = writeln!(out, "  Total attacks: {}", stats.total_attacks);
    let _ = writeln!(out, "  Hits:          {}", stats.hits);
    let _ = writeln!(out, "  Misses:        {}", stats.misses);
    let _ = writeln!(out, "  Ships sunk:    {}", stats.sunk_ships);
    if stats.total_attacks > 0 {
        let _ = writeln!(out, "  Accuracy:      {:.1}%", stats.accuracy * 100.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, ResponseCode};

    #[test]
    fn attack_board_shows_recorded_symbols() {
        let mut tracker = AttackTracker::new();
        tracker.record(Position::parse("A1").unwrap(), ResponseCode::Failed);
        tracker.record(Position::parse("B2").unwrap(), ResponseCode::Shocked);
        let board = render_attack_board(&tracker);
        assert!(board.contains(" A │ O ~ ~ ~ ~ │"));
        assert!(board.contains(" B │ ~ X ~ ~ ~ │"));
    }

    #[test]
    fn stats_hide_accuracy_before_first_attack() {
        let text = render_stats(&AttackTracker::new().stats());
        assert!(!text.contains("Accuracy"));
    }
}
