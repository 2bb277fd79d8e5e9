#![cfg(feature = "std")]

use std::fmt::Write;
use std::string::String;

use crate::{
    board::Board,
    game::{BattleEngine, Side},
    sim::BattleResult,
};

fn column_label(x: usize) -> char {
    if x < 26 {
        (b'A' + x as u8) as char
    } else {
        '?'
    }
}

/// Render a board as text. `X` is a hit, `o` a miss, `S` an intact ship cell
/// (only when `reveal` is set) and `.` open water.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("   ");
    for x in 0..board.width() {
        let _ = write!(out, " {}", column_label(x));
    }
    out.push('\n');
    for y in 0..board.height() {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..board.width() {
            let pos = crate::ship::Position::new(x, y);
            let ch = match (board.is_shot(pos), board.ship_at(pos)) {
                (true, Some(_)) => 'X',
                (true, None) => 'o',
                (false, Some(_)) if reveal => 'S',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Both boards of a battle, player first.
pub fn render_battle(engine: &BattleEngine, reveal: bool) -> String {
    let mut out = String::new();
    for side in [Side::Player, Side::Enemy] {
        let board = engine.board(side);
        let _ = writeln!(
            out,
            "{} fleet ({} of {} ships afloat):",
            side.name(),
            board.ships_remaining(),
            board.ships().len()
        );
        out.push_str(&render_board(board, reveal));
        out.push('\n');
    }
    out
}

/// One-paragraph summary of a battle result.
pub fn render_summary(result: &BattleResult) -> String {
    let winner = match result.winner {
        Some(side) => side.name(),
        None => "none",
    };
    let mut out = String::new();
    let _ = writeln!(out, "winner:  {}", winner);
    let _ = writeln!(out, "turns:   {}", result.total_turns);
    let _ = writeln!(
        out,
        "player:  {} shots, {} hits",
        result.player_shots, result.player_hits
    );
    let _ = writeln!(
        out,
        "enemy:   {} shots, {} hits",
        result.enemy_shots, result.enemy_hits
    );
    out
}
