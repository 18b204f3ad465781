//! Line-oriented terminal render surface.
//!
//! Cells print like the server's debug dump: owner digit (or `.`), a
//! marker letter (H home, B bonus bite, R bonus reroll), and a hover tick
//! (`+` local, `^` remote). The full board prints once per authoritative
//! snapshot; everything else is a status line.

use std::collections::HashMap;

use client::board::{CellMarker, CellPaint};
use client::piece::PieceMask;
use client::roster::Player;
use client::surface::{Overlay, RenderSurface};
use protocol::ButtonId;

#[derive(Clone, Copy, Default)]
struct CellView {
    paint: CellPaint,
    local_hover: bool,
    remote_hover: bool,
}

/// Render surface printing to stdout.
#[derive(Default)]
pub struct TermSurface {
    cols: usize,
    rows: usize,
    cells: Vec<CellView>,
    scores: Vec<i64>,
    bites: Vec<i64>,
    rerolls: Vec<i64>,
    buttons: HashMap<ButtonId, (bool, bool)>,
}

impl TermSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn print_board(&self) {
        let mut out = String::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                let view = self.cells[r * self.cols + c];
                let mut cell = String::new();
                if view.paint.owner == 0 {
                    cell.push('.');
                } else {
                    cell.push(char::from_digit(u32::from(view.paint.owner) % 10, 10).unwrap_or('?'));
                }
                match view.paint.marker {
                    CellMarker::Home => cell.push('H'),
                    CellMarker::BonusBite => cell.push('B'),
                    CellMarker::BonusReroll => cell.push('R'),
                    CellMarker::None => {}
                }
                if view.local_hover {
                    cell.push('+');
                } else if view.remote_hover {
                    cell.push('^');
                }
                out.push_str(&format!("{cell:<4}"));
            }
            out.push('\n');
        }
        println!("{out}");
        println!(
            "scores: {:?}  bites: {:?}  rerolls: {:?}",
            self.scores, self.bites, self.rerolls
        );
        let controls: Vec<String> = [
            (ButtonId::RotatePiece, "rotate"),
            (ButtonId::SkipTurn, "skip"),
            (ButtonId::SmallBite, "small"),
            (ButtonId::LargeBite, "large"),
            (ButtonId::Reroll, "reroll"),
        ]
        .iter()
        .map(|(id, label)| {
            let (enabled, active) = self.buttons.get(id).copied().unwrap_or((false, false));
            let mark = if active { "*" } else { "" };
            if enabled {
                format!("{label}{mark}")
            } else {
                format!("({label}{mark})")
            }
        })
        .collect();
        println!("controls: {}", controls.join(" "));
    }

    fn set_overlay_cells(&mut self, local: bool, indices: &[usize]) {
        for view in &mut self.cells {
            if local {
                view.local_hover = false;
            } else {
                view.remote_hover = false;
            }
        }
        for &index in indices {
            if let Some(view) = self.cells.get_mut(index) {
                if local {
                    view.local_hover = true;
                } else {
                    view.remote_hover = true;
                }
            }
        }
    }
}

impl RenderSurface for TermSurface {
    fn rebuild_grid(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![CellView::default(); cols * rows];
        println!("board is now {cols}x{rows}");
    }

    fn paint_cell(&mut self, index: usize, paint: CellPaint) {
        if let Some(view) = self.cells.get_mut(index) {
            view.paint = paint;
        }
    }

    fn set_hover_overlay(&mut self, overlay: Overlay, indices: &[usize]) {
        let local = matches!(overlay, Overlay::PieceLocal | Overlay::BiteLocal);
        self.set_overlay_cells(local, indices);
    }

    fn clear_hover_overlays(&mut self) {
        for view in &mut self.cells {
            view.local_hover = false;
            view.remote_hover = false;
        }
    }

    fn paint_owner(&mut self, indices: &[usize], owner: u8) {
        for &index in indices {
            if let Some(view) = self.cells.get_mut(index) {
                view.paint.owner = owner;
            }
        }
    }

    fn strip_owner(&mut self, indices: &[usize]) {
        for &index in indices {
            if let Some(view) = self.cells.get_mut(index) {
                view.paint.owner = 0;
            }
        }
    }

    fn set_players(&mut self, players: &[Player]) {
        for (i, player) in players.iter().enumerate() {
            println!(
                "player {} is {} ({}) {}W/{}L/{}D",
                i + 1,
                player.name,
                player.color,
                player.record.wins,
                player.record.losses,
                player.record.draws
            );
        }
    }

    fn set_scores(&mut self, scores: &[i64]) {
        self.scores = scores.to_vec();
    }

    fn set_bites(&mut self, bites: &[i64]) {
        self.bites = bites.to_vec();
    }

    fn set_rerolls(&mut self, rerolls: &[i64]) {
        self.rerolls = rerolls.to_vec();
    }

    fn set_turn_indicator(&mut self, turn: Option<usize>) {
        // The turn indicator lands last in a snapshot, so this is the one
        // spot that prints the whole board.
        self.print_board();
        if let Some(turn) = turn {
            println!("turn: player {}", turn + 1);
        }
    }

    fn set_next_piece(&mut self, turn: usize, mask: PieceMask) {
        println!("next piece for player {}:\n{mask}", turn + 1);
    }

    fn set_game_over(&mut self, winner: Option<&str>) {
        if let Some(winner) = winner {
            println!("=== {winner} wins! ===");
        }
    }

    fn set_button_enabled(&mut self, id: ButtonId, enabled: bool) {
        self.buttons.entry(id).or_insert((false, false)).0 = enabled;
    }

    fn set_button_active(&mut self, id: ButtonId, active: bool) {
        self.buttons.entry(id).or_insert((false, false)).1 = active;
    }

    fn pulse_button(&mut self, id: ButtonId) {
        println!("« {id:?} »");
    }

    fn set_bite_cost(&mut self, cost: i64, affordable: bool) {
        if cost > 0 {
            let note = if affordable { "" } else { " - cannot afford!" };
            println!("bite cost: {cost}{note}");
        }
    }

    fn show_error(&mut self, message: &str) {
        println!("error: {message}");
    }

    fn show_warning(&mut self, message: &str) {
        println!("warning: {message}");
    }

    fn show_idle_warning(&mut self, message: &str) {
        println!("warning: {message}");
    }

    fn clear_idle_warning(&mut self) {}

    fn offer_reconnect(&mut self) {
        println!("press Enter to reconnect, or type 'quit'");
    }

    fn clear_messages(&mut self) {}
}
