//! Locally-originated user intents.
//!
//! Turn and affordability checks here are advisory only — the server is the
//! authority and rejects anything it disagrees with. A failed advisory gate
//! is a logged no-op, never an error and never queued for later.

#[cfg(test)]
#[path = "session_input_test.rs"]
mod session_input_test;

use tracing::{debug, warn};

use protocol::{
    BoardAction, BoardUpdate, ButtonId, ButtonUpdate, ClientMessage, GameAction,
};

use crate::piece::{Bite, WrapRule};
use crate::surface::RenderSurface;

use super::Session;

/// Keyboard navigation of the hover position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A user intent as delivered by a front end. One enum so front ends can
/// feed the runtime over a channel without borrowing the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Hover(usize),
    PointerLeft,
    MovePreview(Direction),
    Commit(usize),
    CommitAtHover,
    RotatePiece,
    CycleBite,
    ToggleBite(Bite),
    Reroll,
    SkipTurn,
    ResetGame,
    ForfeitGame,
}

impl Session {
    /// Route one user intent to its handler.
    pub fn apply_intent<S: RenderSurface>(&mut self, intent: Intent, surface: &mut S) {
        match intent {
            Intent::Hover(index) => self.hover(index, surface),
            Intent::PointerLeft => self.pointer_left(surface),
            Intent::MovePreview(direction) => self.move_preview(direction, surface),
            Intent::Commit(index) => self.commit(index, surface),
            Intent::CommitAtHover => self.commit_at_hover(surface),
            Intent::RotatePiece => self.rotate_piece(surface),
            Intent::CycleBite => self.cycle_bite_selection(surface),
            Intent::ToggleBite(kind) => self.toggle_bite_selection(kind, surface),
            Intent::Reroll => self.reroll(surface),
            Intent::SkipTurn => self.skip_turn(surface),
            Intent::ResetGame => self.reset_game(surface),
            Intent::ForfeitGame => self.forfeit_game(surface),
        }
    }

    /// Select the next rotation of the current piece, update the local
    /// preview, and notify peers. Out of turn this is a logged no-op.
    pub fn rotate_piece<S: RenderSurface>(&mut self, surface: &mut S) {
        if !self.is_my_turn() {
            debug!("ignoring rotation out of turn");
            return;
        }
        self.turn.advance_rotation(self.next_piece.len());
        self.refresh_next_piece_panel(surface);
        self.show_preview(surface);

        surface.pulse_button(ButtonId::RotatePiece);
        self.push(ClientMessage::ButtonUpdate(ButtonUpdate::notify_one(
            ButtonId::RotatePiece,
        )));
    }

    /// Cycle the bite selection none → small → large → none, skipping
    /// unaffordable kinds, then redraw the hover for the new kind.
    pub fn cycle_bite_selection<S: RenderSurface>(&mut self, surface: &mut S) {
        if !self.is_my_turn() {
            debug!("ignoring bite cycle out of turn");
            return;
        }
        self.turn.cycle_bite(self.roster.local_bites());
        surface.clear_hover_overlays();
        self.show_preview(surface);
        self.project_bite_selection(surface);
        self.push_button_state();
    }

    /// Select `kind`, or deselect it when already active.
    pub fn toggle_bite_selection<S: RenderSurface>(&mut self, kind: Bite, surface: &mut S) {
        if !self.is_my_turn() {
            debug!(?kind, "ignoring bite toggle out of turn");
            return;
        }
        self.turn.toggle_bite(kind, self.roster.local_bites());
        self.project_bite_selection(surface);
        self.push_button_state();
    }

    /// Commit the current selection (piece or bite) at board cell `index`.
    /// The local board is painted optimistically; the server's snapshot is
    /// what makes it real.
    pub fn commit<S: RenderSurface>(&mut self, index: usize, surface: &mut S) {
        surface.clear_messages();

        match self.turn.bite().mask() {
            None => {
                let Some(mask) = self.current_mask() else {
                    warn!("no piece to place yet");
                    return;
                };
                if mask.is_empty() {
                    warn!("refusing to place an empty mask");
                    return;
                }
                let covered = self.covered(index, mask, WrapRule::Placed);
                let owner = self.roster.local_player_number().unwrap_or_default();
                surface.paint_owner(&covered, owner);
                self.push(ClientMessage::BoardUpdate(BoardUpdate {
                    action: BoardAction::PlacePiece,
                    index,
                    mask: mask.0,
                }));
            }
            Some(mask) => {
                let covered = self.covered(index, mask, WrapRule::Placed);
                surface.strip_owner(&covered);
                self.push(ClientMessage::BoardUpdate(BoardUpdate {
                    action: BoardAction::PlaceBite,
                    index,
                    mask: mask.0,
                }));
                // Bites retract their own preview once committed; the next
                // piece preview replaces a piece commit's overlay anyway.
                self.push_preview_clear();
                surface.set_bite_cost(0, true);
            }
        }
    }

    /// Commit at the remembered hover position (keyboard Enter).
    pub fn commit_at_hover<S: RenderSurface>(&mut self, surface: &mut S) {
        if !self.is_my_turn() {
            return;
        }
        match self.turn.last_hover() {
            Some(index) => {
                self.commit(index, surface);
            }
            None => surface.show_warning("Could not place piece. No piece selected."),
        }
    }

    /// Move the hover one cell, clamped at the board edges. With no hover
    /// yet, start from the board center.
    pub fn move_preview<S: RenderSurface>(&mut self, direction: Direction, surface: &mut S) {
        if !self.is_my_turn() {
            return;
        }
        let cols = self.board.cols();
        let cell_count = self.board.cell_count();
        if cols == 0 {
            return;
        }

        let index = match self.turn.last_hover() {
            None => self.board.center_index(),
            Some(last) => match direction {
                Direction::Up if last >= cols => last - cols,
                Direction::Down if last < cell_count - cols => last + cols,
                Direction::Left if last % cols != 0 => last - 1,
                Direction::Right if last % cols != cols - 1 => last + 1,
                _ => last,
            },
        };
        self.turn.set_last_hover(Some(index));
        self.show_preview(surface);
    }

    /// Skip the rest of the turn. The button pulse is painted before the
    /// message is queued, so the pulse starts rendering before the send.
    pub fn skip_turn<S: RenderSurface>(&mut self, surface: &mut S) {
        if !self.is_my_turn() {
            debug!("ignoring skip out of turn");
            return;
        }
        surface.pulse_button(ButtonId::SkipTurn);
        self.push(ClientMessage::ButtonUpdate(ButtonUpdate::notify_one(
            ButtonId::SkipTurn,
        )));
        self.push(ClientMessage::GameUpdate { action: GameAction::SkipTurn });
    }

    /// Exchange a reroll for a fresh piece.
    pub fn reroll<S: RenderSurface>(&mut self, surface: &mut S) {
        if !self.is_my_turn() {
            debug!("ignoring reroll out of turn");
            return;
        }
        if self.roster.local_rerolls() < 1 {
            debug!("ignoring reroll without reroll currency");
            return;
        }
        surface.pulse_button(ButtonId::Reroll);
        self.push(ClientMessage::ButtonUpdate(ButtonUpdate::notify_one(
            ButtonId::Reroll,
        )));
        self.push(ClientMessage::GameUpdate { action: GameAction::Reroll });
    }

    /// Ask the server to start a fresh game on the same board settings.
    pub fn reset_game<S: RenderSurface>(&mut self, surface: &mut S) {
        surface.clear_messages();
        self.turn.reset_bite();
        self.push(ClientMessage::GameUpdate { action: GameAction::ResetGame });
    }

    /// Concede the game.
    pub fn forfeit_game<S: RenderSurface>(&mut self, surface: &mut S) {
        surface.clear_messages();
        self.push(ClientMessage::GameUpdate { action: GameAction::ForfeitGame });
    }

    /// Report our control state so peers can mirror it.
    fn push_button_state(&mut self) {
        let bite = self.turn.bite();
        let mut active = Vec::new();
        let mut inactive = Vec::new();
        for (id, selected) in [
            (ButtonId::SmallBite, bite == Bite::Small),
            (ButtonId::LargeBite, bite == Bite::Large),
        ] {
            if selected {
                active.push(id);
            } else {
                inactive.push(id);
            }
        }
        self.push(ClientMessage::ButtonUpdate(ButtonUpdate {
            active: Some(active),
            inactive: Some(inactive),
            notify: None,
        }));
    }
}
