//! Inbound handlers for game, player, and button frames.

#[cfg(test)]
#[path = "session_game_test.rs"]
mod session_game_test;

use protocol::{ButtonId, ButtonUpdate, GameInfo, PlayerInfo};

use crate::piece::{Bite, PieceMask};
use crate::surface::RenderSurface;

use super::{DispatchError, Session};

impl Session {
    /// Apply an authoritative game snapshot.
    ///
    /// Order matters: currencies first (button gating reads them), then the
    /// board, then the turn. The rotation/bite reset hides inside
    /// `TurnState::observe_turn` and fires only on an actual turn change —
    /// an echo with the same turn value must not clobber selections made
    /// since the previous snapshot.
    pub(crate) fn handle_game_info<S: RenderSurface>(
        &mut self,
        info: &GameInfo,
        surface: &mut S,
    ) -> Result<(), DispatchError> {
        info.validate()?;

        self.roster
            .apply_game_tables(&info.scores, &info.bites, &info.rerolls);
        surface.set_scores(&info.scores);
        surface.set_bites(&info.bites);
        surface.set_rerolls(&info.rerolls);

        self.game_over = info.game_over;
        if info.game_over {
            surface.clear_messages();
            self.turn.reset_bite();
            let winner = self.roster.leader_name(&info.scores).unwrap_or("nobody");
            surface.set_game_over(Some(winner));
        } else {
            surface.set_game_over(None);
        }

        // Rebuild the grid structure only when dimensions actually change;
        // a rebuild would discard in-flight animation cells.
        if self.board.apply_snapshot(&info.board) {
            surface.rebuild_grid(self.board.cols(), self.board.rows());
        }

        // Either the staggered reveal or the full repaint — never both. The
        // queue's per-cell updates imply the repaint.
        match info.board_updates_to_animate.as_deref() {
            Some(indices) if !indices.is_empty() => {
                self.animations.start(indices.iter().copied());
            }
            _ => {
                self.animations.cancel();
                for (index, paint) in self.board.paints() {
                    surface.paint_cell(index, paint);
                }
            }
        }

        self.next_piece = info.next_piece.masks.iter().map(|&m| PieceMask(m)).collect();

        if self.turn.observe_turn(info.turn) && self.turn.last_hover().is_some() {
            // Our hover is now stale; retract it locally and for peers.
            self.turn.set_last_hover(None);
            surface.clear_hover_overlays();
            self.push_preview_clear();
        }

        let my_turn = self.is_my_turn();
        let bites = self.roster.local_bites();
        let rerolls = self.roster.local_rerolls();
        surface.set_button_enabled(ButtonId::RotatePiece, my_turn);
        surface.set_button_enabled(ButtonId::SkipTurn, my_turn);
        surface.set_button_enabled(ButtonId::SmallBite, my_turn && bites >= Bite::Small.cost());
        surface.set_button_enabled(ButtonId::LargeBite, my_turn && bites >= Bite::Large.cost());
        surface.set_button_enabled(ButtonId::Reroll, my_turn && rerolls >= 1);

        self.project_bite_selection(surface);
        surface.set_turn_indicator(self.turn.current_turn());
        self.refresh_next_piece_panel(surface);

        Ok(())
    }

    /// Apply roster identity and lifetime records.
    pub(crate) fn handle_player_info<S: RenderSurface>(
        &mut self,
        info: &PlayerInfo,
        surface: &mut S,
    ) -> Result<(), DispatchError> {
        info.validate()?;
        self.roster.apply_player_info(info);
        surface.set_players(self.roster.players());
        Ok(())
    }

    /// Mirror a peer's control state. Ignored wholesale on our own turn —
    /// the server echoes our own updates back and they must not fight the
    /// local selection.
    pub(crate) fn handle_button_info<S: RenderSurface>(
        &mut self,
        update: &ButtonUpdate,
        surface: &mut S,
    ) {
        if self.is_my_turn() {
            return;
        }

        if let Some(inactive) = &update.inactive {
            for &id in inactive {
                surface.set_button_active(id, false);
            }
        }
        if let Some(active) = &update.active {
            for &id in active {
                surface.set_button_active(id, true);
            }
        }
        if let Some(notify) = &update.notify {
            for &id in notify {
                surface.pulse_button(id);
            }
        }
    }

    /// Project the bite selection onto the bite buttons and cost preview.
    pub(crate) fn project_bite_selection<S: RenderSurface>(&mut self, surface: &mut S) {
        let bite = self.turn.bite();
        surface.set_button_active(ButtonId::SmallBite, bite == Bite::Small);
        surface.set_button_active(ButtonId::LargeBite, bite == Bite::Large);
        surface.set_bite_cost(bite.cost(), bite.cost() <= self.roster.local_bites());
    }
}
