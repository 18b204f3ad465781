//! Preview synchronization: local hover intents out, peer echoes in.
//!
//! Every hover change on the local player's turn is sent immediately — no
//! batching — so all clients render the same overlay. Switching between
//! piece and bite previews clears the old overlay class (locally and via a
//! `clear` intent) before the new one is drawn, so a stale highlight never
//! lingers under the new kind.

#[cfg(test)]
#[path = "session_preview_test.rs"]
mod session_preview_test;

use tracing::debug;

use protocol::{
    BoardInfoPreview, BoardUpdatePreview, ClientMessage, PreviewInfoAction,
};

use crate::piece::{Bite, PieceMask, WrapRule};
use crate::surface::{Overlay, RenderSurface};

use super::{DispatchError, PreviewKind, Session};

impl Session {
    /// The pointer moved over board cell `index`. Out-of-turn hovers are
    /// observably ignored.
    pub fn hover<S: RenderSurface>(&mut self, index: usize, surface: &mut S) {
        if !self.is_my_turn() {
            debug!(index, "ignoring hover out of turn");
            return;
        }
        self.turn.set_last_hover(Some(index));
        self.show_preview(surface);
    }

    /// The pointer left the board or the gesture was cancelled: retract the
    /// local overlay and tell peers.
    pub fn pointer_left<S: RenderSurface>(&mut self, surface: &mut S) {
        if !self.is_my_turn() {
            return;
        }
        self.turn.set_last_hover(None);
        surface.clear_hover_overlays();
        self.push_preview_clear();
    }

    /// Draw the local hover overlay at the remembered index and queue the
    /// matching intent for peers.
    pub(crate) fn show_preview<S: RenderSurface>(&mut self, surface: &mut S) {
        let Some(index) = self.turn.last_hover() else {
            return;
        };

        let kind = if self.turn.bite() == Bite::None {
            PreviewKind::Piece
        } else {
            PreviewKind::Bite
        };
        if kind != self.last_preview_kind {
            // Clear the old highlight class before the new kind paints, or
            // the stale overlay would survive underneath it.
            surface.clear_hover_overlays();
            self.push_preview_clear();
        }
        self.last_preview_kind = kind;

        match self.turn.bite().mask() {
            Some(mask) => {
                let covered = self.covered(index, mask, WrapRule::Preview);
                surface.set_hover_overlay(Overlay::BiteLocal, &covered);
                self.push(ClientMessage::BoardUpdatePreview(BoardUpdatePreview::bite(
                    index, mask.0,
                )));
            }
            None => {
                let Some(mask) = self.current_mask() else {
                    return;
                };
                let covered = self.covered(index, mask, WrapRule::Preview);
                surface.set_hover_overlay(Overlay::PieceLocal, &covered);
                self.push(ClientMessage::BoardUpdatePreview(BoardUpdatePreview::piece(
                    index, mask.0,
                )));
            }
        }
    }

    pub(crate) fn push_preview_clear(&mut self) {
        self.push(ClientMessage::BoardUpdatePreview(BoardUpdatePreview::clear()));
    }

    /// Apply a peer's preview/placement echo.
    pub(crate) fn handle_board_preview<S: RenderSurface>(
        &mut self,
        preview: &BoardInfoPreview,
        surface: &mut S,
    ) -> Result<(), DispatchError> {
        preview.validate()?;

        // Validation guarantees index/mask for the positioned actions.
        let index = preview.index.unwrap_or_default();
        let mask = PieceMask(preview.mask.unwrap_or_default());

        match preview.action {
            PreviewInfoAction::PreviewPiece => {
                let covered = self.covered(index, mask, WrapRule::Preview);
                surface.set_hover_overlay(Overlay::PieceRemote, &covered);
            }
            PreviewInfoAction::PreviewBite => {
                let covered = self.covered(index, mask, WrapRule::Preview);
                surface.set_hover_overlay(Overlay::BiteRemote, &covered);
            }
            PreviewInfoAction::PlacePiece => {
                let covered = self.covered(index, mask, WrapRule::Placed);
                let owner = preview.owner.unwrap_or_default();
                surface.paint_owner(&covered, owner);
            }
            PreviewInfoAction::PlaceBite => {
                let covered = self.covered(index, mask, WrapRule::Placed);
                surface.strip_owner(&covered);
            }
            PreviewInfoAction::Clear => {
                surface.clear_hover_overlays();
            }
        }

        // A piece echo with a new mask means the player on turn rotated;
        // keep the next-piece panel in sync with what peers actually see.
        let is_piece_echo = matches!(
            preview.action,
            PreviewInfoAction::PreviewPiece | PreviewInfoAction::PlacePiece
        );
        if is_piece_echo && self.shown_preview_mask != Some(mask) {
            if let Some(turn) = self.turn.current_turn() {
                surface.set_next_piece(turn, mask);
                self.shown_preview_mask = Some(mask);
            }
        }

        Ok(())
    }
}
