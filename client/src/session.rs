//! Game session: the one owner of all client-side game state.
//!
//! DESIGN
//! ======
//! Every mutation funnels through this struct, either from an inbound
//! server frame ([`Session::handle_frame`]) or from a locally-originated
//! user intent (the methods in `session_input`/`session_preview`). Handlers
//! run to completion on the caller's task; there is no other writer.
//!
//! Handlers paint the render surface synchronously but never send —
//! outbound messages accumulate in a queue the runtime flushes after the
//! handler returns. That ordering (paint first, send after) is what
//! guarantees a local notify pulse starts rendering before the
//! corresponding network call goes out.
//!
//! Inbound validation is all-or-nothing: a frame that fails its payload
//! validation mutates nothing. Unknown message types are logged and
//! dropped, never fatal.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

#[path = "session_game.rs"]
mod session_game;
#[path = "session_input.rs"]
mod session_input;
#[path = "session_preview.rs"]
mod session_preview;

pub use session_input::{Direction, Intent};

use std::collections::VecDeque;

use tracing::warn;

use protocol::{ClientMessage, CodecError, InvalidPayload, ServerMessage};

use crate::animate::AnimationQueue;
use crate::board::BoardModel;
use crate::piece::{Bite, PieceMask, WrapRule, overlay_indices};
use crate::roster::Roster;
use crate::surface::RenderSurface;
use crate::turn::TurnState;

/// Which highlight family the current local hover uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PreviewKind {
    #[default]
    Piece,
    Bite,
}

/// Why handling one inbound frame failed. Never fatal to the connection:
/// the runtime surfaces it and keeps reading.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Payload(#[from] InvalidPayload),
}

/// All client-side game state plus the outbound message queue.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) board: BoardModel,
    pub(crate) turn: TurnState,
    pub(crate) roster: Roster,
    pub(crate) animations: AnimationQueue,
    /// Rotation masks of the piece to place, from the last snapshot.
    pub(crate) next_piece: Vec<PieceMask>,
    /// Mask currently shown in the next-piece panel, so remote rotation
    /// echoes only repaint it when it actually differs.
    pub(crate) shown_preview_mask: Option<PieceMask>,
    pub(crate) last_preview_kind: PreviewKind,
    pub(crate) game_over: bool,
    outbound: VecDeque<ClientMessage>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one inbound frame to its handler.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the frame is malformed or fails
    /// payload validation; no state has been applied in that case. Unknown
    /// message types are logged and dropped without error.
    pub fn handle_frame<S: RenderSurface>(
        &mut self,
        text: &str,
        surface: &mut S,
    ) -> Result<(), DispatchError> {
        let message = match protocol::decode_server(text) {
            Ok(message) => message,
            Err(CodecError::UnknownType(kind)) => {
                warn!(%kind, "dropping unknown message type");
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        match message {
            ServerMessage::Ping => {
                self.push(ClientMessage::Pong);
                Ok(())
            }
            ServerMessage::GameInfo(info) => self.handle_game_info(&info, surface),
            ServerMessage::PlayerInfo(info) => self.handle_player_info(&info, surface),
            ServerMessage::ButtonInfo(update) => {
                self.handle_button_info(&update, surface);
                Ok(())
            }
            ServerMessage::BoardInfoPreview(preview) => {
                self.handle_board_preview(&preview, surface)
            }
            ServerMessage::Error { message } => {
                warn!(%message, "server reported an error");
                surface.show_error(&message);
                Ok(())
            }
        }
    }

    /// Messages queued by the last handled frame or intent, in send order.
    pub fn take_outbound(&mut self) -> Vec<ClientMessage> {
        self.outbound.drain(..).collect()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    /// Reveal the next animated cell. Returns true while steps remain.
    pub fn animation_step<S: RenderSurface>(&mut self, surface: &mut S) -> bool {
        self.animations.step(&self.board, surface)
    }

    #[must_use]
    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.turn.is_my_turn(self.roster.local_index())
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// The rotation mask currently selected for placement.
    #[must_use]
    pub fn current_mask(&self) -> Option<PieceMask> {
        self.next_piece.get(self.turn.rotation()).copied()
    }

    #[must_use]
    pub fn selected_bite(&self) -> Bite {
        self.turn.bite()
    }

    pub(crate) fn push(&mut self, message: ClientMessage) {
        self.outbound.push_back(message);
    }

    /// Board cells covered by `mask` anchored at `index`, wrap-checked.
    pub(crate) fn covered(&self, index: usize, mask: PieceMask, rule: WrapRule) -> Vec<usize> {
        overlay_indices(mask, index, self.board.cols(), self.board.cell_count(), rule)
    }

    /// Repaint the next-piece panel from the locally selected rotation.
    pub(crate) fn refresh_next_piece_panel<S: RenderSurface>(&mut self, surface: &mut S) {
        let Some(turn) = self.turn.current_turn() else {
            return;
        };
        let Some(mask) = self.current_mask() else {
            return;
        };
        surface.set_next_piece(turn, mask);
        self.shown_preview_mask = Some(mask);
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
