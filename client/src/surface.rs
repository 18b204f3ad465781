//! The render surface: a write-only projection of session state.
//!
//! DESIGN
//! ======
//! The session owns all canonical state and paints it outward through this
//! trait; it never reads anything back. Front ends implement it over
//! whatever they draw with (the CLI renders a text grid), and tests use
//! [`RecordingSurface`] to assert on the exact sequence of paint calls.

use protocol::ButtonId;

use crate::board::CellPaint;
use crate::piece::PieceMask;
use crate::roster::Player;

/// Hover overlay classes. Local and remote hovers are distinct so a peer's
/// hover never masquerades as your own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    PieceLocal,
    BiteLocal,
    PieceRemote,
    BiteRemote,
}

/// Sink for everything the session wants on screen.
pub trait RenderSurface {
    /// Rebuild the cell grid structure. Only called when board dimensions
    /// change; repaints of an unchanged grid go through [`Self::paint_cell`]
    /// so in-flight animations survive.
    fn rebuild_grid(&mut self, cols: usize, rows: usize);

    /// Draw one committed cell.
    fn paint_cell(&mut self, index: usize, paint: CellPaint);

    /// Show `overlay` on exactly `indices`: cells outside the list lose this
    /// overlay class, other overlay classes are untouched.
    fn set_hover_overlay(&mut self, overlay: Overlay, indices: &[usize]);

    /// Remove every hover overlay class from every cell.
    fn clear_hover_overlays(&mut self);

    /// Optimistic placement echo: paint `indices` in `owner`'s color,
    /// replacing any previous cell class.
    fn paint_owner(&mut self, indices: &[usize], owner: u8);

    /// Optimistic bite echo: remove ownership coloring from `indices`.
    fn strip_owner(&mut self, indices: &[usize]);

    /// Roster display data: names, colors, lifetime records.
    fn set_players(&mut self, players: &[Player]);

    fn set_scores(&mut self, scores: &[i64]);

    fn set_bites(&mut self, bites: &[i64]);

    fn set_rerolls(&mut self, rerolls: &[i64]);

    /// Highlight whose turn it is; `None` unselects all.
    fn set_turn_indicator(&mut self, turn: Option<usize>);

    /// Show the piece the player on turn must place next.
    fn set_next_piece(&mut self, turn: usize, mask: PieceMask);

    /// Show or clear the end-of-game banner.
    fn set_game_over(&mut self, winner: Option<&str>);

    fn set_button_enabled(&mut self, id: ButtonId, enabled: bool);

    fn set_button_active(&mut self, id: ButtonId, active: bool);

    /// Short visual pulse on a control, mirrored to peers via
    /// `button_update` notifications.
    fn pulse_button(&mut self, id: ButtonId);

    /// Cost of the selected bite next to the player's bite balance.
    fn set_bite_cost(&mut self, cost: i64, affordable: bool);

    fn show_error(&mut self, message: &str);

    fn show_warning(&mut self, message: &str);

    fn show_idle_warning(&mut self, message: &str);

    fn clear_idle_warning(&mut self);

    /// Present the manual reconnect affordance.
    fn offer_reconnect(&mut self);

    /// Clear error, idle warning, and reconnect areas.
    fn clear_messages(&mut self);
}

// =============================================================================
// RECORDING SURFACE (tests)
// =============================================================================

#[cfg(test)]
pub use recording::{RecordingSurface, SurfaceOp};

#[cfg(test)]
mod recording {
    use super::*;

    /// One recorded [`RenderSurface`] call.
    #[derive(Clone, Debug, PartialEq)]
    pub enum SurfaceOp {
        RebuildGrid { cols: usize, rows: usize },
        PaintCell { index: usize, paint: CellPaint },
        SetHoverOverlay { overlay: Overlay, indices: Vec<usize> },
        ClearHoverOverlays,
        PaintOwner { indices: Vec<usize>, owner: u8 },
        StripOwner { indices: Vec<usize> },
        SetPlayers { names: Vec<String> },
        SetScores(Vec<i64>),
        SetBites(Vec<i64>),
        SetRerolls(Vec<i64>),
        SetTurnIndicator(Option<usize>),
        SetNextPiece { turn: usize, mask: PieceMask },
        SetGameOver(Option<String>),
        SetButtonEnabled { id: ButtonId, enabled: bool },
        SetButtonActive { id: ButtonId, active: bool },
        PulseButton(ButtonId),
        SetBiteCost { cost: i64, affordable: bool },
        ShowError(String),
        ShowWarning(String),
        ShowIdleWarning(String),
        ClearIdleWarning,
        OfferReconnect,
        ClearMessages,
    }

    /// Surface double that records every call in order.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<SurfaceOp>,
    }

    impl RecordingSurface {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Forget everything recorded so far.
        pub fn reset(&mut self) {
            self.ops.clear();
        }

        /// Number of individual cell paints recorded.
        #[must_use]
        pub fn cell_paints(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, SurfaceOp::PaintCell { .. }))
                .count()
        }

        /// Indices painted by `PaintCell` ops, in order.
        #[must_use]
        pub fn painted_indices(&self) -> Vec<usize> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    SurfaceOp::PaintCell { index, .. } => Some(*index),
                    _ => None,
                })
                .collect()
        }
    }

    impl RenderSurface for RecordingSurface {
        fn rebuild_grid(&mut self, cols: usize, rows: usize) {
            self.ops.push(SurfaceOp::RebuildGrid { cols, rows });
        }

        fn paint_cell(&mut self, index: usize, paint: CellPaint) {
            self.ops.push(SurfaceOp::PaintCell { index, paint });
        }

        fn set_hover_overlay(&mut self, overlay: Overlay, indices: &[usize]) {
            self.ops
                .push(SurfaceOp::SetHoverOverlay { overlay, indices: indices.to_vec() });
        }

        fn clear_hover_overlays(&mut self) {
            self.ops.push(SurfaceOp::ClearHoverOverlays);
        }

        fn paint_owner(&mut self, indices: &[usize], owner: u8) {
            self.ops.push(SurfaceOp::PaintOwner { indices: indices.to_vec(), owner });
        }

        fn strip_owner(&mut self, indices: &[usize]) {
            self.ops.push(SurfaceOp::StripOwner { indices: indices.to_vec() });
        }

        fn set_players(&mut self, players: &[Player]) {
            self.ops.push(SurfaceOp::SetPlayers {
                names: players.iter().map(|p| p.name.clone()).collect(),
            });
        }

        fn set_scores(&mut self, scores: &[i64]) {
            self.ops.push(SurfaceOp::SetScores(scores.to_vec()));
        }

        fn set_bites(&mut self, bites: &[i64]) {
            self.ops.push(SurfaceOp::SetBites(bites.to_vec()));
        }

        fn set_rerolls(&mut self, rerolls: &[i64]) {
            self.ops.push(SurfaceOp::SetRerolls(rerolls.to_vec()));
        }

        fn set_turn_indicator(&mut self, turn: Option<usize>) {
            self.ops.push(SurfaceOp::SetTurnIndicator(turn));
        }

        fn set_next_piece(&mut self, turn: usize, mask: PieceMask) {
            self.ops.push(SurfaceOp::SetNextPiece { turn, mask });
        }

        fn set_game_over(&mut self, winner: Option<&str>) {
            self.ops.push(SurfaceOp::SetGameOver(winner.map(str::to_owned)));
        }

        fn set_button_enabled(&mut self, id: ButtonId, enabled: bool) {
            self.ops.push(SurfaceOp::SetButtonEnabled { id, enabled });
        }

        fn set_button_active(&mut self, id: ButtonId, active: bool) {
            self.ops.push(SurfaceOp::SetButtonActive { id, active });
        }

        fn pulse_button(&mut self, id: ButtonId) {
            self.ops.push(SurfaceOp::PulseButton(id));
        }

        fn set_bite_cost(&mut self, cost: i64, affordable: bool) {
            self.ops.push(SurfaceOp::SetBiteCost { cost, affordable });
        }

        fn show_error(&mut self, message: &str) {
            self.ops.push(SurfaceOp::ShowError(message.to_owned()));
        }

        fn show_warning(&mut self, message: &str) {
            self.ops.push(SurfaceOp::ShowWarning(message.to_owned()));
        }

        fn show_idle_warning(&mut self, message: &str) {
            self.ops.push(SurfaceOp::ShowIdleWarning(message.to_owned()));
        }

        fn clear_idle_warning(&mut self) {
            self.ops.push(SurfaceOp::ClearIdleWarning);
        }

        fn offer_reconnect(&mut self) {
            self.ops.push(SurfaceOp::OfferReconnect);
        }

        fn clear_messages(&mut self) {
            self.ops.push(SurfaceOp::ClearMessages);
        }
    }
}
