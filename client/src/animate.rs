//! Staggered reveal of server-designated board cells.
//!
//! The board snapshot is already applied when playback starts; the queue
//! only spaces out the *visual* reveal, one cell per step. The runtime owns
//! the pacing (a fixed delay between steps) so tests can drive steps
//! directly or under paused time.

#[cfg(test)]
#[path = "animate_test.rs"]
mod animate_test;

use std::collections::VecDeque;

use tracing::warn;

use crate::board::BoardModel;
use crate::surface::RenderSurface;

/// Ordered, cancellable playback queue of cell indices to repaint.
#[derive(Clone, Debug, Default)]
pub struct AnimationQueue {
    pending: VecDeque<usize>,
    animating: bool,
}

impl AnimationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playing `indices`. Any in-progress run is stopped first; a
    /// repeated index is legal and repaints its cell again.
    pub fn start(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.cancel();
        self.pending.extend(indices);
        self.animating = !self.pending.is_empty();
    }

    /// Stop playback and drop whatever is still queued.
    pub fn cancel(&mut self) {
        self.animating = false;
        self.pending.clear();
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Reveal the next queued cell from the applied snapshot. Returns true
    /// while more steps remain.
    pub fn step<S: RenderSurface>(&mut self, board: &BoardModel, surface: &mut S) -> bool {
        if !self.animating {
            return false;
        }
        if let Some(index) = self.pending.pop_front() {
            match board.paint(index) {
                Some(paint) => surface.paint_cell(index, paint),
                None => warn!(index, "animation index outside the board"),
            }
        }
        if self.pending.is_empty() {
            self.animating = false;
        }
        self.animating
    }
}
