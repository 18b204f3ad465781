//! Turn, rotation, and bite-selection state machine.
//!
//! Whose turn it is comes from the server; rotation and bite selection are
//! local until the next placement. The one subtle rule lives in
//! [`TurnState::observe_turn`]: selections reset only when the turn
//! actually changes hands, so a snapshot echo for an unrelated update (or a
//! rejected move) never clobbers an in-progress selection.

#[cfg(test)]
#[path = "turn_test.rs"]
mod turn_test;

use crate::piece::Bite;

/// Local view of the turn cycle and the player's pending selections.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnState {
    current_turn: Option<usize>,
    rotation: usize,
    bite: Bite,
    last_hover: Option<usize>,
}

impl TurnState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_turn(&self) -> Option<usize> {
        self.current_turn
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn bite(&self) -> Bite {
        self.bite
    }

    #[must_use]
    pub fn last_hover(&self) -> Option<usize> {
        self.last_hover
    }

    pub fn set_last_hover(&mut self, index: Option<usize>) {
        self.last_hover = index;
    }

    /// True when the local player may act.
    #[must_use]
    pub fn is_my_turn(&self, local_index: Option<usize>) -> bool {
        local_index.is_some() && self.current_turn == local_index
    }

    /// Apply the authoritative turn value from a snapshot. Rotation and
    /// bite reset only on an actual change.
    pub fn observe_turn(&mut self, turn: usize) -> bool {
        if self.current_turn == Some(turn) {
            return false;
        }
        self.current_turn = Some(turn);
        self.rotation = 0;
        self.bite = Bite::None;
        true
    }

    /// Step to the next rotation, wrapping over the server-provided mask
    /// count. Callers gate on [`TurnState::is_my_turn`].
    pub fn advance_rotation(&mut self, rotation_count: usize) -> usize {
        if rotation_count > 0 {
            self.rotation = (self.rotation + 1) % rotation_count;
        }
        self.rotation
    }

    /// Drop the bite selection without touching the rotation. Used when a
    /// game ends or restarts.
    pub fn reset_bite(&mut self) {
        self.bite = Bite::None;
    }

    /// Cycle none → small → large → none, skipping bites the player cannot
    /// afford with `balance` bite currency.
    pub fn cycle_bite(&mut self, balance: i64) -> Bite {
        const ORDER: [Bite; 3] = [Bite::None, Bite::Small, Bite::Large];

        let at = ORDER.iter().position(|&b| b == self.bite).unwrap_or(0);
        for step in 1..=ORDER.len() {
            let candidate = ORDER[(at + step) % ORDER.len()];
            if candidate.cost() <= balance {
                self.bite = candidate;
                break;
            }
        }
        self.bite
    }

    /// Select `kind`, or return to none when it is already active. An
    /// unaffordable selection is ignored.
    pub fn toggle_bite(&mut self, kind: Bite, balance: i64) -> Bite {
        if self.bite == kind {
            self.bite = Bite::None;
        } else if kind.cost() <= balance {
            self.bite = kind;
        }
        self.bite
    }
}
