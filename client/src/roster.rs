//! Player roster: identities, colors, currencies, and records.
//!
//! Everything here is a cache of server payloads. `player_info` establishes
//! who is playing and which slot is ours; every `game_info` snapshot
//! refreshes scores and currencies in place.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use protocol::{PlayerInfo, WinLossDraw};

/// One player slot.
#[derive(Clone, Debug, Default)]
pub struct Player {
    pub name: String,
    pub color: String,
    pub score: i64,
    pub bites: i64,
    pub rerolls: i64,
    pub record: WinLossDraw,
}

/// All player slots plus the local client's own slot index.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    local_index: Option<usize>,
    players: Vec<Player>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The local player's slot, once `player_info` has arrived.
    #[must_use]
    pub fn local_index(&self) -> Option<usize> {
        self.local_index
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Apply a validated `player_info` payload: identity, display data, and
    /// lifetime records. Scores and currencies are kept — they belong to
    /// `game_info`.
    pub fn apply_player_info(&mut self, info: &PlayerInfo) {
        self.local_index = Some(info.identity);
        self.ensure_len(info.players.len());
        self.players.truncate(info.players.len());

        for (player, profile) in self.players.iter_mut().zip(&info.players) {
            player.name = profile.name.clone();
            player.color = profile.color.clone();
        }
        for (player, record) in self.players.iter_mut().zip(&info.win_loss_draw_record) {
            player.record = *record;
        }
    }

    /// Refresh per-player tables from a `game_info` snapshot.
    pub fn apply_game_tables(&mut self, scores: &[i64], bites: &[i64], rerolls: &[i64]) {
        self.ensure_len(scores.len().max(bites.len()).max(rerolls.len()));
        for (player, &score) in self.players.iter_mut().zip(scores) {
            player.score = score;
        }
        for (player, &bites) in self.players.iter_mut().zip(bites) {
            player.bites = bites;
        }
        for (player, &rerolls) in self.players.iter_mut().zip(rerolls) {
            player.rerolls = rerolls;
        }
    }

    /// Bite currency of the local player, 0 before identity is known.
    #[must_use]
    pub fn local_bites(&self) -> i64 {
        self.local_player().map_or(0, |p| p.bites)
    }

    /// Reroll currency of the local player, 0 before identity is known.
    #[must_use]
    pub fn local_rerolls(&self) -> i64 {
        self.local_player().map_or(0, |p| p.rerolls)
    }

    /// 1-based player number of the local player, used for placement echoes.
    #[must_use]
    pub fn local_player_number(&self) -> Option<u8> {
        let index = self.local_index?;
        u8::try_from(index + 1).ok()
    }

    /// Name of the first player still holding a positive score. When a game
    /// is over, every losing score has been zeroed, so this is the winner.
    #[must_use]
    pub fn leader_name(&self, scores: &[i64]) -> Option<&str> {
        let index = scores.iter().position(|&s| s > 0)?;
        self.players.get(index).map(|p| p.name.as_str())
    }

    fn local_player(&self) -> Option<&Player> {
        self.players.get(self.local_index?)
    }

    fn ensure_len(&mut self, len: usize) {
        if self.players.len() < len {
            self.players.resize_with(len, Player::default);
        }
    }
}
