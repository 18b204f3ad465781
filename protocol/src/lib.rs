//! Wire protocol for the Nibble game channel.
//!
//! This crate owns the JSON representation used on the bidirectional
//! WebSocket between the game server and its clients. Every frame is an
//! envelope `{"type": <string>, "payload": <object>}`; `ping`/`pong` carry
//! no payload.
//!
//! DESIGN
//! ======
//! - Encoding goes through serde's adjacently-tagged representation, so the
//!   message enums are the single source of truth for wire names.
//! - Decoding is two-step (raw envelope, then per-type payload) so an
//!   unknown `type` is reported as [`CodecError::UnknownType`] instead of a
//!   generic parse failure — dispatchers drop unknown types without failing
//!   the connection.
//! - Payload structs carry `validate()` methods for the invariants serde
//!   cannot express (non-empty arrays, cross-field requirements). Callers
//!   run validation before applying any state, so a bad frame is rejected
//!   whole rather than half-applied.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned by the envelope decoders.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame is not valid JSON or a payload field has the wrong shape.
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    /// The envelope `type` is not part of the protocol.
    #[error("unknown message type: {0}")]
    UnknownType(String),
    /// A message type that requires a payload arrived without one.
    #[error("missing payload for message type {0}")]
    MissingPayload(&'static str),
}

/// A structurally well-formed payload that violates a protocol invariant.
///
/// Payload fields are cross-referential (board dimensions and board content
/// must agree, identity must index the player list), so a failed validation
/// rejects the whole frame.
#[derive(Debug, thiserror::Error)]
#[error("invalid {kind} payload: {reason}")]
pub struct InvalidPayload {
    pub kind: &'static str,
    pub reason: &'static str,
}

// =============================================================================
// CLIENT -> SERVER
// =============================================================================

/// Turn-level action requested by the local player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    SkipTurn,
    Reroll,
    ResetGame,
    ForfeitGame,
}

/// Committed board mutation: a piece or bite placed at a cell index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardAction {
    PlacePiece,
    PlaceBite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    pub action: BoardAction,
    pub index: usize,
    pub mask: u32,
}

/// Transient hover intent broadcast to peers. `Clear` carries no position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewAction {
    PreviewPiece,
    PreviewBite,
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdatePreview {
    pub action: PreviewAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<u32>,
}

impl BoardUpdatePreview {
    #[must_use]
    pub fn piece(index: usize, mask: u32) -> Self {
        Self { action: PreviewAction::PreviewPiece, index: Some(index), mask: Some(mask) }
    }

    #[must_use]
    pub fn bite(index: usize, mask: u32) -> Self {
        Self { action: PreviewAction::PreviewBite, index: Some(index), mask: Some(mask) }
    }

    #[must_use]
    pub fn clear() -> Self {
        Self { action: PreviewAction::Clear, index: None, mask: None }
    }
}

/// Control identifiers shared by `button_update` and `button_info`.
///
/// Wire names are the control ids the web client uses, so they are
/// camelCase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonId {
    RotatePiece,
    SkipTurn,
    SmallBite,
    LargeBite,
    Reroll,
    RestartGame,
    ForfeitGame,
}

/// Button state/notification relay. Used in both directions: clients report
/// their own control state, the server echoes it to peers as `button_info`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Vec<ButtonId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive: Option<Vec<ButtonId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<Vec<ButtonId>>,
}

impl ButtonUpdate {
    /// Notification-only update pulsing a single control.
    #[must_use]
    pub fn notify_one(id: ButtonId) -> Self {
        Self { notify: Some(vec![id]), ..Self::default() }
    }
}

/// Every message a client may send.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMessage {
    Pong,
    GameUpdate { action: GameAction },
    BoardUpdate(BoardUpdate),
    BoardUpdatePreview(BoardUpdatePreview),
    ButtonUpdate(ButtonUpdate),
}

// =============================================================================
// SERVER -> CLIENT
// =============================================================================

/// The piece the current player must place, as a list of rotation masks
/// indexed by rotation id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPiece {
    pub masks: Vec<u32>,
}

/// Authoritative game snapshot. Replaces all locally cached game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Cell grid, outer array is rows. Low byte of each cell is the owner,
    /// high byte carries the bonus flags.
    pub board: Vec<Vec<u16>>,
    pub next_piece: NextPiece,
    /// Index of the player whose turn it is.
    pub turn: usize,
    pub scores: Vec<i64>,
    pub bites: Vec<i64>,
    pub rerolls: Vec<i64>,
    pub game_over: bool,
    /// Cell indices to reveal one by one instead of a full repaint.
    /// Repeats are legal and repaint the cell again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_updates_to_animate: Option<Vec<usize>>,
}

impl GameInfo {
    /// Check the cross-field invariants a snapshot must satisfy before any
    /// of it is applied.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPayload`] on an empty or ragged board, an empty
    /// rotation list, or empty score/currency tables.
    pub fn validate(&self) -> Result<(), InvalidPayload> {
        let invalid = |reason| InvalidPayload { kind: "game_info", reason };

        let Some(first_row) = self.board.first() else {
            return Err(invalid("empty board"));
        };
        if first_row.is_empty() {
            return Err(invalid("empty board row"));
        }
        if self.board.iter().any(|row| row.len() != first_row.len()) {
            return Err(invalid("ragged board rows"));
        }
        if self.next_piece.masks.is_empty() {
            return Err(invalid("next_piece has no rotation masks"));
        }
        if self.scores.is_empty() || self.bites.is_empty() || self.rerolls.is_empty() {
            return Err(invalid("missing per-player tables"));
        }
        Ok(())
    }
}

/// Display identity of one player slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub color: String,
}

/// Lifetime win/loss/draw record for one player slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossDraw {
    #[serde(rename = "W")]
    pub wins: i64,
    #[serde(rename = "L")]
    pub losses: i64,
    #[serde(rename = "D")]
    pub draws: i64,
}

/// Session identity and roster, sent on join and whenever the roster changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// The receiving client's own slot in `players`.
    pub identity: usize,
    pub players: Vec<PlayerProfile>,
    pub win_loss_draw_record: Vec<WinLossDraw>,
}

impl PlayerInfo {
    /// # Errors
    ///
    /// Returns [`InvalidPayload`] on an empty roster, an identity outside
    /// the roster, or an empty record table.
    pub fn validate(&self) -> Result<(), InvalidPayload> {
        let invalid = |reason| InvalidPayload { kind: "player_info", reason };

        if self.players.is_empty() {
            return Err(invalid("empty player list"));
        }
        if self.identity >= self.players.len() {
            return Err(invalid("identity outside player list"));
        }
        if self.win_loss_draw_record.is_empty() {
            return Err(invalid("empty win/loss/draw record"));
        }
        Ok(())
    }
}

/// Peer preview/placement echo rebroadcast by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewInfoAction {
    PreviewPiece,
    PreviewBite,
    PlacePiece,
    PlaceBite,
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfoPreview {
    pub action: PreviewInfoAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<u32>,
    /// Owning player number (1-based) for `place_piece` echoes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<u8>,
}

impl BoardInfoPreview {
    /// # Errors
    ///
    /// Returns [`InvalidPayload`] when a positioned action is missing its
    /// index/mask, or a `place_piece` echo is missing its owner.
    pub fn validate(&self) -> Result<(), InvalidPayload> {
        let invalid = |reason| InvalidPayload { kind: "board_info_preview", reason };

        if self.action == PreviewInfoAction::Clear {
            return Ok(());
        }
        if self.index.is_none() || self.mask.is_none() {
            return Err(invalid("positioned action without index and mask"));
        }
        if self.action == PreviewInfoAction::PlacePiece && self.owner.is_none() {
            return Err(invalid("place_piece without owner"));
        }
        Ok(())
    }
}

/// Every message the server may send.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    Ping,
    GameInfo(GameInfo),
    PlayerInfo(PlayerInfo),
    ButtonInfo(ButtonUpdate),
    BoardInfoPreview(BoardInfoPreview),
    Error { message: String },
}

// =============================================================================
// ENVELOPE CODEC
// =============================================================================

/// Raw envelope used for the first decode step.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<serde_json::Value>,
}

fn payload_of<T: DeserializeOwned>(
    kind: &'static str,
    payload: Option<serde_json::Value>,
) -> Result<T, CodecError> {
    let value = payload.ok_or(CodecError::MissingPayload(kind))?;
    Ok(serde_json::from_value(value)?)
}

/// Encode an outbound client frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails (it does not for any
/// value constructible through this crate's types).
pub fn encode_client(message: &ClientMessage) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}

/// Encode an outbound server frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_server(message: &ServerMessage) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}

/// Decode an inbound frame on the client side.
///
/// # Errors
///
/// Returns [`CodecError::UnknownType`] for types outside the protocol,
/// [`CodecError::MissingPayload`] when a payload-bearing type has none, and
/// [`CodecError::Json`] for malformed JSON or payload fields.
pub fn decode_server(text: &str) -> Result<ServerMessage, CodecError> {
    let raw: RawEnvelope = serde_json::from_str(text)?;
    match raw.kind.as_str() {
        "ping" => Ok(ServerMessage::Ping),
        "game_info" => Ok(ServerMessage::GameInfo(payload_of("game_info", raw.payload)?)),
        "player_info" => Ok(ServerMessage::PlayerInfo(payload_of("player_info", raw.payload)?)),
        "button_info" => Ok(ServerMessage::ButtonInfo(payload_of("button_info", raw.payload)?)),
        "board_info_preview" => Ok(ServerMessage::BoardInfoPreview(payload_of(
            "board_info_preview",
            raw.payload,
        )?)),
        "error" => {
            #[derive(Deserialize)]
            struct ErrorPayload {
                message: String,
            }
            let payload: ErrorPayload = payload_of("error", raw.payload)?;
            Ok(ServerMessage::Error { message: payload.message })
        }
        _ => Err(CodecError::UnknownType(raw.kind)),
    }
}

/// Decode an inbound frame on the server side.
///
/// # Errors
///
/// Same error surface as [`decode_server`].
pub fn decode_client(text: &str) -> Result<ClientMessage, CodecError> {
    let raw: RawEnvelope = serde_json::from_str(text)?;
    match raw.kind.as_str() {
        "pong" => Ok(ClientMessage::Pong),
        "game_update" => {
            #[derive(Deserialize)]
            struct GameUpdatePayload {
                action: GameAction,
            }
            let payload: GameUpdatePayload = payload_of("game_update", raw.payload)?;
            Ok(ClientMessage::GameUpdate { action: payload.action })
        }
        "board_update" => Ok(ClientMessage::BoardUpdate(payload_of("board_update", raw.payload)?)),
        "board_update_preview" => Ok(ClientMessage::BoardUpdatePreview(payload_of(
            "board_update_preview",
            raw.payload,
        )?)),
        "button_update" => Ok(ClientMessage::ButtonUpdate(payload_of("button_update", raw.payload)?)),
        _ => Err(CodecError::UnknownType(raw.kind)),
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
