//! Connection runtime: one select loop per connection.
//!
//! LIFECYCLE
//! =========
//! 1. Connect → fresh [`Session`]-independent health clock and watchdog
//! 2. Inbound frames → dispatch → flush queued outbound messages
//! 3. User intents arrive over a channel → apply → flush
//! 4. Animation and watchdog ticks interleave on the same task
//! 5. Close or transport error → non-fatal: surface the reconnect offer
//!    and return
//!
//! Everything a connection owns — socket, watchdog, animation pacing —
//! lives inside this loop, so nothing stale can fire after the loop
//! returns: a reconnect starts from scratch and the previous connection's
//! timers are gone with it. There is no automatic retry; reconnecting is
//! the front end's (and the user's) call.

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, interval_at, sleep};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{info, warn};

use crate::health::{ConnectionHealth, DEFAULT_IDLE_TIMEOUT};
use crate::session::{Intent, Session};
use crate::surface::RenderSurface;

/// Pause between animated cell reveals.
pub const DEFAULT_ANIMATION_RATE: Duration = Duration::from_millis(350);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connection parameters.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// WebSocket endpoint, e.g. `ws://host:port/game/ws`.
    pub url: String,
    pub idle_timeout: Duration,
    pub animation_rate: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            animation_rate: DEFAULT_ANIMATION_RATE,
        }
    }
}

/// Transport-level failures. Dispatch failures never end the connection.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket send failed: {0}")]
    Send(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("frame encode failed: {0}")]
    Encode(#[from] protocol::CodecError),
}

/// How a connection ended. Both variants are non-fatal; the caller decides
/// whether to reconnect.
#[derive(Debug, PartialEq, Eq)]
pub enum ConnectionEnd {
    /// The server closed the channel or the stream ended.
    Closed,
    /// The transport reported an error.
    TransportError(String),
}

/// Run one connection to completion.
///
/// # Errors
///
/// Returns [`ClientError::Connect`] when the connection cannot be
/// established and [`ClientError::Send`]/[`ClientError::Encode`] when an
/// outbound frame cannot be delivered. Inbound problems are surfaced as
/// warnings, not errors.
pub async fn run_connection<S: RenderSurface>(
    config: &ClientConfig,
    session: &mut Session,
    intents: &mut mpsc::Receiver<Intent>,
    surface: &mut S,
) -> Result<ConnectionEnd, ClientError> {
    let (mut stream, _) = connect_async(config.url.as_str())
        .await
        .map_err(|error| ClientError::Connect(Box::new(error)))?;
    info!(url = %config.url, "game channel connected");
    surface.clear_messages();

    let mut health = ConnectionHealth::new(config.idle_timeout);
    // First check one full threshold after connecting, then every threshold.
    let mut watchdog = interval_at(Instant::now() + config.idle_timeout, config.idle_timeout);

    let end = loop {
        tokio::select! {
            inbound = stream.next() => {
                match inbound {
                    None | Some(Ok(Message::Close(_))) => break ConnectionEnd::Closed,
                    Some(Err(error)) => break ConnectionEnd::TransportError(error.to_string()),
                    Some(Ok(Message::Text(text))) => {
                        health.record_frame();
                        if let Err(error) = session.handle_frame(text.as_str(), surface) {
                            warn!(%error, "failed to apply inbound frame");
                            surface.show_error("Failed to apply a message from the server.");
                            surface.offer_reconnect();
                        }
                        flush_outbound(&mut stream, session).await?;
                    }
                    // Control frames still prove the server is alive.
                    Some(Ok(_)) => health.record_frame(),
                }
            }
            Some(intent) = intents.recv() => {
                session.apply_intent(intent, surface);
                flush_outbound(&mut stream, session).await?;
            }
            _ = watchdog.tick() => {
                check_liveness(&health, surface);
            }
            () = sleep(config.animation_rate), if session.is_animating() => {
                session.animation_step(surface);
            }
        }
    };

    match &end {
        ConnectionEnd::Closed => {
            info!("game channel closed");
            surface.show_error("Game connection closed.");
        }
        ConnectionEnd::TransportError(error) => {
            warn!(%error, "game channel error");
            surface.show_error("Game connection had unexpected error.");
        }
    }
    surface.offer_reconnect();

    // Defensive close; the socket may already be gone.
    let _ = stream.close(None).await;

    Ok(end)
}

/// Surface or clear the idle warning from one watchdog tick.
fn check_liveness<S: RenderSurface>(health: &ConnectionHealth, surface: &mut S) {
    match health.idle_for() {
        Some(idle) => {
            warn!(?idle, "no game data past the idle threshold");
            surface.show_idle_warning(&format!(
                "No game data in {:.1} seconds",
                idle.as_secs_f64()
            ));
            surface.offer_reconnect();
        }
        None => surface.clear_idle_warning(),
    }
}

/// Send everything the session queued, in order. Called only after the
/// handler that queued the messages has already painted its effects.
async fn flush_outbound(stream: &mut WsStream, session: &mut Session) -> Result<(), ClientError> {
    for message in session.take_outbound() {
        let text = protocol::encode_client(&message)?;
        stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|error| ClientError::Send(Box::new(error)))?;
    }
    Ok(())
}
