//! Terminal client for the Nibble board game.
//!
//! `play` connects to the game channel and drives it from stdin commands;
//! `ping` probes the server's HTTP side. Reconnecting is always manual: a
//! dead connection prints the offer and waits for the next line.

mod surface;

use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use client::piece::Bite;
use client::runtime::{self, ClientConfig, ClientError};
use client::session::{Direction, Intent, Session};

use surface::TermSurface;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    ServerStatus(u16),
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Parser, Debug)]
#[command(name = "nibble", about = "Nibble board game terminal client")]
struct Cli {
    /// WebSocket endpoint of the game channel.
    #[arg(long, env = "NIBBLE_SERVER_URL", default_value = "ws://127.0.0.1:8080/game/ws")]
    server_url: String,

    /// HTTP base URL for the `ping` probe.
    #[arg(long, env = "NIBBLE_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Inbound silence tolerated before the idle warning, in milliseconds.
    #[arg(long, default_value_t = 6000)]
    idle_timeout_ms: u64,

    /// Pause between animated cell reveals, in milliseconds.
    #[arg(long, default_value_t = 350)]
    animation_rate_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect and play from stdin commands.
    Play {
        /// Exit after the first disconnect instead of offering a reconnect.
        #[arg(long, default_value_t = false)]
        once: bool,
    },
    /// Probe the server over HTTP.
    Ping,
}

/// One parsed line of user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UserCommand {
    Intent(Intent),
    Quit,
}

/// Map a stdin line to a command. An empty line commits at the hover,
/// mirroring the Enter key.
fn parse_command(line: &str) -> Option<UserCommand> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or("");
    let arg = words.next();

    let intent = match head {
        "" => Intent::CommitAtHover,
        "up" => Intent::MovePreview(Direction::Up),
        "down" => Intent::MovePreview(Direction::Down),
        "left" => Intent::MovePreview(Direction::Left),
        "right" => Intent::MovePreview(Direction::Right),
        "rotate" => Intent::RotatePiece,
        "b" | "bite" => Intent::CycleBite,
        "small" => Intent::ToggleBite(Bite::Small),
        "large" => Intent::ToggleBite(Bite::Large),
        "reroll" => Intent::Reroll,
        "skip" => Intent::SkipTurn,
        "clear" => Intent::PointerLeft,
        "restart" => Intent::ResetGame,
        "forfeit" => Intent::ForfeitGame,
        "hover" => Intent::Hover(arg?.parse().ok()?),
        "place" => Intent::Commit(arg?.parse().ok()?),
        "quit" | "exit" => return Some(UserCommand::Quit),
        _ => return None,
    };
    Some(UserCommand::Intent(intent))
}

/// Forward parsed stdin lines for the lifetime of the process.
async fn read_commands(tx: mpsc::Sender<UserCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match parse_command(line.trim_end()) {
            Some(command) => {
                if tx.send(command).await.is_err() {
                    return;
                }
            }
            None => println!(
                "commands: up/down/left/right, Enter, rotate, bite, small, large, \
                 reroll, skip, clear, hover N, place N, restart, forfeit, quit"
            ),
        }
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let response = reqwest::get(base_url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerStatus(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_play(config: &ClientConfig, once: bool) -> Result<(), CliError> {
    let (cmd_tx, mut commands) = mpsc::channel(16);
    tokio::spawn(read_commands(cmd_tx));

    // One session for the whole program: reconnecting replaces the socket,
    // not the cached game state.
    let mut session = Session::new();
    let mut term = TermSurface::new();

    loop {
        let (intent_tx, mut intents) = mpsc::channel(16);
        let run = runtime::run_connection(config, &mut session, &mut intents, &mut term);
        tokio::pin!(run);

        let _end = loop {
            tokio::select! {
                result = &mut run => break result?,
                Some(command) = commands.recv() => match command {
                    UserCommand::Intent(intent) => {
                        // Capacity is ample; a full channel just drops the
                        // keystroke.
                        let _ = intent_tx.try_send(intent);
                    }
                    UserCommand::Quit => return Ok(()),
                },
            }
        };

        if once {
            return Ok(());
        }

        // Manual reconnect: wait for any input; quit ends the program.
        match commands.recv().await {
            None | Some(UserCommand::Quit) => return Ok(()),
            Some(UserCommand::Intent(_)) => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Play { once } => {
            let mut config = ClientConfig::new(cli.server_url.clone());
            config.idle_timeout = Duration::from_millis(cli.idle_timeout_ms);
            config.animation_rate = Duration::from_millis(cli.animation_rate_ms);
            run_play(&config, once).await
        }
    }
}
