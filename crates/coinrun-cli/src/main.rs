//! coinrun CLI - autonomous coin-collection agent.
//!
//! - `coinrun play` - join a lobby and play one game over stdin/stdout
//! - `coinrun decide` - decide a single move from a snapshot

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use coinrun_agent::{transport::stdio_transport, AgentConfig, Session};
use coinrun_core::{DecisionKind, MovePolicy, Snapshot, WorldModel, DEFAULT_VISION_RADIUS};
use coinrun_nav::Navigator;

#[derive(Parser)]
#[command(name = "coinrun")]
#[command(about = "Autonomous coin-collection agent", version)]
struct Cli {
    /// Project root directory (holds .coinrun/agent.yaml)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register with a lobby and play until the game ends.
    ///
    /// Reads `<topic> <payload>` lines on stdin and writes `SUB`/`PUB` lines on stdout.
    Play {
        /// Config file (defaults to .coinrun/agent.yaml under the project root)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, env = "COINRUN_LOBBY")]
        lobby: Option<String>,

        #[arg(long, env = "COINRUN_PLAYER")]
        player: Option<String>,

        #[arg(long, env = "COINRUN_TEAM")]
        team: Option<String>,

        /// This agent created the lobby and sends START/STOP
        #[arg(long)]
        host: bool,

        /// Append game events to this JSONL file
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Print the move the agent would make for one snapshot
    Decide {
        /// Snapshot JSON file (stdin when omitted)
        file: Option<PathBuf>,

        /// Also print the world model
        #[arg(long)]
        map: bool,

        #[arg(long, default_value_t = DEFAULT_VISION_RADIUS)]
        vision_radius: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout may carry the transport, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let project_root = match cli.project {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Play {
            config,
            lobby,
            player,
            team,
            host,
            events,
        } => {
            let mut config = match config {
                Some(path) => AgentConfig::load(&path)?,
                None => AgentConfig::load_from_project(&project_root)?,
            };
            if let Some(lobby) = lobby {
                config.lobby_name = lobby;
            }
            if let Some(player) = player {
                config.player_name = player;
            }
            if let Some(team) = team {
                config.team_name = team;
            }
            config.host |= host;
            if events.is_some() {
                config.events_path = events;
            }
            config.events_path = config
                .events_path
                .map(|path| resolve(&project_root, path));

            play(config).await
        }
        Commands::Decide {
            file,
            map,
            vision_radius,
        } => decide(file.as_deref(), map, vision_radius),
    }
}

fn resolve(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}

async fn play(config: AgentConfig) -> Result<()> {
    let session = Session::new(config).context("Invalid agent configuration")?;
    tracing::info!(
        lobby = %session.config().lobby_name,
        player = %session.config().player_name,
        "Joining lobby"
    );

    let (publisher, subscription) = stdio_transport();
    let summary = session
        .run(Navigator::new(), publisher, subscription)
        .await?;

    tracing::info!(
        turns = summary.turns_played,
        moves = summary.moves_sent,
        stuck = summary.stuck_turns,
        "Game over"
    );
    Ok(())
}

fn decide(file: Option<&Path>, map: bool, vision_radius: i32) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read snapshot from stdin")?;
            raw
        }
    };

    let snapshot: Snapshot = serde_json::from_str(&raw).context("Failed to parse snapshot")?;
    snapshot.validate()?;

    let mut world = WorldModel::with_vision_radius(vision_radius);
    let decision = Navigator::new().make_move(&mut world, &snapshot);

    if map {
        println!("{}", world.grid());
    }

    let Some(decision) = decision else {
        bail!("No legal move from {}", snapshot.current_position);
    };

    match decision.kind {
        DecisionKind::Pursue { target, steps } => {
            tracing::info!(%target, steps, "Heading for coin");
        }
        DecisionKind::Explore => tracing::info!("No reachable coin, following walls"),
    }
    println!("{}", decision.direction);

    Ok(())
}
