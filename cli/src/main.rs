use clap::{Parser, Subcommand, ValueEnum};
use lair_cli::{CliContext, commands, heartbeat, logging, readline};
use lair_core::context::{AppConfig, AppConfigExt};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    let (ctx, kill_writer) = CliContext::init(config)?;

    let handle = heartbeat::start(&ctx).await;
    ctx.tasks.lock().await.heartbeat = Some(handle);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.shutdown().await?;
    // Dropping the last queue sender lets the writer drain and exit
    drop(ctx);
    if let Err(e) = kill_writer.await {
        tracing::warn!(error = %e, "Kill record writer did not shut down cleanly");
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "lair boss spawner console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every spawner and its boss
    Status,
    /// List loaded boss types
    List,
    /// Deal damage to a boss as a player
    Damage {
        /// Spawner id or hex entity id
        target: String,
        #[arg(short, long)]
        player: String,
        #[arg(short, long)]
        amount: f64,
    },
    /// Show the damage a boss would deal to a player
    Attack {
        target: String,
        #[arg(short, long)]
        player: String,
    },
    /// Kill a boss outright and run its death rewards
    Kill { target: String },
    /// Remove a boss entity without rewards, as an outside cause
    Destroy { target: String },
    /// Spawn a child boss at a spawner
    Minion {
        spawner: String,
        #[arg(short = 't', long = "type")]
        boss_type: String,
    },
    /// Show or hide a spawner's countdown label
    Hologram {
        spawner: String,
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Persist spawners to disk
    Save,
    /// Show recent kill records
    Kills {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "lair".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Status) => commands::status(ctx).await?,
        Some(Commands::List) => commands::list_types(ctx).await?,
        Some(Commands::Damage {
            target,
            player,
            amount,
        }) => commands::damage(ctx, target, player, *amount).await?,
        Some(Commands::Attack { target, player }) => commands::attack(ctx, target, player).await?,
        Some(Commands::Kill { target }) => commands::kill(ctx, target).await?,
        Some(Commands::Destroy { target }) => commands::destroy(ctx, target).await?,
        Some(Commands::Minion { spawner, boss_type }) => {
            commands::spawn_minion(ctx, spawner, boss_type).await?
        }
        Some(Commands::Hologram { spawner, state }) => {
            commands::set_hologram(ctx, spawner, matches!(state, Toggle::On)).await?
        }
        Some(Commands::Save) => commands::save(ctx).await?,
        Some(Commands::Kills { limit }) => commands::show_kills(ctx, *limit).await?,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
