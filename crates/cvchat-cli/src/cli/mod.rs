//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use cvchat_core::config::{self, BASE_URL_ENV, Config};
use cvchat_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "cvchat")]
#[command(version)]
#[command(about = "Terminal client for the Career Titan chat service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the chat service
    #[arg(long, global = true, value_name = "URL", env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Session id sent as chatId (default: config value or a new UUID)
    #[arg(long, global = true, value_name = "ID")]
    chat_id: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive chat (default)
    Chat,
    /// Send one prompt and print the reply
    Send {
        /// The prompt to send
        #[arg(short, long)]
        prompt: String,

        /// Attach a file by URL (repeatable)
        #[arg(short, long = "attach", value_name = "URL")]
        attach: Vec<String>,
    },
    /// Reset the server-side session for the chat id
    Reset,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

/// Values every network command needs.
pub struct Session {
    pub config: Config,
    pub base_url: String,
    pub chat_id: String,
    /// Whether the chat id came from the flag or config rather than being
    /// generated.
    pub chat_id_explicit: bool,
}

impl Session {
    fn resolve(cli: &Cli) -> Result<Self> {
        let config = Config::load().context("load config")?;
        let base_url = config.resolve_base_url(cli.base_url.as_deref())?;
        let chat_id_explicit = cli.chat_id.is_some() || config.chat_id.is_some();
        let chat_id = config.resolve_chat_id(cli.chat_id.as_deref());
        Ok(Self {
            config,
            base_url,
            chat_id,
            chat_id_explicit,
        })
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let session = Session::resolve(&cli)?;

    // The guard flushes the log writer on drop; keep it for the whole run.
    let _log_guard = match logging::init(&session.config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!(
                "Warning: logging disabled ({e:#}); logs dir: {}",
                config::paths::logs_dir().display()
            );
            None
        }
    };
    tracing::debug!(base_url = %session.base_url, chat_id = %session.chat_id, "session resolved");

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    match cli.command {
        None | Some(Commands::Chat) => rt.block_on(commands::chat::run(&session)),
        Some(Commands::Send { prompt, attach }) => {
            rt.block_on(commands::send::run(&session, &prompt, &attach))
        }
        Some(Commands::Reset) => rt.block_on(commands::reset::run(&session)),
        Some(Commands::Config { .. }) => Ok(()),
    }
}
