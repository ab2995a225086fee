//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{import, logging, signin, tui, view};
use crate::domain::DEFAULT_EXCERPT_LEN;
use crate::storage::{Board, Config};

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(author, version, about = "Local-first roadmap viewer for feedback boards")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new roadmap board
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Replace the board contents with a posts/tags/counts snapshot
    Import {
        /// Snapshot JSON file, or - for stdin
        file: PathBuf,
    },

    /// Show the roadmap
    Show {
        /// Statuses to show, in order (repeatable; overrides config)
        #[arg(long = "status", short = 's')]
        statuses: Vec<String>,

        /// Maximum description excerpt length
        #[arg(long)]
        max_len: Option<usize>,
    },

    /// Show posts grouped by every status
    Groups {
        /// Include statuses with no posts
        #[arg(long)]
        include_empty: bool,
    },

    /// Shorten a description the way roadmap cards do
    Excerpt {
        /// Text to shorten
        text: String,

        /// Maximum length in characters
        #[arg(long, default_value_t = DEFAULT_EXCERPT_LEN)]
        max_len: usize,
    },

    /// Show where sign-in would redirect for this board's site
    SigninUrl {
        /// Current page URL (defaults to <base_url>/signin)
        #[arg(long)]
        url: Option<String>,

        /// Use the sign-in modal rules instead of the sign-in page
        #[arg(long)]
        modal: bool,
    },

    /// Browse the roadmap interactively
    Board,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format);

    output.verbose("Roadmap CLI starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing board at: {}", path));
            let board = Board::init(&path)?;
            output.verbose_ctx("init", &format!("Created board directory at: {}", board.board_dir().display()));
            output.success(&format!("Initialized roadmap board at {}", board.root().display()));
        }

        Commands::Import { file } => import::run(&output, &file)?,

        Commands::Show { statuses, max_len } => {
            output.verbose_ctx("show", &format!("Status override: {:?}", statuses));
            view::show(&output, &statuses, max_len)?
        }

        Commands::Groups { include_empty } => view::groups(&output, include_empty)?,

        Commands::Excerpt { text, max_len } => view::excerpt(&output, &text, max_len)?,

        Commands::SigninUrl { url, modal } => signin::run(&output, url.as_deref(), modal)?,

        Commands::Board => tui::run(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
