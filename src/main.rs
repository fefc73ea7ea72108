use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use storeturn::{
    cli, config, error, info,
    job::JobOutcome,
    success,
    types::{Genres, Job},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Verify the configured Spotify and Apple Music credentials
    Auth,

    /// Search playlists for an artist
    Scan(ScanOptions),

    /// Run a search described by a JSON job file
    Job(JobOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ScanOptions {
    /// Artist name to look for (case-insensitive substring match)
    #[clap(long)]
    pub artist: String,

    /// Spotify browse category id; can be repeated
    #[clap(long = "spotify-category")]
    pub spotify_categories: Vec<String>,

    /// Apple Music catalog playlist id (pl.…); can be repeated
    #[clap(long = "apple-playlist")]
    pub apple_playlists: Vec<String>,

    /// Chart dump produced by a scraper; can be repeated
    #[clap(long = "chart")]
    pub charts: Vec<String>,

    /// Print the report as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct JobOptions {
    /// Path to the job file, or `-` for stdin
    pub path: String,

    /// Print the report as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn finish(outcome: JobOutcome) -> ! {
    match &outcome {
        JobOutcome::Completed { .. } => success!("{}", outcome.message()),
        JobOutcome::NoMatches { .. } => info!("{}", outcome.message()),
        JobOutcome::Failed { .. } => warning!("{}", outcome.message()),
    }
    std::process::exit(outcome.exit_code())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Auth => {
            if !cli::auth(&config).await {
                std::process::exit(1);
            }
        }
        Command::Scan(opt) => {
            let job = Job {
                artist: opt.artist,
                genres: Genres {
                    spotify: opt.spotify_categories,
                    apple: opt.apple_playlists,
                },
                charts: opt.charts,
            };
            finish(cli::scan(&config, job, opt.json).await)
        }
        Command::Job(opt) => finish(cli::job(&config, &opt.path, opt.json).await),
        Command::Completions(_) => {}
    }
}
