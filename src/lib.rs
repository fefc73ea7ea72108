//! Store Turn Library
//!
//! This library checks whether an artist's tracks appear in curated Spotify
//! and Apple Music playlists. It walks category listings, fetches every
//! playlist through an authenticated, retrying HTTP client and matches the
//! artist name against the credited artists of each track.
//!
//! # Modules
//!
//! - `apple` - Apple Music developer token issuing and catalog access
//! - `charts` - Chart dumps delivered by external scrapers
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from `.env` and environment variables
//! - `error` - The closed set of error kinds
//! - `job` - Per-artist job runner and outcome
//! - `management` - Token management, retrying requests and catalog walking
//! - `notify` - Report delivery
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Matching and report rendering helpers
//!
//! # Example
//!
//! ```
//! use storeturn::{config, job, notify::ConsoleNotifier, types::Job};
//!
//! #[tokio::main]
//! async fn main() -> storeturn::Result<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let job = Job::for_artist("Some Artist");
//!     let outcome = job::run_job(&config, &job, &ConsoleNotifier::new(&config.notify)).await;
//!     println!("{}", outcome.message());
//!     Ok(())
//! }
//! ```

pub mod apple;
pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod management;
pub mod notify;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the kinds in
/// [`Error`], so callers can tell transient, permanent and authentication
/// failures apart without string matching.
pub type Result<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching playlists in {}", category);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Found {} placements", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the process with exit code 1 after printing, so it
/// is only used at the binary boundary for unrecoverable setup failures.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as retried requests or a notification
/// that could not be delivered.
///
/// # Example
///
/// ```
/// warning!("Request failed with {}, retrying in {:?}", status, delay);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
