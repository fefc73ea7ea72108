//! # CLI Module
//!
//! User-facing commands of storeturn. Each command loads nothing on its own:
//! the binary builds a [`crate::config::Config`] once and hands it down.
//!
//! ## Commands
//!
//! - [`scan`] - Runs one artist search built from command-line flags
//! - [`job`] - Runs one artist search read from a JSON job file or stdin
//! - [`auth`] - Issues a token for every configured service to verify credentials
//!
//! ## Output
//!
//! Progress is reported with the crate's `info!`/`success!`/`warning!`
//! macros, placements are shown as a table (or JSON with `--json`), and the
//! report itself is handed to the notifier. The returned
//! [`crate::job::JobOutcome`] decides the process exit code.
//!
//! ## Usage
//!
//! ```bash
//! storeturn auth
//! storeturn scan --artist "Some Artist" --spotify-category 0JQ5DAqbMKFQ00XGBls6ym
//! storeturn scan --artist "Some Artist" --apple-playlist pl.2b0e6e332fdf4b7a91164da3162127b5
//! storeturn job artist.json
//! ```

mod auth;
mod scan;

pub use auth::auth;
pub use scan::job;
pub use scan::scan;
