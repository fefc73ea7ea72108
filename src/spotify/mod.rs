//! # Spotify Integration Module
//!
//! Public catalog access to the Spotify Web API for playlist scans.
//!
//! ## Authentication
//!
//! [`auth`] implements the client-credentials flow: the client id and secret
//! are exchanged at the accounts service for a bearer token valid for about
//! an hour. No user authorization is involved, so the token only reaches
//! public catalog data. Tokens are held in memory by a
//! [`crate::management::TokenManager`] and re-issued when they run out.
//!
//! ## Catalog
//!
//! [`catalog`] walks browse categories and playlist track listings:
//!
//! - `GET /browse/categories/{id}/playlists` - paged playlist listing of a category
//! - `GET /playlists/{id}/tracks` - paged track listing of a playlist
//!
//! Every call goes through [`crate::management::RequestClient`], which
//! retries rate limiting (429), server errors and transport failures with a
//! linear, capped backoff.
//!
//! ## Usage
//!
//! ```rust
//! let mut walker = CatalogWalker::new(SpotifyClient::new(&spotify, &http)?, scan);
//! walker.find_playlists_for_category("0JQ5DAqbMKFQ00XGBls6ym", "US").await?;
//! let matches = walker.find_artist_in_playlists("Some Artist").await?;
//! ```

pub mod auth;
pub mod catalog;

pub use auth::ClientCredentialsIssuer;
pub use catalog::SpotifyClient;
