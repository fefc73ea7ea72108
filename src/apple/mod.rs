//! Apple Music catalog access.
//!
//! Requests are authenticated with a developer token: an ES256-signed JWT
//! carrying the team id as issuer and the key id in its header, valid for a
//! configurable session length (12 hours by default). [`auth`] signs it,
//! [`catalog`] reads playlists from `GET /catalog/{storefront}/playlists/{id}`.
//!
//! The playlist ids of genre rooms are collected by an external scraper and
//! arrive as job input.

pub mod auth;
pub mod catalog;

pub use auth::DeveloperTokenIssuer;
pub use catalog::AppleMusicClient;
