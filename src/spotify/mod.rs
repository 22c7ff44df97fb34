//! # Spotify Integration Module
//!
//! This module holds the two HTTP calls the player makes against Spotify.
//! Both are fire-once: nothing here retries, pages or caches.
//!
//! ## Architecture
//!
//! ```text
//! Management Layer (CredentialBroker, Session)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 client credentials)
//!     └── Track Search (fixed query, single page)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client-credentials token exchange
//! - `GET /search` - Track search with `type=track`
//!
//! Endpoint base URLs are passed in by the caller so the calls can be pointed
//! at any compatible server.
//!
//! ## Error Types
//!
//! Every function returns [`crate::error::PlayerError`]. Non-success HTTP
//! statuses are converted with `error_for_status` and surface as
//! `CredentialAcquisition` or `Search` depending on the call.

pub mod auth;
pub mod search;
