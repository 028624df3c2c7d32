//! # Spotify Integration Module
//!
//! Client layer for the Spotify Web API and the OAuth authorization-code
//! flow. Each submodule covers one domain:
//!
//! - [`auth`] - browser-based authorization and the code-for-token exchange.
//!   The flow opens the user's default browser, receives the redirect on a
//!   short-lived local HTTP server and exchanges the authorization code at
//!   the token endpoint using Basic client authentication. No refresh
//!   tokens are involved; an expired token is replaced by re-running the
//!   whole flow.
//! - [`player`] - one typed async function per playback endpoint (current
//!   state, devices, volume, transport, repeat, shuffle). Every function
//!   takes a valid [`crate::types::Token`] and maps non-success statuses to
//!   [`crate::error::Error::RemoteApi`].
//!
//! All HTTP communication goes through [`reqwest`]; response bodies are
//! deserialized into the structs in [`crate::types`].

pub mod auth;
pub mod player;
