//! # API Module
//!
//! HTTP endpoints served by the short-lived local callback server during the
//! OAuth authorization flow.
//!
//! - [`callback`] - receives the single authorization redirect from
//!   Spotify's accounts service and records the `code` query parameter (or
//!   its absence) in the shared flow state. The code-for-token exchange
//!   itself happens in [`crate::spotify::auth`], not here.
//! - [`health`] - returns application status and version, handy for
//!   checking that the listener actually came up on the configured port.
//!
//! Built on [Axum](https://docs.rs/axum); the server lives in
//! [`crate::server`] and is torn down as soon as the authorization exchange
//! completes.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
