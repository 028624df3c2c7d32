//! # CLI Module
//!
//! User-facing subcommand implementations. Each function is a thin
//! orchestration layer over the management and spotify modules and handles
//! its own user feedback; fatal conditions terminate through the `error!`
//! macro, runtime hiccups are reported with `warning!` and survived.
//!
//! - [`auth`] - force a fresh browser authorization and persist the token
//! - [`run`] - the remote-control session over stdin/stdout
//! - [`now`] - print a one-line description of the current track
//! - [`devices`] - list the account's playback devices

mod auth;
mod devices;
mod now;
mod run;

pub use auth::auth;
pub use devices::devices;
pub use now::now;
pub use run::run;
