mod auth;
mod coordinator;
mod poller;
mod volume;

pub use auth::TokenManager;
pub use coordinator::BUFFER_TIME;
pub use coordinator::ControlCoordinator;
pub use poller::POLL_INTERVAL;
pub use poller::Poller;
pub use volume::VolumeDebouncer;
pub use volume::VolumeSink;
