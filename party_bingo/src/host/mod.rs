//! The host side of a game: configuration, actor, and its command set.

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{HostActor, HostHandle};
pub use config::HostConfig;
pub use messages::HostCommand;
