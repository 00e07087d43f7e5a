//! The wire protocol between the host and its controllers.

pub mod messages;
