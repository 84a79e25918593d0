//! Domain model

pub mod messaging;
pub mod notifications;
