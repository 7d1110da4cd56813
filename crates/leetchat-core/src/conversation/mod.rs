//! Conversation assembly from a request

mod builder;

pub use builder::build;
