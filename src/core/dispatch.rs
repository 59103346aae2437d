pub mod any_message;
pub mod envelope;
pub mod mailbox;
pub mod message;
pub mod queued_message;
