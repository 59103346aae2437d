//! A minimal actor runtime.
//!
//! Actors are sequential units of computation, each with a private unbounded mailbox, that interact
//! only by posting messages to each other's addresses. Every actor is a task on a tokio runtime owned
//! by an [`ActorSystem`], so a blocked receive costs no OS thread.
//!
//! ```no_run
//! use actuator_lite::{ActorResult, ActorSystem, Envelope, NextState};
//!
//! # fn main() -> Result<(), actuator_lite::ActuatorError> {
//! let system = ActorSystem::new()?;
//! let echo = system.spawn(|envelope: Envelope| -> ActorResult<NextState> {
//!   if let Envelope::Success(ok) = &envelope {
//!     ok.sender().post_with_sender(ok.message().clone(), ok.self_ref().clone());
//!   }
//!   Ok(NextState::Receive)
//! });
//! echo.post("hello".to_string());
//! system.shutdown()?;
//! # Ok(())
//! # }
//! ```
use config::ConfigError;
use thiserror::Error;

pub mod core;
pub mod infrastructure;

pub use crate::core::actor::actor_id::ActorId;
pub use crate::core::actor::actor_ref::local_actor_ref::LocalActorRef;
pub use crate::core::actor::actor_ref::ActorRef;
pub use crate::core::actor::actor_status::ActorStatus;
pub use crate::core::actor::actor_system::{ActorSystem, WeakActorSystem};
pub use crate::core::actor::actor_system_config::ActorSystemConfig;
pub use crate::core::actor::{ActorError, ActorResult, NextState, Receiver};
pub use crate::core::dispatch::any_message::{AnyMessage, DowncastAnyMessageError};
pub use crate::core::dispatch::envelope::{Envelope, FailureEnvelope, SuccessEnvelope};
pub use crate::core::dispatch::message::Message;
pub use crate::core::dispatch::queued_message::QueuedMessage;

/// Errors of the actor system itself. Failures of individual actors never surface here.
#[derive(Error, Debug)]
pub enum ActuatorError {
  #[error("Failed to build the actor runtime: {0}")]
  RuntimeBuildFailed(#[from] std::io::Error),
  #[error("Failed to read configuration: {0}")]
  ConfigFailed(#[from] ConfigError),
  #[error("Invalid configuration for {key}: {message}")]
  InvalidConfig { key: &'static str, message: String },
  #[error("Actor system is already shut down")]
  AlreadyShutdown,
  #[error("Actor system cannot be shut down from one of its own workers")]
  ShutdownFromOwnWorker,
}

#[cfg(test)]
#[ctor::ctor]
fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}
