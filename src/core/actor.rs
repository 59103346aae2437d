use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::mailbox::MailboxError;
use thiserror::Error;

pub(crate) mod actor_cell;
pub mod actor_id;
pub mod actor_ref;
pub(crate) mod actor_registry;
pub mod actor_status;
pub mod actor_system;
pub mod actor_system_config;


pub type ActorResult<A> = Result<A, ActorError>;

/// Why an actor stopped abnormally. Delivered to its own receiver in a failure envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActorError {
  #[error("Actor failed: {message}")]
  ActorFailed { message: String },
  #[error("Actor panicked: {message}")]
  ActorPanicked { message: String },
  #[error("Actor mailbox failed: {0}")]
  MailboxFailed(#[from] MailboxError),
  /// The system was forcibly shut down while the actor waited for a message.
  #[error("Actor interrupted by shutdown")]
  Interrupted,
}

impl ActorError {
  pub fn of_failed(message: impl Into<String>) -> Self {
    ActorError::ActorFailed {
      message: message.into(),
    }
  }
}

impl From<anyhow::Error> for ActorError {
  fn from(error: anyhow::Error) -> Self {
    ActorError::of_failed(format!("{:#}", error))
  }
}

/// What the receive loop does after an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextState {
  Receive,
  Terminate,
}

/// The behavior of an actor.
///
/// Invocations for one actor are strictly sequential, so implementations can keep private mutable
/// state without locking. An `Err` (or a panic) while handling a success envelope ends the actor after
/// one best-effort failure envelope; the value returned for that failure envelope is ignored.
pub trait Receiver: Send + 'static {
  fn receive(&mut self, envelope: Envelope) -> ActorResult<NextState>;
}

impl<F> Receiver for F
where
  F: FnMut(Envelope) -> ActorResult<NextState> + Send + 'static,
{
  fn receive(&mut self, envelope: Envelope) -> ActorResult<NextState> {
    self(envelope)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anyhow_errors_keep_their_context() {
    let error = anyhow::anyhow!("disk full").context("writing journal");
    assert_eq!(
      ActorError::from(error),
      ActorError::of_failed("writing journal: disk full")
    );
  }

  #[test]
  fn mailbox_errors_convert() {
    let error: ActorError = MailboxError::Disconnected.into();
    assert_eq!(error.to_string(), "Actor mailbox failed: mailbox disconnected: no writer left");
  }
}
