use crate::core::actor::actor_ref::ActorRef;
use crate::core::actor::actor_system::ActorSystem;
use crate::core::actor::ActorError;
use crate::core::dispatch::any_message::AnyMessage;

/// The unit of work handed to a receiver.
#[derive(Debug, Clone)]
pub enum Envelope {
  Success(SuccessEnvelope),
  Failure(FailureEnvelope),
}

/// A delivered message together with its addressing.
#[derive(Debug, Clone)]
pub struct SuccessEnvelope {
  message: AnyMessage,
  system: ActorSystem,
  self_ref: ActorRef,
  sender: ActorRef,
}

/// The error that aborted the receiving actor.
#[derive(Debug, Clone)]
pub struct FailureEnvelope {
  cause: ActorError,
  system: ActorSystem,
}

impl Envelope {
  pub fn of_success(message: AnyMessage, system: ActorSystem, self_ref: ActorRef, sender: ActorRef) -> Self {
    Envelope::Success(SuccessEnvelope {
      message,
      system,
      self_ref,
      sender,
    })
  }

  pub fn of_failure(cause: ActorError, system: ActorSystem) -> Self {
    Envelope::Failure(FailureEnvelope { cause, system })
  }

  pub fn system(&self) -> &ActorSystem {
    match self {
      Envelope::Success(success) => &success.system,
      Envelope::Failure(failure) => &failure.system,
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, Envelope::Success(_))
  }

  pub fn is_failure(&self) -> bool {
    matches!(self, Envelope::Failure(_))
  }
}

impl SuccessEnvelope {
  pub fn message(&self) -> &AnyMessage {
    &self.message
  }

  pub fn system(&self) -> &ActorSystem {
    &self.system
  }

  pub fn self_ref(&self) -> &ActorRef {
    &self.self_ref
  }

  pub fn sender(&self) -> &ActorRef {
    &self.sender
  }
}

impl FailureEnvelope {
  pub fn cause(&self) -> &ActorError {
    &self.cause
  }

  pub fn system(&self) -> &ActorSystem {
    &self.system
  }
}
