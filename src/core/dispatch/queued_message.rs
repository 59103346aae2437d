use crate::core::actor::actor_ref::ActorRef;
use crate::core::actor::actor_system::ActorSystem;
use crate::core::dispatch::any_message::AnyMessage;
use crate::core::dispatch::envelope::Envelope;

/// A posted message waiting in a mailbox.
///
/// Holds no reference to the actor system: the receive loop stamps it into an [`Envelope`] on delivery.
/// Queued messages therefore never keep a dropped system alive.
#[derive(Debug, Clone)]
pub struct QueuedMessage {
  message: AnyMessage,
  self_ref: ActorRef,
  sender: ActorRef,
}

impl QueuedMessage {
  pub fn new(message: AnyMessage, self_ref: ActorRef, sender: ActorRef) -> Self {
    Self {
      message,
      self_ref,
      sender,
    }
  }

  pub fn message(&self) -> &AnyMessage {
    &self.message
  }

  pub fn sender(&self) -> &ActorRef {
    &self.sender
  }

  pub fn into_envelope(self, system: ActorSystem) -> Envelope {
    Envelope::of_success(self.message, system, self.self_ref, self.sender)
  }
}
