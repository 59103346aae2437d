use std::fmt::{Debug, Formatter};

use crate::core::actor::actor_id::ActorId;
use crate::core::actor::actor_ref::ActorRef;
use crate::core::actor::actor_status::{ActorStatus, ActorStatusCell};
use crate::core::dispatch::any_message::AnyMessage;
use crate::core::dispatch::mailbox::{MailboxBehavior, MailboxWriterBehavior, UnboundedMailboxWriter};
use crate::core::dispatch::queued_message::QueuedMessage;

/// A live handle on an actor spawned in this process.
#[derive(Clone)]
pub struct LocalActorRef {
  id: ActorId,
  mailbox: UnboundedMailboxWriter,
  status: ActorStatusCell,
}

impl Debug for LocalActorRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LocalActorRef")
      .field("id", &self.id)
      .field("status", &self.status.get())
      .finish()
  }
}

impl PartialEq for LocalActorRef {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl LocalActorRef {
  pub(crate) fn new(id: ActorId, mailbox: UnboundedMailboxWriter, status: ActorStatusCell) -> Self {
    Self { id, mailbox, status }
  }

  pub fn id(&self) -> ActorId {
    self.id
  }

  pub fn status(&self) -> ActorStatus {
    self.status.get()
  }

  pub fn number_of_messages(&self) -> usize {
    self.mailbox.number_of_messages()
  }

  /// Enqueues without waiting. A terminated actor, or one whose system is gone, discards the message.
  pub(crate) fn post(&self, self_ref: ActorRef, message: AnyMessage, sender: ActorRef) {
    if let Err(error) = self.mailbox.enqueue(QueuedMessage::new(message, self_ref, sender)) {
      log::debug!("{}: {}, message discarded", self.id, error);
    }
  }
}
