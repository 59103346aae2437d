use crate::core::actor::actor_id::ActorId;
use crate::core::actor::actor_ref::local_actor_ref::LocalActorRef;
use crate::core::actor::actor_status::ActorStatus;
use crate::core::dispatch::any_message::AnyMessage;
use crate::core::dispatch::message::Message;

pub mod local_actor_ref;

/// An address messages can be posted to.
///
/// `post` never blocks and never fails, whether or not the target is still running.
#[derive(Debug, Clone, PartialEq)]
pub enum ActorRef {
  /// Inert sink: discards everything. The sender of envelopes posted without one.
  NoSender,
  /// Bound to one actor's mailbox.
  Local(LocalActorRef),
}

impl Default for ActorRef {
  fn default() -> Self {
    ActorRef::NoSender
  }
}

impl ActorRef {
  pub fn of_no_sender() -> Self {
    ActorRef::NoSender
  }

  pub(crate) fn of_local(local_ref: LocalActorRef) -> Self {
    ActorRef::Local(local_ref)
  }

  /// Posts `message` with `ActorRef::NoSender` as the sender.
  pub fn post<M>(&self, message: M) -> &Self
  where
    M: Message, {
    self.post_with_sender(message, ActorRef::NoSender)
  }

  pub fn post_with_sender<M>(&self, message: M, sender: ActorRef) -> &Self
  where
    M: Message, {
    let cloned_self = self.clone();
    match self {
      ActorRef::NoSender => {}
      ActorRef::Local(local_ref) => local_ref.post(cloned_self, AnyMessage::new(message), sender),
    }
    self
  }

  pub fn is_no_sender(&self) -> bool {
    matches!(self, ActorRef::NoSender)
  }

  pub fn as_local(&self) -> Option<&LocalActorRef> {
    match self {
      ActorRef::Local(local_ref) => Some(local_ref),
      ActorRef::NoSender => None,
    }
  }

  pub fn id(&self) -> Option<ActorId> {
    self.as_local().map(LocalActorRef::id)
  }

  pub fn status(&self) -> Option<ActorStatus> {
    self.as_local().map(LocalActorRef::status)
  }

  pub fn is_terminated(&self) -> bool {
    self.status() == Some(ActorStatus::Terminated)
  }

  pub fn number_of_messages(&self) -> usize {
    self.as_local().map_or(0, LocalActorRef::number_of_messages)
  }

  pub fn has_messages(&self) -> bool {
    self.number_of_messages() > 0
  }
}
