use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::watch;

use crate::core::actor::actor_id::ActorId;
use crate::core::actor::actor_registry::ActorRegistry;
use crate::core::actor::actor_status::{ActorStatus, ActorStatusCell};
use crate::core::actor::actor_system::WeakActorSystem;
use crate::core::actor::{ActorError, ActorResult, NextState, Receiver};
use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::mailbox::{MailboxReaderBehavior, UnboundedMailboxReader};
use crate::core::dispatch::queued_message::QueuedMessage;

/// The runnable part of an actor: its mailbox reader and its receiver.
///
/// Lives inside exactly one task. Dropping it, on normal exit or on forced cancellation, marks the actor
/// terminated, closes the mailbox and removes it from the registry.
pub(crate) struct ActorCell {
  id: ActorId,
  mailbox: UnboundedMailboxReader,
  receiver: Box<dyn Receiver>,
  status: ActorStatusCell,
  system: WeakActorSystem,
  registry: Arc<ActorRegistry>,
  interrupt: watch::Receiver<bool>,
}

impl ActorCell {
  pub fn new(
    id: ActorId,
    mailbox: UnboundedMailboxReader,
    receiver: Box<dyn Receiver>,
    status: ActorStatusCell,
    system: WeakActorSystem,
    registry: Arc<ActorRegistry>,
  ) -> Self {
    let interrupt = registry.subscribe_interrupt();
    Self {
      id,
      mailbox,
      receiver,
      status,
      system,
      registry,
      interrupt,
    }
  }

  pub async fn run(mut self) {
    self.status.transition(ActorStatus::Receiving);
    let cause = loop {
      let queued = match self.next_message().await {
        Ok(queued) => queued,
        Err(cause) => break cause,
      };
      let envelope = match self.system.upgrade() {
        Some(system) => queued.into_envelope(system),
        None => {
          log::debug!("{}: actor system is gone, stopping", self.id);
          return;
        }
      };
      match self.invoke(envelope) {
        Ok(NextState::Receive) => {}
        Ok(NextState::Terminate) => {
          log::debug!("{}: terminated by its receiver", self.id);
          return;
        }
        Err(cause) => break cause,
      }
    };
    if cause == ActorError::Interrupted {
      log::debug!("{}: interrupted by shutdown", self.id);
    } else {
      log::warn!("{}: aborted: {}", self.id, cause);
    }
    self.notify_failure(cause);
  }

  // A raised interrupt wins over queued messages.
  async fn next_message(&mut self) -> ActorResult<QueuedMessage> {
    tokio::select! {
      biased;
      _ = interrupted(&mut self.interrupt) => Err(ActorError::Interrupted),
      result = self.mailbox.dequeue() => result.map_err(ActorError::from),
    }
  }

  // Best effort: the actor terminates whatever the receiver answers.
  fn notify_failure(&mut self, cause: ActorError) {
    let system = match self.system.upgrade() {
      Some(system) => system,
      None => {
        log::debug!("{}: actor system is gone, failure not delivered", self.id);
        return;
      }
    };
    match self.invoke(Envelope::of_failure(cause, system)) {
      Ok(next_state) => log::debug!("{}: failure handled ({:?}), terminating", self.id, next_state),
      Err(error) => log::debug!("{}: failure handler failed, ignored: {}", self.id, error),
    }
  }

  fn invoke(&mut self, envelope: Envelope) -> ActorResult<NextState> {
    let receiver = &mut self.receiver;
    panic::catch_unwind(AssertUnwindSafe(|| receiver.receive(envelope))).unwrap_or_else(|payload| {
      Err(ActorError::ActorPanicked {
        message: panic_message(payload.as_ref()),
      })
    })
  }
}

impl Drop for ActorCell {
  fn drop(&mut self) {
    self.mailbox.close();
    self.registry.deregister(&self.id);
    self.status.transition(ActorStatus::Terminated);
    log::debug!("{}: released", self.id);
  }
}

async fn interrupted(interrupt: &mut watch::Receiver<bool>) {
  loop {
    let raised = *interrupt.borrow_and_update();
    if raised {
      return;
    }
    if interrupt.changed().await.is_err() {
      // The registry is gone, nobody can raise it any more.
      std::future::pending::<()>().await;
    }
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "non-string panic payload".to_string()
  }
}
