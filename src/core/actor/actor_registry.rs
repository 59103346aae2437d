use std::fmt::{Debug, Formatter};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{watch, Notify};

use crate::core::actor::actor_id::ActorId;
use crate::core::actor::actor_status::{ActorStatus, ActorStatusCell};

/// Live actors of one system. An actor is registered at spawn and removed when its loop is dropped.
///
/// Also carries the interrupt raised by a forced shutdown. It is sticky: once raised, every later
/// dequeue of every actor fails.
pub(crate) struct ActorRegistry {
  actors: DashMap<ActorId, ActorStatusCell>,
  drained: Notify,
  interrupt: watch::Sender<bool>,
}

impl Debug for ActorRegistry {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActorRegistry").field("actors", &self.actors.len()).finish()
  }
}

impl ActorRegistry {
  pub fn new() -> Self {
    let (interrupt, _) = watch::channel(false);
    Self {
      actors: DashMap::new(),
      drained: Notify::new(),
      interrupt,
    }
  }

  pub fn register(&self, id: ActorId, status: ActorStatusCell) {
    self.actors.insert(id, status);
  }

  pub fn deregister(&self, id: &ActorId) {
    self.actors.remove(id);
    if self.actors.is_empty() {
      self.drained.notify_waiters();
    }
  }

  pub fn len(&self) -> usize {
    self.actors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actors.is_empty()
  }

  pub fn status_of(&self, id: &ActorId) -> Option<ActorStatus> {
    self.actors.get(id).map(|entry| entry.value().get())
  }

  pub fn subscribe_interrupt(&self) -> watch::Receiver<bool> {
    self.interrupt.subscribe()
  }

  pub fn interrupt(&self) {
    self.interrupt.send_replace(true);
  }

  /// Resolves once no actor is registered, or returns false after `timeout`.
  pub async fn wait_until_empty(&self, timeout: Duration) -> bool {
    let drained = async {
      loop {
        let notified = self.drained.notified();
        if self.actors.is_empty() {
          break;
        }
        notified.await;
      }
    };
    tokio::time::timeout(timeout, drained).await.is_ok()
  }
}
