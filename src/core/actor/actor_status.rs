use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Lifecycle of an actor: `Spawned -> Receiving -> Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ActorStatus {
  Spawned = 0,
  Receiving = 1,
  Terminated = 2,
}

/// Shared, atomically updated status of one actor.
#[derive(Debug, Clone)]
pub struct ActorStatusCell {
  current_status: Arc<AtomicU8>,
}

impl ActorStatusCell {
  pub fn new() -> Self {
    Self {
      current_status: Arc::new(AtomicU8::new(ActorStatus::Spawned.into())),
    }
  }

  pub fn get(&self) -> ActorStatus {
    let status = self.current_status.load(Ordering::Acquire);
    ActorStatus::try_from(status).unwrap_or(ActorStatus::Terminated)
  }

  /// Moves to `next`. `Terminated` is absorbing: returns false and leaves the status alone once reached.
  pub fn transition(&self, next: ActorStatus) -> bool {
    let terminated: u8 = ActorStatus::Terminated.into();
    self
      .current_status
      .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
        if current == terminated {
          None
        } else {
          Some(next.into())
        }
      })
      .is_ok()
  }

  pub fn is_terminated(&self) -> bool {
    self.get() == ActorStatus::Terminated
  }
}

impl Default for ActorStatusCell {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn follows_the_lifecycle() {
    let status = ActorStatusCell::new();
    assert_eq!(status.get(), ActorStatus::Spawned);
    assert!(status.transition(ActorStatus::Receiving));
    assert_eq!(status.get(), ActorStatus::Receiving);
    assert!(status.transition(ActorStatus::Terminated));
    assert!(status.is_terminated());
  }

  #[test]
  fn terminated_is_absorbing() {
    let status = ActorStatusCell::new();
    let shared = status.clone();
    assert!(status.transition(ActorStatus::Terminated));
    assert!(!shared.transition(ActorStatus::Receiving));
    assert!(!shared.transition(ActorStatus::Spawned));
    assert_eq!(status.get(), ActorStatus::Terminated);
  }

  #[test]
  fn converts_from_raw_values() {
    assert_eq!(ActorStatus::try_from(1u8).unwrap(), ActorStatus::Receiving);
    assert!(ActorStatus::try_from(9u8).is_err());
    assert_eq!(u8::from(ActorStatus::Terminated), 2);
  }
}
