use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies an actor, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
  pub(crate) fn next() -> Self {
    ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
  }

  pub fn value(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for ActorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "actor-{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_are_unique_and_increasing() {
    let first = ActorId::next();
    let second = ActorId::next();
    assert_ne!(first, second);
    assert!(first < second);
    assert_eq!(format!("{}", first), format!("actor-{}", first.value()));
  }
}
