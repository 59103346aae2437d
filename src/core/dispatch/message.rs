use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Anything that can be posted to an actor.
pub trait Message: Any + Debug + Send + Sync {
  fn as_any(&self) -> &(dyn Any + Send + Sync);
  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Debug + Send + Sync> Message for T {
  fn as_any(&self) -> &(dyn Any + Send + Sync) {
    self
  }

  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
    self
  }
}
