use std::any::{type_name, Any};
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error;

use crate::core::dispatch::message::Message;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to downcast {actual} to {expected}")]
pub struct DowncastAnyMessageError {
  pub expected: &'static str,
  pub actual: &'static str,
}

/// An untyped, immutable message payload.
///
/// Cloning shares the payload. The runtime never looks inside; receivers branch on the type.
#[derive(Clone)]
pub struct AnyMessage {
  msg: Arc<dyn Message>,
  type_name: &'static str,
}

impl AnyMessage {
  /// Wraps `msg`. An `AnyMessage` passed in is returned as is, so re-posting a received message does
  /// not nest it.
  pub fn new<T>(msg: T) -> Self
  where
    T: Message, {
    if let Some(any_message) = (&msg as &dyn Any).downcast_ref::<AnyMessage>() {
      return any_message.clone();
    }
    Self {
      msg: Arc::new(msg),
      type_name: type_name::<T>(),
    }
  }

  // Explicit so the blanket `Message` impl on `Arc<dyn Message>` itself is never picked.
  fn payload(&self) -> &(dyn Any + Send + Sync) {
    <dyn Message as Message>::as_any(&*self.msg)
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn is<T>(&self) -> bool
  where
    T: Message, {
    self.payload().is::<T>()
  }

  pub fn downcast_ref<T>(&self) -> Option<&T>
  where
    T: Message, {
    self.payload().downcast_ref::<T>()
  }

  pub fn downcast<T>(&self) -> Result<Arc<T>, DowncastAnyMessageError>
  where
    T: Message, {
    <dyn Message as Message>::into_any(self.msg.clone())
      .downcast::<T>()
      .map_err(|_| DowncastAnyMessageError {
        expected: type_name::<T>(),
        actual: self.type_name,
      })
  }
}

impl Debug for AnyMessage {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "AnyMessage({:?})", self.msg)
  }
}

impl PartialEq for AnyMessage {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.msg, &other.msg)
  }
}
