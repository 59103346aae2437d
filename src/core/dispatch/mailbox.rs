use crate::core::dispatch::queued_message::QueuedMessage;
use thiserror::Error;

pub mod unbounded_mailbox;

pub use unbounded_mailbox::{unbounded_mailbox, UnboundedMailboxReader, UnboundedMailboxWriter};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MailboxError {
  /// Every writer is gone, so no envelope can ever arrive.
  #[error("mailbox disconnected: no writer left")]
  Disconnected,
  /// The owning actor released its mailbox.
  #[error("mailbox closed: the actor has terminated")]
  Closed,
}

pub trait MailboxBehavior {
  /// Messages enqueued but not yet dequeued.
  fn number_of_messages(&self) -> usize;

  fn has_messages(&self) -> bool {
    self.number_of_messages() > 0
  }
}

#[async_trait::async_trait]
pub trait MailboxReaderBehavior: MailboxBehavior {
  /// Suspends until a message is available.
  async fn dequeue(&mut self) -> Result<QueuedMessage, MailboxError>;
}

pub trait MailboxWriterBehavior: MailboxBehavior {
  /// Never blocks: the mailbox is unbounded.
  fn enqueue(&self, message: QueuedMessage) -> Result<(), MailboxError>;
}
