use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::dispatch::mailbox::{MailboxBehavior, MailboxError, MailboxReaderBehavior, MailboxWriterBehavior};
use crate::core::dispatch::queued_message::QueuedMessage;

/// Creates a mailbox and splits it into its two ends.
///
/// The writer is cloned into every address of the actor; the reader is owned by the actor's loop alone.
pub fn unbounded_mailbox() -> (UnboundedMailboxWriter, UnboundedMailboxReader) {
  let (tx, rx) = mpsc::unbounded_channel();
  let number_of_messages = Arc::new(AtomicUsize::new(0));
  (
    UnboundedMailboxWriter {
      tx,
      number_of_messages: number_of_messages.clone(),
    },
    UnboundedMailboxReader { rx, number_of_messages },
  )
}

#[derive(Debug, Clone)]
pub struct UnboundedMailboxWriter {
  tx: mpsc::UnboundedSender<QueuedMessage>,
  number_of_messages: Arc<AtomicUsize>,
}

#[derive(Debug)]
pub struct UnboundedMailboxReader {
  rx: mpsc::UnboundedReceiver<QueuedMessage>,
  number_of_messages: Arc<AtomicUsize>,
}

fn decrement(counter: &AtomicUsize) {
  let _ = counter.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| Some(n.saturating_sub(1)));
}

impl UnboundedMailboxWriter {
  pub fn is_closed(&self) -> bool {
    self.tx.is_closed()
  }
}

impl MailboxBehavior for UnboundedMailboxWriter {
  fn number_of_messages(&self) -> usize {
    self.number_of_messages.load(Ordering::Acquire)
  }
}

impl MailboxWriterBehavior for UnboundedMailboxWriter {
  fn enqueue(&self, message: QueuedMessage) -> Result<(), MailboxError> {
    self.number_of_messages.fetch_add(1, Ordering::AcqRel);
    self.tx.send(message).map_err(|_| {
      decrement(&self.number_of_messages);
      MailboxError::Closed
    })
  }
}

impl MailboxBehavior for UnboundedMailboxReader {
  fn number_of_messages(&self) -> usize {
    self.number_of_messages.load(Ordering::Acquire)
  }
}

#[async_trait::async_trait]
impl MailboxReaderBehavior for UnboundedMailboxReader {
  async fn dequeue(&mut self) -> Result<QueuedMessage, MailboxError> {
    let message = self.rx.recv().await.ok_or(MailboxError::Disconnected)?;
    decrement(&self.number_of_messages);
    Ok(message)
  }
}

impl UnboundedMailboxReader {
  /// Refuses further messages. Pending ones are never dequeued and are freed with the reader.
  pub fn close(&mut self) {
    self.rx.close();
    self.number_of_messages.store(0, Ordering::Release);
  }
}

impl Drop for UnboundedMailboxReader {
  fn drop(&mut self) {
    self.close();
  }
}
