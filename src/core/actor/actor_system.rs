use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::panic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use tokio::runtime::{Builder, Handle, Runtime};

use crate::core::actor::actor_cell::ActorCell;
use crate::core::actor::actor_id::ActorId;
use crate::core::actor::actor_ref::local_actor_ref::LocalActorRef;
use crate::core::actor::actor_ref::ActorRef;
use crate::core::actor::actor_registry::ActorRegistry;
use crate::core::actor::actor_status::{ActorStatus, ActorStatusCell};
use crate::core::actor::actor_system_config::ActorSystemConfig;
use crate::core::actor::Receiver;
use crate::core::dispatch::mailbox::unbounded_mailbox;
use crate::infrastructure::logging_mutex::LoggingMutex;
use crate::{mutex_lock_with_log, ActuatorError};

static SYSTEM_COUNTER: AtomicU64 = AtomicU64::new(0);

thread_local! {
  // Set on every thread a system's runtime starts.
  static WORKER_OF: Cell<Option<u64>> = Cell::new(None);
}

struct ActorSystemInner {
  id: u64,
  config: ActorSystemConfig,
  start_time: Instant,
  runtime: LoggingMutex<Option<Runtime>>,
  registry: Arc<ActorRegistry>,
}

impl Drop for ActorSystemInner {
  fn drop(&mut self) {
    let runtime = mutex_lock_with_log!(self.runtime, "drop").take();
    if let Some(runtime) = runtime {
      log::debug!("{}: dropped without shutdown, stopping in the background", self.config.name());
      runtime.shutdown_background();
    }
  }
}

/// Owns the pool of tasks actors run on, spawns actors and shuts them down.
///
/// Cloning is cheap and every clone is the same system. Envelopes carry a clone so receivers can spawn;
/// it is stamped on delivery, so only running invocations hold one. Dropping the last clone outside a
/// receiver stops the system's actors.
#[derive(Clone)]
pub struct ActorSystem {
  inner: Arc<ActorSystemInner>,
}

/// A non-owning reference to an `ActorSystem`, held by actors and their addresses.
#[derive(Clone)]
pub struct WeakActorSystem {
  inner: Weak<ActorSystemInner>,
}

impl WeakActorSystem {
  pub fn upgrade(&self) -> Option<ActorSystem> {
    self.inner.upgrade().map(|inner| ActorSystem { inner })
  }
}

impl Debug for WeakActorSystem {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str("WeakActorSystem")
  }
}

impl Debug for ActorSystem {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActorSystem")
      .field("name", &self.inner.config.name())
      .field("actors", &self.inner.registry.len())
      .finish()
  }
}

impl PartialEq for ActorSystem {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl ActorSystem {
  pub fn new() -> Result<Self, ActuatorError> {
    Self::with_config(ActorSystemConfig::default())
  }

  pub fn with_config(config: ActorSystemConfig) -> Result<Self, ActuatorError> {
    let id = SYSTEM_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut builder = Builder::new_multi_thread();
    builder
      .enable_all()
      .thread_name(format!("{}-worker", config.name()))
      .on_thread_start(move || WORKER_OF.with(|worker_of| worker_of.set(Some(id))));
    match config.worker_threads() {
      Some(0) => {
        return Err(ActuatorError::InvalidConfig {
          key: "worker_threads",
          message: "must be greater than zero".to_string(),
        })
      }
      Some(worker_threads) => {
        builder.worker_threads(worker_threads);
      }
      None => {}
    }
    let runtime = builder.build()?;
    log::info!("{}: started", config.name());
    let runtime = LoggingMutex::new("ActorSystem#runtime", Some(runtime)).with_log_output(config.trace_locks());
    Ok(Self {
      inner: Arc::new(ActorSystemInner {
        id,
        config,
        start_time: Instant::now(),
        runtime,
        registry: Arc::new(ActorRegistry::new()),
      }),
    })
  }

  pub fn name(&self) -> &str {
    self.inner.config.name()
  }

  pub fn config(&self) -> &ActorSystemConfig {
    &self.inner.config
  }

  pub fn up_time(&self) -> Duration {
    self.inner.start_time.elapsed()
  }

  /// Actors spawned and not yet terminated.
  pub fn number_of_actors(&self) -> usize {
    self.inner.registry.len()
  }

  pub fn status_of(&self, id: &ActorId) -> Option<ActorStatus> {
    self.inner.registry.status_of(id)
  }

  pub fn is_terminated(&self) -> bool {
    mutex_lock_with_log!(self.inner.runtime, "is_terminated").is_none()
  }

  pub fn downgrade(&self) -> WeakActorSystem {
    WeakActorSystem {
      inner: Arc::downgrade(&self.inner),
    }
  }

  /// Creates an actor running `receiver` and schedules its loop. Returns without waiting for it.
  ///
  /// Spawning after `shutdown` is a caller error: it is logged and yields `ActorRef::NoSender`.
  pub fn spawn<R>(&self, receiver: R) -> ActorRef
  where
    R: Receiver, {
    let runtime_guard = mutex_lock_with_log!(self.inner.runtime, "spawn");
    let runtime = match runtime_guard.as_ref() {
      Some(runtime) => runtime,
      None => {
        log::warn!("{}: spawn after shutdown, actor not started", self.name());
        return ActorRef::NoSender;
      }
    };

    let id = ActorId::next();
    let (writer, reader) = unbounded_mailbox();
    let status = ActorStatusCell::new();
    self.inner.registry.register(id, status.clone());

    let actor_cell = ActorCell::new(
      id,
      reader,
      Box::new(receiver),
      status.clone(),
      self.downgrade(),
      self.inner.registry.clone(),
    );
    runtime.spawn(actor_cell.run());
    log::debug!("{}: spawned {}", self.name(), id);

    ActorRef::of_local(LocalActorRef::new(id, writer, status))
  }

  /// `shutdown_timeout` with the configured grace period.
  pub fn shutdown(&self) -> Result<(), ActuatorError> {
    self.shutdown_timeout(self.inner.config.shutdown_grace_period())
  }

  /// Stops accepting actors and waits up to `grace_period` for the running ones to terminate on their
  /// own. Actors still waiting for a message after that are interrupted: each gets one
  /// `ActorError::Interrupted` failure envelope, with the configured interrupt grace period to handle it.
  /// Whatever is still running then is cancelled without notice.
  ///
  /// Blocks the calling thread. Refused from the system's own workers, hence from its receivers. Called
  /// from another tokio runtime, the wait runs on a helper thread.
  pub fn shutdown_timeout(&self, grace_period: Duration) -> Result<(), ActuatorError> {
    if self.is_own_worker() {
      return Err(ActuatorError::ShutdownFromOwnWorker);
    }
    let runtime = mutex_lock_with_log!(self.inner.runtime, "shutdown_timeout")
      .take()
      .ok_or(ActuatorError::AlreadyShutdown)?;
    log::info!(
      "{}: shutting down, {} actors running, grace period {:?}",
      self.name(),
      self.number_of_actors(),
      grace_period
    );

    if Handle::try_current().is_ok() {
      // Blocking on our runtime is not allowed inside another one.
      thread::scope(|scope| {
        scope
          .spawn(|| self.stop(runtime, grace_period))
          .join()
          .unwrap_or_else(|payload| panic::resume_unwind(payload))
      });
    } else {
      self.stop(runtime, grace_period);
    }
    Ok(())
  }

  fn is_own_worker(&self) -> bool {
    WORKER_OF.with(|worker_of| worker_of.get() == Some(self.inner.id))
  }

  fn stop(&self, runtime: Runtime, grace_period: Duration) {
    let registry = self.inner.registry.clone();
    if runtime.block_on(registry.wait_until_empty(grace_period)) {
      runtime.shutdown_timeout(grace_period);
      log::info!("{}: shut down", self.name());
      return;
    }

    let interrupt_grace_period = self.inner.config.interrupt_grace_period();
    log::warn!(
      "{}: {} actors still running after {:?}, interrupting",
      self.name(),
      self.number_of_actors(),
      grace_period
    );
    registry.interrupt();
    if !runtime.block_on(registry.wait_until_empty(interrupt_grace_period)) {
      log::warn!(
        "{}: {} actors still running after the interrupt, cancelling",
        self.name(),
        self.number_of_actors()
      );
    }
    runtime.shutdown_background();
    log::info!("{}: shut down", self.name());
  }
}
