use std::time::Duration;

use config::{Config, ConfigError};

use crate::ActuatorError;

const NAME_KEY: &str = "actor_system.name";
const WORKER_THREADS_KEY: &str = "actor_system.worker_threads";
const SHUTDOWN_GRACE_PERIOD_KEY: &str = "actor_system.shutdown_grace_period_ms";
const INTERRUPT_GRACE_PERIOD_KEY: &str = "actor_system.interrupt_grace_period_ms";
const TRACE_LOCKS_KEY: &str = "actor_system.trace_locks";

pub const DEFAULT_NAME: &str = "actuator";
pub const DEFAULT_SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_millis(1000);
pub const DEFAULT_INTERRUPT_GRACE_PERIOD: Duration = Duration::from_millis(100);

/// Settings of an `ActorSystem`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorSystemConfig {
  name: String,
  worker_threads: Option<usize>,
  shutdown_grace_period: Duration,
  interrupt_grace_period: Duration,
  trace_locks: bool,
}

impl Default for ActorSystemConfig {
  fn default() -> Self {
    Self {
      name: DEFAULT_NAME.to_string(),
      worker_threads: None,
      shutdown_grace_period: DEFAULT_SHUTDOWN_GRACE_PERIOD,
      interrupt_grace_period: DEFAULT_INTERRUPT_GRACE_PERIOD,
      trace_locks: false,
    }
  }
}

impl ActorSystemConfig {
  /// Reads the `actor_system.*` keys. Absent keys keep their defaults.
  pub fn from_config(config: &Config) -> Result<Self, ActuatorError> {
    let mut result = Self::default();
    if let Some(name) = optional(config.get_str(NAME_KEY))? {
      result = result.with_name(name);
    }
    if let Some(worker_threads) = optional(config.get_int(WORKER_THREADS_KEY))? {
      let worker_threads = usize::try_from(worker_threads)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ActuatorError::InvalidConfig {
          key: WORKER_THREADS_KEY,
          message: format!("expected a positive integer, got {}", worker_threads),
        })?;
      result = result.with_worker_threads(worker_threads);
    }
    if let Some(grace_period) = optional(config.get_int(SHUTDOWN_GRACE_PERIOD_KEY))? {
      result = result.with_shutdown_grace_period(millis(SHUTDOWN_GRACE_PERIOD_KEY, grace_period)?);
    }
    if let Some(grace_period) = optional(config.get_int(INTERRUPT_GRACE_PERIOD_KEY))? {
      result = result.with_interrupt_grace_period(millis(INTERRUPT_GRACE_PERIOD_KEY, grace_period)?);
    }
    if let Some(trace_locks) = optional(config.get_bool(TRACE_LOCKS_KEY))? {
      result = result.with_trace_locks(trace_locks);
    }
    Ok(result)
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
    self.worker_threads = Some(worker_threads);
    self
  }

  pub fn with_shutdown_grace_period(mut self, shutdown_grace_period: Duration) -> Self {
    self.shutdown_grace_period = shutdown_grace_period;
    self
  }

  pub fn with_interrupt_grace_period(mut self, interrupt_grace_period: Duration) -> Self {
    self.interrupt_grace_period = interrupt_grace_period;
    self
  }

  /// Logs every acquisition of the system's internal locks at debug level.
  pub fn with_trace_locks(mut self, trace_locks: bool) -> Self {
    self.trace_locks = trace_locks;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// `None` leaves the choice to tokio (one per core).
  pub fn worker_threads(&self) -> Option<usize> {
    self.worker_threads
  }

  pub fn shutdown_grace_period(&self) -> Duration {
    self.shutdown_grace_period
  }

  /// How long interrupted actors get to handle their failure envelope during a forced shutdown.
  pub fn interrupt_grace_period(&self) -> Duration {
    self.interrupt_grace_period
  }

  pub fn trace_locks(&self) -> bool {
    self.trace_locks
  }
}

fn millis(key: &'static str, value: i64) -> Result<Duration, ActuatorError> {
  u64::try_from(value)
    .map(Duration::from_millis)
    .map_err(|_| ActuatorError::InvalidConfig {
      key,
      message: format!("expected a non-negative number of milliseconds, got {}", value),
    })
}

fn optional<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ActuatorError> {
  match value {
    Ok(value) => Ok(Some(value)),
    Err(ConfigError::NotFound(_)) => Ok(None),
    Err(error) => Err(error.into()),
  }
}
