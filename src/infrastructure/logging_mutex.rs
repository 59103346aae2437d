use std::fmt::Debug;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A `Mutex` that can trace who acquires it. Poisoned locks are recovered, not propagated.
#[derive(Debug)]
pub struct LoggingMutex<T: Debug> {
  inner: Mutex<T>,
  name: &'static str,
  log_output: bool,
}

impl<T: Debug> LoggingMutex<T> {
  pub fn new(name: &'static str, data: T) -> Self {
    LoggingMutex {
      inner: Mutex::new(data),
      name,
      log_output: false,
    }
  }

  pub fn with_log_output(mut self, log_output: bool) -> Self {
    self.log_output = log_output;
    self
  }

  pub fn lock_with_info(
    &self,
    function_name: &'static str,
    module_path: &'static str,
    file: &'static str,
    line: u32,
  ) -> MutexGuard<'_, T> {
    if self.log_output {
      log::debug!(
        "Attempting to lock: {} by {}:{} at {}:{}",
        self.name,
        function_name,
        module_path,
        file,
        line,
      );
    }
    let guard = self.inner.lock().unwrap_or_else(|poisoned: PoisonError<MutexGuard<'_, T>>| {
      log::warn!("Lock poisoned, recovering: {} by {}", self.name, function_name);
      poisoned.into_inner()
    });
    if self.log_output {
      log::debug!(
        "Lock acquired: {} by {}:{} at {}:{}",
        self.name,
        function_name,
        module_path,
        file,
        line,
      );
    }
    guard
  }
}

#[macro_export]
macro_rules! mutex_lock_with_log {
  ($mutex:expr, $fname:expr) => {
    $mutex.lock_with_info($fname, module_path!(), file!(), line!())
  };
}

impl<T: Debug> Drop for LoggingMutex<T> {
  fn drop(&mut self) {
    if self.log_output {
      log::debug!("Lock dropped: name = {}", self.name);
    }
  }
}
