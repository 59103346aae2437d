//! Two actors echoing "hello" back and forth until the system is shut down.
//!
//! Run with `RUST_LOG=info cargo run --example ping_pong`.
use std::thread;
use std::time::Duration;

use actuator_lite::{ActorResult, ActorSystem, Envelope, FailureEnvelope, NextState, Receiver, SuccessEnvelope};

#[derive(Default)]
struct CountingEcho {
  counter: u32,
}

impl CountingEcho {
  fn success(&mut self, ok: SuccessEnvelope) -> NextState {
    match ok.message().downcast_ref::<String>() {
      Some(value) => {
        log::info!("ref 1 {} {}", value, self.counter);
        self.counter += 1;
        ok.sender().post_with_sender(ok.message().clone(), ok.self_ref().clone());
      }
      None => log::info!("default 1 {:?}", ok.message()),
    }
    NextState::Receive
  }

  fn failure(&mut self, error: FailureEnvelope) -> NextState {
    log::warn!("failure 1 {}", error.cause());
    NextState::Terminate
  }
}

impl Receiver for CountingEcho {
  fn receive(&mut self, envelope: Envelope) -> ActorResult<NextState> {
    Ok(match envelope {
      Envelope::Success(ok) => self.success(ok),
      Envelope::Failure(error) => self.failure(error),
    })
  }
}

fn echo(envelope: Envelope) -> ActorResult<NextState> {
  match envelope {
    Envelope::Success(ok) => {
      match ok.message().downcast_ref::<String>() {
        Some(value) => {
          log::info!("ref 2 {}", value);
          ok.sender().post_with_sender(ok.message().clone(), ok.self_ref().clone());
        }
        None => log::info!("default 2 {:?}", ok.message()),
      }
      Ok(NextState::Receive)
    }
    Envelope::Failure(error) => {
      log::warn!("failure 2 {}", error.cause());
      Ok(NextState::Terminate)
    }
  }
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let system = ActorSystem::new()?;
  let ref1 = system.spawn(CountingEcho::default());
  let ref2 = system.spawn(echo);
  ref1.post_with_sender("hello".to_string(), ref2);

  thread::sleep(Duration::from_millis(100));

  system.shutdown()?;
  Ok(())
}
