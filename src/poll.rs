//! Bounded fixed-interval polling primitive
//!
//! The build pipeline has nothing else to do while a remote verdict is
//! computed, so the wait is deliberately synchronous: fetch, test for a
//! terminal state, sleep, retry. The attempt budget is the only bound on a
//! stuck wait. The sleep goes through an injectable [`Clock`] so tests can
//! simulate elapsed attempts without wall-clock delay.

use crate::core::config::RetryPolicy;
use crate::core::error::GateResult;
use std::time::Duration;

/// Injectable sleep source
pub trait Clock {
  fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeping via the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
  fn sleep(&self, duration: Duration) {
    std::thread::sleep(duration);
  }
}

/// Outcome of a bounded poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<S> {
  /// A terminal state was observed
  Terminal(S),
  /// The attempt budget was exhausted without a terminal state
  TimedOut { attempts: u32 },
}

/// Poll `fetch` until `is_terminal` holds or the attempt budget runs out.
///
/// Attempts are counted from 1. Each attempt fetches once and tests the
/// result; only non-final attempts sleep, so a policy with `max_attempts = 3`
/// performs exactly 3 fetches before timing out, never 4. A fetch error ends
/// the poll immediately — it is surfaced to the caller, not silently retried.
pub fn poll<S, F, P>(mut fetch: F, is_terminal: P, policy: &RetryPolicy, clock: &dyn Clock) -> GateResult<PollOutcome<S>>
where
  F: FnMut() -> GateResult<S>,
  P: Fn(&S) -> bool,
{
  for attempt in 1..=policy.max_attempts {
    let status = fetch()?;
    if is_terminal(&status) {
      return Ok(PollOutcome::Terminal(status));
    }
    if attempt < policy.max_attempts {
      clock.sleep(Duration::from_secs(policy.interval_secs));
    }
  }

  Ok(PollOutcome::TimedOut {
    attempts: policy.max_attempts,
  })
}
