use std::time::Duration;

use serde_with::serde_as;
use serde_with::DurationMilliSeconds;

/// Round clock. Time only accrues through `advanced`, which an external
/// scheduler drives; nothing here reads the wall clock.
///
/// `epoch` identifies one run of the clock. Every start issues a fresh epoch,
/// and ticks stamped with an older epoch are dropped, so a scheduler left over
/// from a previous round can never move the current clock.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    pub epoch: u64,
    pub running: bool,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Zeroed and stopped, with an epoch that no pending tick can match.
    pub fn reset(&self) -> TimerState {
        TimerState {
            epoch: self.epoch + 1,
            running: false,
            elapsed: Duration::ZERO,
        }
    }

    pub fn started(&self) -> TimerState {
        if self.running {
            return self.clone();
        }
        let mut new_state = self.clone();
        new_state.epoch += 1;
        new_state.running = true;
        new_state
    }

    pub fn stopped(&self) -> TimerState {
        let mut new_state = self.clone();
        new_state.running = false;
        new_state
    }

    pub fn advanced(&self, epoch: u64, delta: Duration) -> TimerState {
        let mut new_state = self.clone();
        if self.running && self.epoch == epoch {
            new_state.elapsed = new_state.elapsed.saturating_add(delta);
        }
        new_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_only_while_running() {
        let timer = TimerState::default();
        let idle = timer.advanced(timer.epoch, Duration::from_millis(250));
        assert_eq!(idle.elapsed(), Duration::ZERO);

        let running = timer.started();
        let running = running.advanced(running.epoch, Duration::from_millis(250));
        let running = running.advanced(running.epoch, Duration::from_millis(250));
        assert_eq!(running.elapsed(), Duration::from_millis(500));

        let stopped = running.stopped();
        let stopped = stopped.advanced(stopped.epoch, Duration::from_secs(3));
        assert_eq!(stopped.elapsed(), Duration::from_millis(500));
    }

    #[test]
    fn test_stale_epoch_is_ignored() {
        let first = TimerState::default().started();
        let stale_epoch = first.epoch;
        let second = first.reset().started();

        let after = second.advanced(stale_epoch, Duration::from_secs(1));
        assert_eq!(after.elapsed(), Duration::ZERO);

        let after = after.advanced(second.epoch, Duration::from_secs(1));
        assert_eq!(after.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn test_start_is_idempotent() {
        let timer = TimerState::default().started();
        let again = timer.started();
        assert_eq!(timer, again);
    }

    #[test]
    fn test_serializes_elapsed_as_millis() {
        let timer = TimerState {
            epoch: 2,
            running: false,
            elapsed: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["elapsed"], 1500);
    }
}
