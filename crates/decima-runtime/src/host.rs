//! Delayed-callback host for the drift-free scheduler

use decima_time::{Clock, Scheduler, Wakeup};
use tokio::task::JoinHandle;

/// Drive a scheduler on a tokio task.
///
/// Sleeps for each wake-up's delay, then fires it. The task ends as soon as
/// the scheduler stops or is restarted elsewhere.
pub fn spawn_scheduler<C>(scheduler: Scheduler<C>, first: Wakeup) -> JoinHandle<()>
where
    C: Clock + 'static,
{
    tokio::spawn(async move {
        let mut wakeup = first;
        loop {
            tokio::time::sleep(wakeup.delay).await;
            match scheduler.fire(wakeup.token) {
                Some(next) => wakeup = next,
                None => break,
            }
        }
        tracing::debug!(token = wakeup.token, "scheduler host finished");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokioClock;
    use decima_core::WallTime;
    use decima_time::{SchedulerConfig, SchedulerState};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_host_stops_with_scheduler() {
        let clock = TokioClock::starting_at(WallTime::MIDNIGHT);
        let scheduler = Scheduler::new(clock, SchedulerConfig::default());
        let calls = Arc::new(AtomicU32::new(0));

        let handle = scheduler.clone();
        let calls_cb = calls.clone();
        let first = scheduler.start(move |instant| {
            calls_cb.fetch_add(1, Ordering::SeqCst);
            if instant.second() >= 3 {
                handle.stop();
            }
        });

        let task = spawn_scheduler(scheduler.clone(), first);
        tokio::time::timeout(Duration::from_secs(10), task)
            .await
            .expect("host should exit once stopped")
            .expect("host task should not panic");

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        let fired = calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), fired);
    }
}
