//! Station - owns the clock face, stopwatch and timer and their tick tasks

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use decima_core::{CustomDuration, CustomInstant, DecimaError, DecimaResult};
use decima_time::{Clock, EngineConfig, Scheduler, SchedulerState, Stopwatch, Timer};

use crate::{spawn_scheduler, DisplayEvent};

/// Display event receiver
pub type DisplayReceiver = mpsc::Receiver<DisplayEvent>;

/// Runtime counters
#[derive(Clone, Debug, Default)]
pub struct StationStats {
    pub clock_starts: u64,
    pub stopwatch_starts: u64,
    pub timers_started: u64,
    pub timers_finished: u64,
    pub dropped_events: u64,
}

/// The three tick sources and the controllers behind them
///
/// Each source runs on its own task and only shares the event channel with
/// the others, so a misbehaving source cannot stall or kill the rest.
/// Pausing, stopping or resetting a source waits for its task to end, so no
/// tick from it is observed afterwards.
pub struct Station<C: Clock + Clone + 'static> {
    config: EngineConfig,
    events: mpsc::Sender<DisplayEvent>,
    scheduler: Scheduler<C>,
    clock_task: Option<JoinHandle<()>>,
    stopwatch: Arc<Mutex<Stopwatch<C>>>,
    stopwatch_task: Option<JoinHandle<()>>,
    timer: Arc<Mutex<Timer<C>>>,
    timer_task: Option<JoinHandle<()>>,
    stats: Arc<Mutex<StationStats>>,
}

impl<C: Clock + Clone + 'static> Station<C> {
    pub fn new(clock: C, config: EngineConfig) -> (Self, DisplayReceiver) {
        let (events, rx) = mpsc::channel(config.channel_capacity.max(1));
        let station = Station {
            scheduler: Scheduler::new(clock.clone(), config.scheduler.clone()),
            clock_task: None,
            stopwatch: Arc::new(Mutex::new(Stopwatch::new(clock.clone()))),
            stopwatch_task: None,
            timer: Arc::new(Mutex::new(Timer::new(clock))),
            timer_task: None,
            stats: Arc::new(Mutex::new(StationStats::default())),
            events,
            config,
        };
        (station, rx)
    }

    // --- Clock face ---

    /// Start the clock face. Restarts it if already running.
    pub async fn start_clock(&mut self) {
        self.stop_clock().await;

        // Render immediately rather than waiting for the first boundary
        self.publish(DisplayEvent::Clock(self.scheduler.sample()));

        let events = self.events.clone();
        let stats = self.stats.clone();
        let first = self.scheduler.start(move |instant: &CustomInstant| {
            if let Err(err) = events.try_send(DisplayEvent::Clock(*instant)) {
                stats.lock().dropped_events += 1;
                tracing::debug!(%err, "dropping clock event");
            }
        });
        self.clock_task = Some(spawn_scheduler(self.scheduler.clone(), first));
        self.stats.lock().clock_starts += 1;
        tracing::info!(delay = ?first.delay, "clock started");
    }

    pub async fn stop_clock(&mut self) {
        self.scheduler.stop();
        if let Some(task) = self.clock_task.take() {
            // Don't wait out a pending sleep; the stale wake-up would be ignored anyway
            task.abort();
            join_quietly("clock", task).await;
            tracing::info!("clock stopped");
        }
    }

    /// Current clock face value, sampled now
    pub fn clock_now(&self) -> CustomInstant {
        self.scheduler.sample()
    }

    pub fn clock_running(&self) -> bool {
        self.scheduler.state() == SchedulerState::Armed
    }

    // --- Stopwatch ---

    pub fn stopwatch_start(&mut self) {
        if self.stopwatch_task.is_some() {
            return;
        }
        self.stopwatch.lock().start();
        self.stats.lock().stopwatch_starts += 1;

        let stopwatch = self.stopwatch.clone();
        let events = self.events.clone();
        let period = self.config.stopwatch_interval;
        self.stopwatch_task = Some(tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                let elapsed = stopwatch.lock().elapsed();
                if events.send(DisplayEvent::Stopwatch(elapsed)).await.is_err() {
                    break; // Receiver dropped
                }
            }
        }));
    }

    pub async fn stopwatch_pause(&mut self) {
        if let Some(task) = self.stopwatch_task.take() {
            task.abort();
            join_quietly("stopwatch", task).await;
        }
        let elapsed = {
            let mut stopwatch = self.stopwatch.lock();
            stopwatch.pause();
            stopwatch.elapsed()
        };
        self.publish(DisplayEvent::Stopwatch(elapsed));
    }

    pub async fn stopwatch_reset(&mut self) {
        if let Some(task) = self.stopwatch_task.take() {
            task.abort();
            join_quietly("stopwatch", task).await;
        }
        self.stopwatch.lock().reset();
        self.publish(DisplayEvent::Stopwatch(CustomDuration::ZERO));
    }

    pub fn stopwatch_lap(&self) -> Option<CustomDuration> {
        self.stopwatch.lock().lap()
    }

    pub fn stopwatch_laps(&self) -> Vec<CustomDuration> {
        self.stopwatch.lock().laps().to_vec()
    }

    pub fn stopwatch_elapsed(&self) -> CustomDuration {
        self.stopwatch.lock().elapsed()
    }

    // --- Timer ---

    /// Register an extra finished notification alongside the display event
    pub fn on_timer_finished<F>(&self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.timer.lock().on_finished(callback);
    }

    /// Start a countdown. Returns false (and changes nothing) for a zero target.
    pub async fn timer_start(&mut self, hour: u64, minute: u64, second: u64) -> bool {
        self.halt_timer_task().await;
        let started = self.timer.lock().start(hour, minute, second);
        self.after_timer_start(started);
        started
    }

    /// Start a countdown from raw user-entered fields
    pub async fn timer_start_from_fields(
        &mut self,
        hour: &str,
        minute: &str,
        second: &str,
    ) -> bool {
        self.halt_timer_task().await;
        let started = self.timer.lock().start_from_fields(hour, minute, second);
        self.after_timer_start(started);
        started
    }

    pub async fn timer_pause(&mut self) {
        self.halt_timer_task().await;
        let (finished, remaining) = {
            let mut timer = self.timer.lock();
            let finished = timer.pause();
            (finished, timer.remaining())
        };
        self.publish(DisplayEvent::Timer(remaining));
        if finished {
            self.stats.lock().timers_finished += 1;
            self.publish(DisplayEvent::TimerFinished);
        }
    }

    pub async fn timer_resume(&mut self) -> bool {
        self.halt_timer_task().await;
        let resumed = self.timer.lock().resume();
        if resumed {
            self.spawn_timer_task();
        }
        resumed
    }

    pub async fn timer_reset(&mut self) {
        self.halt_timer_task().await;
        self.timer.lock().reset();
        self.publish(DisplayEvent::Timer(CustomDuration::ZERO));
    }

    pub fn timer_remaining(&self) -> CustomDuration {
        self.timer.lock().remaining()
    }

    fn after_timer_start(&mut self, started: bool) {
        if started {
            self.stats.lock().timers_started += 1;
        }
        // A rejected start leaves a running countdown as it was
        if self.timer.lock().is_running() {
            self.spawn_timer_task();
        }
    }

    fn spawn_timer_task(&mut self) {
        let timer = self.timer.clone();
        let events = self.events.clone();
        let stats = self.stats.clone();
        let period = self.config.timer_interval;
        self.timer_task = Some(tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                let tick = timer.lock().tick();
                if events.send(DisplayEvent::Timer(tick.remaining)).await.is_err() {
                    break;
                }
                if tick.finished {
                    stats.lock().timers_finished += 1;
                    let _ = events.send(DisplayEvent::TimerFinished).await;
                    break;
                }
            }
        }));
    }

    async fn halt_timer_task(&mut self) {
        if let Some(task) = self.timer_task.take() {
            task.abort();
            join_quietly("timer", task).await;
        }
    }

    // --- Lifecycle ---

    pub fn stats(&self) -> StationStats {
        self.stats.lock().clone()
    }

    /// Stop every source. Reports the first source whose task panicked.
    pub async fn shutdown(mut self) -> DecimaResult<()> {
        self.scheduler.stop();
        let mut failure = None;

        let tasks = [
            ("clock", self.clock_task.take()),
            ("stopwatch", self.stopwatch_task.take()),
            ("timer", self.timer_task.take()),
        ];
        for (name, task) in tasks {
            let Some(task) = task else { continue };
            task.abort();
            if let Err(err) = task.await {
                if err.is_panic() {
                    tracing::warn!(source = name, "tick task panicked");
                    failure.get_or_insert(DecimaError::TaskFailed(format!("{name}: {err}")));
                }
            }
        }

        tracing::info!(stats = ?self.stats(), "station shut down");
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn publish(&self, event: DisplayEvent) {
        if let Err(err) = self.events.try_send(event) {
            self.stats.lock().dropped_events += 1;
            tracing::debug!(%err, "dropping display event");
        }
    }
}

/// Wait for a tick task to end, logging abnormal exits
async fn join_quietly(name: &'static str, task: JoinHandle<()>) {
    match task.await {
        Ok(()) => {}
        Err(err) if err.is_cancelled() => {}
        Err(err) => tracing::warn!(source = name, %err, "tick task ended abnormally"),
    }
}
