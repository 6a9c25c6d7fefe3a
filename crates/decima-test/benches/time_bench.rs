//! Benchmarks for Decima time engine operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use decima_core::{duration_from_elapsed_millis, hand_angles, instant_from_real_time, WallTime};
use decima_time::{next_delay, ManualClock, Scheduler, SchedulerConfig, Stopwatch};

fn bench_instant_from_real_time(c: &mut Criterion) {
    let wall = WallTime::from_millis_of_day(45_296_789);

    c.bench_function("instant_from_real_time", |b| {
        b.iter(|| instant_from_real_time(black_box(wall)))
    });
}

fn bench_duration_from_elapsed(c: &mut Criterion) {
    c.bench_function("duration_from_elapsed_millis", |b| {
        b.iter(|| duration_from_elapsed_millis(black_box(123_456_789)))
    });
}

fn bench_hand_angles(c: &mut Criterion) {
    let instant = instant_from_real_time(WallTime::from_millis_of_day(45_296_789));

    c.bench_function("hand_angles", |b| b.iter(|| hand_angles(black_box(&instant))));
}

fn bench_next_delay(c: &mut Criterion) {
    let instant = instant_from_real_time(WallTime::from_millis_of_day(45_296_789));
    let config = SchedulerConfig::default();

    c.bench_function("next_delay", |b| {
        b.iter(|| next_delay(black_box(&instant), black_box(&config)))
    });
}

fn bench_scheduler_fire(c: &mut Criterion) {
    let clock = ManualClock::new();
    let scheduler = Scheduler::new(clock.clone(), SchedulerConfig::default());
    let mut wakeup = scheduler.start(|instant| {
        black_box(instant);
    });

    c.bench_function("scheduler_fire", |b| {
        b.iter(|| {
            clock.advance(wakeup.delay);
            if let Some(next) = scheduler.fire(wakeup.token) {
                wakeup = next;
            }
        })
    });
}

fn bench_stopwatch_elapsed(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut stopwatch = Stopwatch::new(clock.clone());
    stopwatch.start();

    c.bench_function("stopwatch_elapsed", |b| {
        b.iter(|| {
            clock.advance(std::time::Duration::from_millis(10));
            black_box(stopwatch.elapsed())
        })
    });
}

criterion_group!(
    benches,
    bench_instant_from_real_time,
    bench_duration_from_elapsed,
    bench_hand_angles,
    bench_next_delay,
    bench_scheduler_fire,
    bench_stopwatch_elapsed,
);
criterion_main!(benches);
