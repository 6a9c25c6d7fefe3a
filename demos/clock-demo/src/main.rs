//! Decima Clock Demo
//!
//! Terminal consumer of the runtime:
//! - Decimal clock face with analog hand angles
//! - Stopwatch with laps
//! - Countdown timer in decimal units

mod display;

use std::io;

use tokio::sync::mpsc;

use decima_runtime::{init_logging, Station};
use decima_time::{EngineConfig, SystemClock};

use display::Display;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None);

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║        Decima - 10h / 100m / 100s decimal time             ║");
    println!("╠════════════════════════════════════════════════════════════╣");
    println!("║  Commands:                                                 ║");
    println!("║    c          - Toggle the clock                           ║");
    println!("║    s          - Start / pause the stopwatch                ║");
    println!("║    l          - Stopwatch lap                              ║");
    println!("║    r          - Reset the stopwatch                        ║");
    println!("║    t <h m s>  - Start a countdown (decimal units)          ║");
    println!("║    p          - Pause / resume the countdown               ║");
    println!("║    x          - Reset the countdown                        ║");
    println!("║    q          - Quit                                       ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    let (mut station, mut events) = Station::new(SystemClock::new(), EngineConfig::default());
    station.on_timer_finished(|| tracing::info!("countdown complete"));
    station.start_clock().await;

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<String>(16);
    std::thread::spawn(move || loop {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                if cmd_tx.blocking_send(input).is_err() {
                    break;
                }
            }
        }
    });

    let mut display = Display::default();
    let mut stopwatch_running = false;
    let mut timer_paused = false;

    loop {
        tokio::select! {
            Some(event) = events.recv() => display.apply(event),
            line = cmd_rx.recv() => {
                let Some(line) = line else { break };
                let mut words = line.split_whitespace();
                match words.next() {
                    Some("q") => break,
                    Some("c") if station.clock_running() => station.stop_clock().await,
                    Some("c") => station.start_clock().await,
                    Some("s") if stopwatch_running => {
                        station.stopwatch_pause().await;
                        stopwatch_running = false;
                    }
                    Some("s") => {
                        station.stopwatch_start();
                        stopwatch_running = true;
                    }
                    Some("l") => {
                        if let Some(split) = station.stopwatch_lap() {
                            display.note(&format!("lap {}: {split}", station.stopwatch_laps().len()));
                        }
                    }
                    Some("r") => {
                        station.stopwatch_reset().await;
                        stopwatch_running = false;
                    }
                    Some("t") => {
                        let fields: Vec<&str> = words.collect();
                        let field = |i: usize| fields.get(i).copied().unwrap_or("");
                        if station.timer_start_from_fields(field(0), field(1), field(2)).await {
                            timer_paused = false;
                        } else {
                            display.note("countdown needs a non-zero duration");
                        }
                    }
                    Some("p") if timer_paused => {
                        timer_paused = !station.timer_resume().await;
                    }
                    Some("p") => {
                        station.timer_pause().await;
                        timer_paused = true;
                    }
                    Some("x") => {
                        station.timer_reset().await;
                        timer_paused = false;
                    }
                    Some(other) => display.note(&format!("unknown command: {other}")),
                    None => {}
                }
            }
        }
    }

    station.shutdown().await?;
    println!("\nGoodbye!");
    Ok(())
}
