//! Logic thread: owns the stage and ticks it at a fixed rate.

use crate::config::LogicConfig;
use crate::stage::Stage;
use crate::system::bus::{SystemBus, SystemEvent};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

/// Spawns the logic thread.
///
/// Each iteration:
/// 1. Moves recognized input events into the stage
/// 2. Handles system events (scene switches, pause, quit)
/// 3. Runs as many fixed ticks as the elapsed time calls for, capped at
///    `max_catch_up_ticks`
///
/// The stage is handed back through the join handle on `Quit`.
pub fn start_thread(
    bus: SystemBus,
    mut stage: Stage,
    config: LogicConfig,
) -> thread::JoinHandle<Stage> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started ({} TPS)", config.ticks_per_second);

            let tps = config.ticks_per_second.max(1);
            let target_dt = Duration::from_secs_f64(1.0 / tps as f64);
            let tick_seconds = target_dt.as_secs_f32();
            let mut accumulator = Duration::new(0, 0);
            let mut last_time = Instant::now();
            let mut paused = false;

            loop {
                // 1. Process input events
                while let Ok(event) = bus.event_rx.try_recv() {
                    stage.post(event);
                }

                // 2. Handle system events
                while let Ok(sys_evt) = bus.sys_rx.try_recv() {
                    match sys_evt {
                        SystemEvent::Quit => {
                            log::info!("LOGIC: Quit received...");
                            return stage;
                        }
                        SystemEvent::SwitchScene(name) => {
                            if let Err(e) = stage.switch_to(&name) {
                                log::warn!("LOGIC: {}", e);
                            }
                        }
                        SystemEvent::Pause => {
                            log::info!("LOGIC: Paused");
                            paused = true;
                        }
                        SystemEvent::Resume => {
                            log::info!("LOGIC: Resumed");
                            paused = false;
                        }
                    }
                }

                // 3. Fixed-timestep update loop
                let current_time = Instant::now();
                let delta = current_time - last_time;
                last_time = current_time;
                if !paused {
                    accumulator += delta;
                }

                let mut loops = 0;
                while accumulator >= target_dt && loops < config.max_catch_up_ticks {
                    stage.frame(tick_seconds);
                    accumulator -= target_dt;
                    loops += 1;
                    bus.ticks.fetch_add(1, Ordering::Relaxed);
                }
                if loops > 0 {
                    stage.draw();
                } else {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        })
        .expect("Failed to spawn Logic thread")
}
