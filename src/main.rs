//! Headless demo: a scripted touch session driving a two-scene stage on the
//! input and logic threads.

use rstage::actions::{self, ActionExt, Interpolation};
use rstage::config::RuntimeConfig;
use rstage::input::events::{InputCommand, InputEvent, RawInput};
use rstage::input::{self, InputProcessor};
use rstage::logic;
use rstage::scene::{Actor, SceneError};
use rstage::stage::Stage;
use rstage::system::bus::{SystemBus, SystemEvent};
use std::path::Path;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

const CONFIG_PATH: &str = "rstage.toml";

fn build_stage(config: &RuntimeConfig) -> Result<Stage, SceneError> {
    let mut stage = Stage::with_capacity(config.input.queue_capacity);
    let menu = stage.add_scene("menu")?;
    let game = stage.add_scene("game")?;
    let tree = stage.tree_mut();

    // Menu: a bobbing logo and a button.
    let logo = tree.insert(
        Actor::new("logo")
            .with_position(100.0, 300.0)
            .with_size(64.0, 64.0),
    );
    tree.add_child(menu, logo)?;
    tree.add_action(
        logo,
        actions::forever(actions::sequence(vec![
            actions::move_by(0.0, 20.0, 0.5, Some(Interpolation::SineOut)).boxed(),
            actions::move_by(0.0, -20.0, 0.5, Some(Interpolation::SineIn)).boxed(),
        ])),
    )?;

    let play = tree.insert(
        Actor::new("play")
            .with_position(80.0, 80.0)
            .with_size(120.0, 40.0)
            .on_input(|actor, event| match event {
                InputEvent::Tap { count, .. } => {
                    log::info!("MAIN: '{}' tapped x{}", actor.name(), count);
                    true
                }
                InputEvent::LongPress { .. } => {
                    log::info!("MAIN: '{}' long-pressed", actor.name());
                    true
                }
                _ => false,
            }),
    );
    tree.add_child(menu, play)?;

    if let Some(root) = tree.get_mut(menu) {
        root.set_input_hook(Some(Box::new(|_: &mut Actor, event: &InputEvent| {
            if event.is_gesture() {
                log::info!("MAIN: menu got {:?}", event);
            }
            event.is_gesture()
        })));
    }

    // Game: the player appears, then moves, spins and grows at once.
    let player = tree.insert(Actor::new("player").with_size(32.0, 32.0));
    tree.add_child(game, player)?;
    tree.add_action(
        player,
        actions::sequence(vec![
            actions::hide().boxed(),
            actions::delay_then(0.2, actions::show()).boxed(),
            actions::parallel(vec![
                actions::move_to(200.0, 120.0, 0.6, Some(Interpolation::Smooth)).boxed(),
                actions::repeat(2, actions::rotate_by(180.0, 0.3, None)).boxed(),
                actions::scale_to(1.5, 1.5, 0.6, None).boxed(),
            ])
            .boxed(),
            actions::run(|| log::info!("MAIN: player arrived")).boxed(),
        ]),
    )?;

    Ok(stage)
}

fn send(bus: &SystemBus, raw: RawInput) {
    if let Err(e) = bus.raw_input_tx.send(raw) {
        log::error!("MAIN: Failed to send input (Input thread died?): {}", e);
    }
}

fn touch(bus: &SystemBus, x: f32, y: f32, down: bool) {
    let raw = if down {
        RawInput::TouchDown {
            x,
            y,
            pointer: 0,
            button: 0,
        }
    } else {
        RawInput::TouchUp {
            x,
            y,
            pointer: 0,
            button: 0,
        }
    };
    send(bus, raw);
}

/// Plays a tap, a long press and a swipe, then switches scenes.
fn run_script(bus: &SystemBus) {
    log::info!("MAIN: Tap");
    touch(bus, 90.0, 90.0, true);
    thread::sleep(Duration::from_millis(60));
    touch(bus, 90.0, 90.0, false);
    thread::sleep(Duration::from_millis(200));

    log::info!("MAIN: Long press");
    touch(bus, 100.0, 95.0, true);
    thread::sleep(Duration::from_millis(1300));
    touch(bus, 100.0, 95.0, false);
    thread::sleep(Duration::from_millis(200));

    log::info!("MAIN: Swipe");
    touch(bus, 300.0, 300.0, true);
    for step in 1..=15 {
        thread::sleep(Duration::from_millis(10));
        send(
            bus,
            RawInput::TouchDragged {
                x: 300.0 + step as f32 * 20.0,
                y: 300.0,
                pointer: 0,
            },
        );
    }
    touch(bus, 600.0, 300.0, false);
    thread::sleep(Duration::from_millis(200));

    let _ = bus.sys_tx.send(SystemEvent::SwitchScene("game".to_string()));
    thread::sleep(Duration::from_millis(1200));
}

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    log::info!("MAIN: Booting rstage demo...");

    let config = RuntimeConfig::load_or_default(Path::new(CONFIG_PATH));
    let stage = match build_stage(&config) {
        Ok(stage) => stage,
        Err(e) => {
            log::error!("MAIN: Failed to build stage: {}", e);
            std::process::exit(1);
        }
    };

    let bus = SystemBus::new();
    let processor = InputProcessor::new(config.gesture, config.input);
    let poll_interval = Duration::from_millis(config.input.poll_interval_ms.max(1));

    let input_handle = input::start_thread(bus.clone(), processor, poll_interval);
    let logic_handle = logic::start_thread(bus.clone(), stage, config.logic);

    run_script(&bus);

    let _ = bus.input_cmd_tx.send(InputCommand::Shutdown);
    let _ = bus.sys_tx.send(SystemEvent::Quit);

    if input_handle.join().is_err() {
        log::error!("MAIN: Input thread panicked");
    }
    match logic_handle.join() {
        Ok(stage) => {
            let player = stage
                .scenes()
                .scene("game")
                .and_then(|root| stage.tree().find_by_name(root, "player"))
                .and_then(|id| stage.tree().get(id));
            if let Some(player) = player {
                log::info!(
                    "MAIN: Player ended at ({:.1}, {:.1}), rotation {:.0}",
                    player.x,
                    player.y,
                    player.rotation
                );
            }
        }
        Err(_) => log::error!("MAIN: Logic thread panicked"),
    }

    log::info!(
        "MAIN: Ran {} logic ticks",
        bus.ticks.load(Ordering::Relaxed)
    );
}
