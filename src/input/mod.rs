//! Input thread bootstrapping and gesture recognition.

pub mod events;
pub mod gesture;
pub mod processor;
pub mod queue;
pub mod swipe;
pub mod timer;
pub mod velocity;

use crate::input::events::InputCommand;
use crate::system::bus::SystemBus;
use crossbeam_channel::select;
use std::thread;
use std::time::Duration;

pub use events::{InputEvent, InputEventKind, RawInput, SwipeDirection};
pub use gesture::GestureRecognizer;
pub use processor::InputProcessor;

/// Spawns the input thread.
///
/// Raw samples from the host arrive on `raw_input_rx`; recognized events are
/// forwarded to the logic thread on `event_tx`. The long-press timer is
/// polled whenever no input arrives for `poll_interval`.
pub fn start_thread(
    bus: SystemBus,
    mut processor: InputProcessor,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");

            loop {
                select! {
                    recv(bus.raw_input_rx) -> raw => {
                        match raw {
                            Ok(raw_event) => {
                                processor.process(raw_event);
                            }
                            Err(_) => break,
                        }
                    }
                    recv(bus.input_cmd_rx) -> cmd => {
                        match cmd {
                            Ok(InputCommand::CancelGesture) => processor.cancel(),
                            Ok(InputCommand::ResetGestures) => processor.reset(),
                            Ok(InputCommand::Shutdown) | Err(_) => break,
                        }
                    }
                    default(poll_interval) => {
                        processor.poll();
                    }
                }

                let mut disconnected = false;
                for event in processor.drain_events() {
                    if let Err(e) = bus.event_tx.send(event) {
                        log::error!("INPUT: Failed to send event (Logic thread died?): {}", e);
                        disconnected = true;
                        break;
                    }
                }
                if disconnected {
                    break;
                }
            }

            log::info!("INPUT: Thread stopped");
        })
        .expect("Failed to spawn Input thread")
}
