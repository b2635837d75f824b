//! Shared channel infrastructure between system threads.
//!
//! The host feeds raw samples to the input thread, which turns them into
//! [`InputEvent`]s for the logic thread. System events reach the logic
//! thread directly.

use crate::input::events::{InputCommand, InputEvent, RawInput};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

/// System-level events handled by the logic thread.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Make the named scene current.
    SwitchScene(String),
    /// Stop ticking without tearing the stage down.
    Pause,
    Resume,
    /// Application shutdown requested.
    Quit,
}

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Host → Input: raw touch, mouse and key samples.
    pub raw_input_tx: Sender<RawInput>,
    pub raw_input_rx: Receiver<RawInput>,

    /// Commands sent to the input thread.
    pub input_cmd_tx: Sender<InputCommand>,
    pub input_cmd_rx: Receiver<InputCommand>,

    /// Input → Logic: recognized events.
    pub event_tx: Sender<InputEvent>,
    pub event_rx: Receiver<InputEvent>,

    /// Host → Logic: system events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,

    /// Logic ticks run so far. Written by the logic thread.
    pub ticks: Arc<AtomicU64>,
}

impl SystemBus {
    pub fn new() -> Self {
        let (raw_input_tx, raw_input_rx) = unbounded();
        let (input_cmd_tx, input_cmd_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let (sys_tx, sys_rx) = unbounded();

        Self {
            raw_input_tx,
            raw_input_rx,
            input_cmd_tx,
            input_cmd_rx,
            event_tx,
            event_rx,
            sys_tx,
            sys_rx,
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
