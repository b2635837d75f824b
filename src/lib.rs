//! Lightweight 2D actor runtime.
//!
//! Actors live in an arena tree ([`scene::ActorTree`]) grouped into named
//! scenes. Each actor carries a FIFO queue of [`actions`] advanced once per
//! tick; composites (sequence, parallel, repeat) express choreography.
//! Raw touch samples go through an [`input::InputProcessor`], whose gesture
//! recognizer emits taps, long presses, flings, pans, pinches and swipes.
//! A [`stage::Stage`] ties both together for a single update thread, and the
//! [`input`] and [`logic`] threads run it behind a channel bus.

pub mod actions;
pub mod config;
pub mod input;
pub mod logic;
pub mod scene;
pub mod stage;
pub mod system;
pub mod time;
