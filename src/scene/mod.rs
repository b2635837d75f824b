//! Actors, the arena tree holding them, and named scenes.

pub mod actor;
pub mod error;
pub mod manager;
pub mod tree;

pub use actor::{Actor, ActorId, DrawHook, InitHook, InputHook, Touchable, UpdateHook};
pub use error::SceneError;
pub use manager::SceneManager;
pub use tree::ActorTree;
