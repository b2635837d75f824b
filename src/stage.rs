//! Host-facing glue: an actor tree, its scenes and an inbound event queue.

use crate::input::InputProcessor;
use crate::input::events::InputEvent;
use crate::input::queue::EventQueue;
use crate::scene::{ActorId, ActorTree, SceneError, SceneManager};
use crate::time::Clock;

/// Owns everything the update thread touches.
///
/// Events are queued with [`post`](Stage::post) or [`pump`](Stage::pump) and
/// delivered to the current scene at the start of the next
/// [`frame`](Stage::frame), before its actors are updated.
#[derive(Debug, Default)]
pub struct Stage {
    tree: ActorTree,
    scenes: SceneManager,
    inbox: EventQueue,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(queue_capacity: usize) -> Self {
        Self {
            inbox: EventQueue::new(queue_capacity),
            ..Self::default()
        }
    }

    pub fn tree(&self) -> &ActorTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ActorTree {
        &mut self.tree
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn add_scene(&mut self, name: impl Into<String>) -> Result<ActorId, SceneError> {
        self.scenes.add_scene(&mut self.tree, name)
    }

    pub fn remove_scene(&mut self, name: &str) -> Result<(), SceneError> {
        self.scenes.remove_scene(&mut self.tree, name)
    }

    pub fn switch_to(&mut self, name: &str) -> Result<ActorId, SceneError> {
        self.scenes.switch_to(name)
    }

    pub fn current_scene(&self) -> Option<ActorId> {
        self.scenes.current()
    }

    pub fn post(&mut self, event: InputEvent) {
        self.inbox.push(event);
    }

    /// Polls `processor` and moves its queued events into the stage.
    /// Returns how many were moved.
    pub fn pump<C: Clock>(&mut self, processor: &mut InputProcessor<C>) -> usize {
        processor.poll();
        let events = processor.drain_events();
        let count = events.len();
        for event in events {
            self.post(event);
        }
        count
    }

    pub fn pending_events(&self) -> usize {
        self.inbox.len()
    }

    /// Dispatches queued events, then ticks the current scene.
    /// Returns how many events an actor handled.
    pub fn frame(&mut self, delta: f32) -> usize {
        let events = self.inbox.drain();
        let Some(root) = self.scenes.current() else {
            if !events.is_empty() {
                log::debug!("SCENE: No current scene, dropping {} events", events.len());
            }
            return 0;
        };

        let mut handled = 0;
        for event in &events {
            if self.tree.dispatch(root, event) {
                handled += 1;
            } else {
                log::trace!("SCENE: Unhandled {:?}", event.kind());
            }
        }
        self.tree.update(root, delta);
        handled
    }

    pub fn draw(&mut self) {
        if let Some(root) = self.scenes.current() {
            self.tree.draw(root);
        }
    }

    /// Topmost touchable actor of the current scene under a point.
    pub fn hit(&self, x: f32, y: f32) -> Option<ActorId> {
        self.scenes
            .current()
            .and_then(|root| self.tree.hit(root, x, y))
    }
}
