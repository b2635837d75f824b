//! Arena-backed actor tree.
//!
//! Actors live in slots addressed by [`ActorId`]. A parent's child list is
//! the only ownership record; the child's parent link is a plain handle used
//! for detaching and z-order bookkeeping.

use super::actor::{Actor, ActorId, Touchable};
use super::error::SceneError;
use crate::actions::Action;
use crate::input::events::InputEvent;

struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

#[derive(Default)]
pub struct ActorTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ActorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Creates a detached actor.
    pub fn create(&mut self, name: impl Into<String>) -> ActorId {
        self.insert(Actor::new(name))
    }

    /// Takes ownership of a detached actor.
    pub fn insert(&mut self, mut actor: Actor) -> ActorId {
        actor.parent = None;
        actor.children.clear();
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.actor = Some(actor);
            ActorId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                actor: Some(actor),
            });
            ActorId {
                index,
                generation: 0,
            }
        }
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.actor.as_ref())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.actor.as_mut())
    }

    fn require(&self, id: ActorId) -> Result<&Actor, SceneError> {
        self.get(id).ok_or(SceneError::UnknownActor(id))
    }

    pub fn parent(&self, id: ActorId) -> Option<ActorId> {
        self.get(id).and_then(|actor| actor.parent)
    }

    pub fn children(&self, id: ActorId) -> &[ActorId] {
        self.get(id).map(|actor| actor.children()).unwrap_or(&[])
    }

    /// True if `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: ActorId, id: ActorId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Appends `child` to `parent`, detaching it from its previous parent.
    pub fn add_child(&mut self, parent: ActorId, child: ActorId) -> Result<(), SceneError> {
        let index = self.require(parent)?.children.len();
        self.add_child_at(parent, index, child)
    }

    /// Inserts `child` at `index` (clamped) among `parent`'s children.
    pub fn add_child_at(
        &mut self,
        parent: ActorId,
        index: usize,
        child: ActorId,
    ) -> Result<(), SceneError> {
        self.require(parent)?;
        self.require(child)?;
        if self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        self.remove_from_parent(child);

        if let Some(parent_actor) = self.get_mut(parent) {
            let index = index.min(parent_actor.children.len());
            parent_actor.children.insert(index, child);
        }
        if let Some(child_actor) = self.get_mut(child) {
            child_actor.parent = Some(parent);
        }
        self.reindex(parent);
        Ok(())
    }

    /// Detaches `id` from its parent. Returns false if it had none.
    pub fn remove_from_parent(&mut self, id: ActorId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Some(parent_actor) = self.get_mut(parent) {
            parent_actor.children.retain(|c| *c != id);
        }
        if let Some(actor) = self.get_mut(id) {
            actor.parent = None;
            actor.z_index = 0;
        }
        self.reindex(parent);
        true
    }

    /// Detaches `id`; with `clear`, also drops its actions and destroys its
    /// children. The actor itself stays alive.
    pub fn remove(&mut self, id: ActorId, clear: bool) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.remove_from_parent(id);
        if clear {
            self.clear_actions(id);
            self.clear_children(id);
        }
        true
    }

    /// Destroys every child of `id`.
    pub fn clear_children(&mut self, id: ActorId) {
        let children = match self.get_mut(id) {
            Some(actor) => std::mem::take(&mut actor.children),
            None => return,
        };
        for child in children {
            if let Some(child_actor) = self.get_mut(child) {
                child_actor.parent = None;
            }
            self.destroy(child);
        }
    }

    /// Removes `id` and its whole subtree from the arena. Pending actions are
    /// detached (returning pooled ones to their pool).
    pub fn destroy(&mut self, id: ActorId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.remove_from_parent(id);
        self.clear_children(id);
        self.clear_actions(id);

        let slot = &mut self.slots[id.index as usize];
        slot.actor = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        true
    }

    /// Moves `id` to the end of its parent's children.
    pub fn to_front(&mut self, id: ActorId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let len = self.children(parent).len();
        self.add_child_at(parent, len, id).is_ok()
    }

    /// Moves `id` to the start of its parent's children.
    pub fn to_back(&mut self, id: ActorId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        self.add_child_at(parent, 0, id).is_ok()
    }

    fn reindex(&mut self, parent: ActorId) {
        let children = self.children(parent).to_vec();
        for (z, child) in children.into_iter().enumerate() {
            if let Some(actor) = self.get_mut(child) {
                actor.z_index = z;
            }
        }
    }

    /// Depth-first search for the first actor named `name` under `root`.
    pub fn find_by_name(&self, root: ActorId, name: &str) -> Option<ActorId> {
        let actor = self.get(root)?;
        if actor.name() == name {
            return Some(root);
        }
        actor
            .children
            .iter()
            .find_map(|child| self.find_by_name(*child, name))
    }

    /// Queues an action behind the actor's pending ones.
    pub fn add_action(
        &mut self,
        id: ActorId,
        mut action: impl Action + 'static,
    ) -> Result<(), SceneError> {
        let Some(actor) = self.get_mut(id) else {
            action.detach();
            return Err(SceneError::UnknownActor(id));
        };
        action.attach(id);
        actor.actions.push_back(Box::new(action));
        Ok(())
    }

    /// Removes the action at `index`, detaching it. Index 0 is the front
    /// action, even while it is acting.
    pub fn remove_action(&mut self, id: ActorId, index: usize) -> bool {
        let Some(actor) = self.get_mut(id) else {
            return false;
        };
        let index = if actor.has_acting_action() {
            if index == 0 {
                actor.acting_removed = true;
                return true;
            }
            index - 1
        } else {
            index
        };
        match actor.actions.remove(index) {
            Some(mut action) => {
                action.detach();
                true
            }
            None => false,
        }
    }

    /// Detaches and drops every action. An action that is acting right now
    /// is detached as soon as its `act` returns.
    pub fn clear_actions(&mut self, id: ActorId) {
        let actions = match self.get_mut(id) {
            Some(actor) => {
                if actor.acting {
                    actor.acting_removed = true;
                }
                std::mem::take(&mut actor.actions)
            }
            None => return,
        };
        for mut action in actions {
            action.detach();
        }
    }

    /// True while the acting front action of `id` has been removed from it.
    pub(crate) fn acting_removed(&self, id: ActorId) -> bool {
        self.get(id).is_some_and(|actor| actor.acting && actor.acting_removed)
    }

    pub fn has_actions(&self, id: ActorId) -> bool {
        self.get(id).is_some_and(|actor| actor.has_actions())
    }

    /// Advances `id` and its subtree by `delta` seconds.
    ///
    /// Only the front action of each actor runs per tick; the others wait in
    /// FIFO order. Children are visited depth-first in child-list order.
    pub fn update(&mut self, id: ActorId, delta: f32) {
        let Some(actor) = self.get_mut(id) else {
            return;
        };

        if !actor.initialized {
            actor.initialized = true;
            if let Some(init) = actor.init_hook.take() {
                init(actor);
            }
        }

        let front = actor.actions.pop_front();
        if let Some(mut action) = front {
            actor.acting = true;
            actor.acting_removed = false;
            let done = action.act(delta, self);
            match self.get_mut(id) {
                Some(actor) => {
                    let removed = std::mem::take(&mut actor.acting_removed);
                    actor.acting = false;
                    if done || removed {
                        action.detach();
                    } else {
                        actor.actions.push_front(action);
                    }
                }
                None => action.detach(),
            }
        }

        let Some(actor) = self.get_mut(id) else {
            return;
        };
        if let Some(mut hook) = actor.update_hook.take() {
            hook(actor, delta);
            if actor.update_hook.is_none() {
                actor.update_hook = Some(hook);
            }
        }

        let children = actor.children.clone();
        for child in children {
            self.update(child, delta);
        }
    }

    /// Invokes draw hooks of visible actors, parents before children.
    pub fn draw(&mut self, id: ActorId) {
        let Some(actor) = self.get_mut(id) else {
            return;
        };
        if !actor.visible {
            return;
        }
        if let Some(mut hook) = actor.draw_hook.take() {
            hook(actor);
            if actor.draw_hook.is_none() {
                actor.draw_hook = Some(hook);
            }
        }
        let children = actor.children.clone();
        for child in children {
            self.draw(child);
        }
    }

    /// Converts a point in `id`'s local space to root space. Only
    /// translation is applied.
    pub fn local_to_stage(&self, id: ActorId, x: f32, y: f32) -> (f32, f32) {
        let (mut sx, mut sy) = (x, y);
        let mut current = Some(id);
        while let Some(node) = current {
            let Some(actor) = self.get(node) else {
                break;
            };
            sx += actor.x;
            sy += actor.y;
            current = actor.parent;
        }
        (sx, sy)
    }

    /// Whether a root-space point falls inside `id`'s bounds. Zero-sized
    /// actors act as groups and accept every point.
    pub fn contains_point(&self, id: ActorId, x: f32, y: f32) -> bool {
        let Some(actor) = self.get(id) else {
            return false;
        };
        if actor.width == 0.0 && actor.height == 0.0 {
            return true;
        }
        let (left, bottom) = match actor.parent {
            Some(parent) => self.local_to_stage(parent, actor.x, actor.y),
            None => (actor.x, actor.y),
        };
        x >= left && x < left + actor.width && y >= bottom && y < bottom + actor.height
    }

    /// Topmost touchable, sized actor under a root-space point.
    pub fn hit(&self, root: ActorId, x: f32, y: f32) -> Option<ActorId> {
        let actor = self.get(root)?;
        if !actor.visible || actor.touchable == Touchable::Disabled {
            return None;
        }
        for child in actor.children.iter().rev() {
            if let Some(found) = self.hit(*child, x, y) {
                return Some(found);
            }
        }
        let sized = actor.width > 0.0 || actor.height > 0.0;
        (actor.touchable == Touchable::Enabled && sized && self.contains_point(root, x, y))
            .then_some(root)
    }

    /// Offers `event` to the input hooks under `root`, topmost child first,
    /// until one reports it handled.
    pub fn dispatch(&mut self, root: ActorId, event: &InputEvent) -> bool {
        let Some(actor) = self.get(root) else {
            return false;
        };
        if !actor.visible || actor.touchable == Touchable::Disabled {
            return false;
        }
        let touchable = actor.touchable;
        let children = actor.children.clone();

        for child in children.iter().rev() {
            if self.dispatch(*child, event) {
                return true;
            }
        }
        if touchable == Touchable::ChildrenOnly {
            return false;
        }
        if let Some((x, y)) = event.position() {
            if !self.contains_point(root, x, y) {
                return false;
            }
        }

        let Some(actor) = self.get_mut(root) else {
            return false;
        };
        let Some(mut hook) = actor.input_hook.take() else {
            return false;
        };
        let handled = hook(actor, event);
        if actor.input_hook.is_none() {
            actor.input_hook = Some(hook);
        }
        handled
    }
}

impl std::fmt::Debug for ActorTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorTree")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}
