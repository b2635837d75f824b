//! Reuse pools for actions.
//!
//! A pooled action goes back to its pool when it is detached: once by the
//! tree after it completes, or when it is removed or cleared from its actor.
//! The pool resets it first, so the next `obtain` hands out a blank instance
//! with no actor or target.

use super::{Action, Binding};
use crate::scene::{ActorId, ActorTree};
use std::sync::{Arc, Mutex, MutexGuard};

pub const DEFAULT_POOL_CAPACITY: usize = 100;

struct PoolInner<A> {
    free: Vec<A>,
    max: usize,
    peak: usize,
}

/// Shared cache of reset action instances, cheap to clone.
pub struct ActionPool<A> {
    inner: Arc<Mutex<PoolInner<A>>>,
}

impl<A> Clone for ActionPool<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Action + Default> Default for ActionPool<A> {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

impl<A: Action + Default> ActionPool<A> {
    /// Keeps at most `max` free instances; extra releases are dropped.
    pub fn new(max: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PoolInner {
                free: Vec::new(),
                max,
                peak: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolInner<A>> {
        // The free list is never left half-updated; poisoning is ignored.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Takes a free instance, or builds a default one.
    pub fn obtain(&self) -> Pooled<A> {
        let action = self.lock().free.pop().unwrap_or_default();
        Pooled {
            action: Some(action),
            pool: Some(self.clone()),
            binding: Binding::default(),
        }
    }

    /// Resets `action` and stores it if there is room.
    pub fn release(&self, mut action: A) {
        action.reset();
        let mut inner = self.lock();
        if inner.free.len() < inner.max {
            inner.free.push(action);
            inner.peak = inner.peak.max(inner.free.len());
        }
    }

    /// Pre-allocates up to `count` free instances.
    pub fn fill(&self, count: usize) {
        let mut inner = self.lock();
        let target = count.min(inner.max);
        while inner.free.len() < target {
            inner.free.push(A::default());
        }
        inner.peak = inner.peak.max(inner.free.len());
    }

    pub fn free_count(&self) -> usize {
        self.lock().free.len()
    }

    /// Largest number of free instances held at once.
    pub fn peak(&self) -> usize {
        self.lock().peak
    }

    pub fn max(&self) -> usize {
        self.lock().max
    }

    pub fn clear(&self) {
        self.lock().free.clear();
    }
}

impl<A> std::fmt::Debug for ActionPool<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("ActionPool");
        if let Ok(inner) = self.inner.try_lock() {
            s.field("free", &inner.free.len())
                .field("max", &inner.max)
                .field("peak", &inner.peak);
        }
        s.finish_non_exhaustive()
    }
}

/// An action on loan from an [`ActionPool`].
///
/// After it has been returned the wrapper is empty: it reports completion
/// and holds no binding.
pub struct Pooled<A> {
    action: Option<A>,
    pool: Option<ActionPool<A>>,
    binding: Binding,
}

impl<A: Action + Default> Pooled<A> {
    /// Edits the loaned action in place, builder style.
    pub fn configure(mut self, f: impl FnOnce(&mut A)) -> Self {
        if let Some(action) = &mut self.action {
            f(action);
        }
        self
    }

    pub fn get(&self) -> Option<&A> {
        self.action.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut A> {
        self.action.as_mut()
    }

    /// Whether the action is still on loan, i.e. not yet returned.
    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }
}

impl<A: Action + Default> Action for Pooled<A> {
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool {
        match &mut self.action {
            Some(action) => action.act(delta, actors),
            None => true,
        }
    }

    fn restart(&mut self) {
        if let Some(action) = &mut self.action {
            action.restart();
        }
    }

    fn binding(&self) -> &Binding {
        match &self.action {
            Some(action) => action.binding(),
            None => &self.binding,
        }
    }

    fn binding_mut(&mut self) -> &mut Binding {
        match &mut self.action {
            Some(action) => action.binding_mut(),
            None => &mut self.binding,
        }
    }

    fn attach(&mut self, actor: ActorId) {
        if let Some(action) = &mut self.action {
            action.attach(actor);
        }
    }

    fn detach(&mut self) {
        if let Some(action) = &mut self.action {
            action.detach();
        }
        if let Some(pool) = self.pool.take() {
            if let Some(action) = self.action.take() {
                pool.release(action);
            }
        }
    }

    fn set_target(&mut self, target: Option<ActorId>) {
        if let Some(action) = &mut self.action {
            action.set_target(target);
        }
    }

    fn reset(&mut self) {
        self.binding = Binding::default();
        if let Some(action) = &mut self.action {
            action.reset();
        }
    }
}

impl<A: std::fmt::Debug> std::fmt::Debug for Pooled<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pooled")
            .field("action", &self.action)
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{DelayAction, VisibleAction};

    #[test]
    fn test_completed_action_returns_to_pool() {
        let pool: ActionPool<DelayAction> = ActionPool::new(4);
        let mut tree = ActorTree::new();
        let id = tree.create("a");

        let action = pool.obtain().configure(|delay| delay.set_duration(0.5));
        tree.add_action(id, action).unwrap();
        assert_eq!(pool.free_count(), 0);

        tree.update(id, 0.25);
        assert_eq!(pool.free_count(), 0);
        tree.update(id, 0.25);
        assert_eq!(pool.free_count(), 1);
        assert!(!tree.has_actions(id));
    }

    #[test]
    fn test_released_instance_is_blank() {
        let pool: ActionPool<DelayAction> = ActionPool::new(4);
        let mut tree = ActorTree::new();
        let id = tree.create("a");
        let other = tree.create("b");

        let mut action = pool.obtain().configure(|delay| delay.set_duration(1.0));
        action.set_target(Some(other));
        action.attach(id);
        action.act(0.5, &mut tree);
        action.detach();

        assert!(!action.is_pooled());
        assert_eq!(action.actor(), None);
        assert!(action.act(0.1, &mut tree));

        let reused = pool.obtain();
        let delay = reused.get().unwrap();
        assert_eq!(delay.time(), 0.0);
        assert_eq!(*reused.binding(), Binding::default());
    }

    #[test]
    fn test_removing_action_releases_it() {
        let pool: ActionPool<VisibleAction> = ActionPool::default();
        let mut tree = ActorTree::new();
        let id = tree.create("a");
        tree.add_action(id, pool.obtain()).unwrap();
        tree.add_action(id, pool.obtain()).unwrap();

        assert!(tree.remove_action(id, 0));
        assert_eq!(pool.free_count(), 1);
        tree.clear_actions(id);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn test_pool_is_bounded() {
        let pool: ActionPool<DelayAction> = ActionPool::new(2);
        let loans: Vec<_> = (0..3).map(|_| pool.obtain()).collect();
        for mut loan in loans {
            loan.detach();
        }
        assert_eq!(pool.free_count(), 2);

        pool.fill(10);
        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.peak(), 2);
        pool.clear();
        assert_eq!(pool.free_count(), 0);
    }
}
