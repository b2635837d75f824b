//! Control-flow actions built from child actions.

use super::{Action, Binding};
use crate::scene::{ActorId, ActorTree};

/// True when the owning actor was destroyed, or dropped this action while it
/// was acting, e.g. a child cleared its own owner's actions.
fn owner_gone(owner: Option<ActorId>, actors: &ActorTree) -> bool {
    owner.is_some_and(|id| !actors.contains(id) || actors.acting_removed(id))
}

/// Runs its children one after another.
#[derive(Default)]
pub struct SequenceAction {
    binding: Binding,
    actions: Vec<Box<dyn Action>>,
    index: usize,
}

impl SequenceAction {
    pub fn new(actions: Vec<Box<dyn Action>>) -> Self {
        Self {
            binding: Binding::default(),
            actions,
            index: 0,
        }
    }

    pub fn with(mut self, action: impl Action + 'static) -> Self {
        self.push(Box::new(action));
        self
    }

    pub fn push(&mut self, mut action: Box<dyn Action>) {
        if let Some(target) = self.binding.target {
            action.set_target(Some(target));
        }
        if let Some(actor) = self.binding.actor {
            action.attach(actor);
        }
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Index of the child currently running.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Action for SequenceAction {
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool {
        let Some(current) = self.actions.get_mut(self.index) else {
            return true;
        };
        if !current.act(delta, actors) {
            return false;
        }
        if owner_gone(self.binding.actor, actors) {
            return true;
        }
        self.index += 1;
        self.index >= self.actions.len()
    }

    fn restart(&mut self) {
        self.index = 0;
        for action in &mut self.actions {
            action.restart();
        }
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    fn attach(&mut self, actor: ActorId) {
        let binding = &mut self.binding;
        binding.actor = Some(actor);
        binding.target.get_or_insert(actor);
        for action in &mut self.actions {
            action.attach(actor);
        }
    }

    fn detach(&mut self) {
        self.binding.actor = None;
        for action in &mut self.actions {
            action.detach();
        }
    }

    fn set_target(&mut self, target: Option<ActorId>) {
        self.binding.target = target;
        for action in &mut self.actions {
            action.set_target(target);
        }
    }

    fn reset(&mut self) {
        self.binding = Binding::default();
        for action in &mut self.actions {
            action.reset();
        }
        self.restart();
    }
}

/// Runs all children every tick until each has finished.
///
/// Children are driven in insertion order; one that has completed is not
/// acted again until restart.
#[derive(Default)]
pub struct ParallelAction {
    binding: Binding,
    actions: Vec<Box<dyn Action>>,
    done: Vec<bool>,
    complete: bool,
}

impl ParallelAction {
    pub fn new(actions: Vec<Box<dyn Action>>) -> Self {
        let done = vec![false; actions.len()];
        Self {
            binding: Binding::default(),
            actions,
            done,
            complete: false,
        }
    }

    pub fn with(mut self, action: impl Action + 'static) -> Self {
        self.push(Box::new(action));
        self
    }

    pub fn push(&mut self, mut action: Box<dyn Action>) {
        if let Some(target) = self.binding.target {
            action.set_target(Some(target));
        }
        if let Some(actor) = self.binding.actor {
            action.attach(actor);
        }
        self.actions.push(action);
        self.done.push(false);
        self.complete = false;
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Action for ParallelAction {
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool {
        if self.complete {
            return true;
        }
        self.complete = true;
        let owner = self.binding.actor;
        for (action, done) in self.actions.iter_mut().zip(self.done.iter_mut()) {
            if *done {
                continue;
            }
            if action.act(delta, actors) {
                *done = true;
            } else {
                self.complete = false;
            }
            if owner_gone(owner, actors) {
                return true;
            }
        }
        self.complete
    }

    fn restart(&mut self) {
        self.complete = false;
        self.done.fill(false);
        for action in &mut self.actions {
            action.restart();
        }
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    fn attach(&mut self, actor: ActorId) {
        let binding = &mut self.binding;
        binding.actor = Some(actor);
        binding.target.get_or_insert(actor);
        for action in &mut self.actions {
            action.attach(actor);
        }
    }

    fn detach(&mut self) {
        self.binding.actor = None;
        for action in &mut self.actions {
            action.detach();
        }
    }

    fn set_target(&mut self, target: Option<ActorId>) {
        self.binding.target = target;
        for action in &mut self.actions {
            action.set_target(target);
        }
    }

    fn reset(&mut self) {
        self.binding = Binding::default();
        for action in &mut self.actions {
            action.reset();
        }
        self.restart();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    Times(u32),
    Forever,
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Times(1)
    }
}

/// Runs its body a number of times, restarting it after each completion.
pub struct RepeatAction {
    binding: Binding,
    count: RepeatCount,
    executed: u32,
    finished: bool,
    action: Box<dyn Action>,
}

impl RepeatAction {
    pub fn new(count: RepeatCount, action: Box<dyn Action>) -> Self {
        Self {
            binding: Binding::default(),
            count,
            executed: 0,
            finished: false,
            action,
        }
    }

    pub fn count(&self) -> RepeatCount {
        self.count
    }

    pub fn set_count(&mut self, count: RepeatCount) {
        self.count = count;
    }

    /// Completed iterations since the last restart.
    pub fn executed(&self) -> u32 {
        self.executed
    }

    /// Stops repeating once the current iteration of the body completes.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    fn exhausted(&self) -> bool {
        matches!(self.count, RepeatCount::Times(n) if self.executed >= n)
    }
}

impl Action for RepeatAction {
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool {
        if self.exhausted() {
            return true;
        }
        if !self.action.act(delta, actors) {
            return false;
        }
        if self.finished || owner_gone(self.binding.actor, actors) {
            return true;
        }
        self.executed = self.executed.saturating_add(1);
        if self.exhausted() {
            return true;
        }
        self.action.restart();
        false
    }

    fn restart(&mut self) {
        self.executed = 0;
        self.finished = false;
        self.action.restart();
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    fn attach(&mut self, actor: ActorId) {
        let binding = &mut self.binding;
        binding.actor = Some(actor);
        binding.target.get_or_insert(actor);
        self.action.attach(actor);
    }

    fn detach(&mut self) {
        self.binding.actor = None;
        self.action.detach();
    }

    fn set_target(&mut self, target: Option<ActorId>) {
        self.binding.target = target;
        self.action.set_target(target);
    }

    fn reset(&mut self) {
        self.binding = Binding::default();
        self.action.reset();
        self.restart();
    }
}

impl std::fmt::Debug for SequenceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceAction")
            .field("binding", &self.binding)
            .field("len", &self.actions.len())
            .field("index", &self.index)
            .finish()
    }
}

impl std::fmt::Debug for ParallelAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelAction")
            .field("binding", &self.binding)
            .field("done", &self.done)
            .field("complete", &self.complete)
            .finish()
    }
}

impl std::fmt::Debug for RepeatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatAction")
            .field("binding", &self.binding)
            .field("count", &self.count)
            .field("executed", &self.executed)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{self, ActionExt};
    use std::sync::{Arc, Mutex};

    /// Completes after `ticks` acts and records every call under `label`.
    fn ticking(
        label: &'static str,
        ticks: u32,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Box<dyn Action> {
        let log = log.clone();
        let mut remaining = ticks;
        actions::custom(move |_, _| {
            log.lock().unwrap().push(label);
            remaining = remaining.saturating_sub(1);
            remaining == 0
        })
        .boxed()
    }

    fn setup() -> (ActorTree, ActorId) {
        let mut tree = ActorTree::new();
        let id = tree.create("owner");
        (tree, id)
    }

    #[test]
    fn test_sequence_runs_children_in_order() {
        let (mut tree, id) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut seq = actions::sequence(vec![
            ticking("a", 2, &log),
            ticking("b", 1, &log),
            ticking("c", 3, &log),
        ]);
        seq.attach(id);

        let mut ticks = 0;
        while !seq.act(0.016, &mut tree) {
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!(ticks + 1, 6);
        assert_eq!(*log.lock().unwrap(), vec!["a", "a", "b", "c", "c", "c"]);
        assert!(seq.act(0.016, &mut tree));
    }

    #[test]
    fn test_sequence_aborts_when_owner_removed() {
        let (mut tree, id) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut seq = actions::sequence(vec![
            actions::custom(|_, _| true).boxed(),
            ticking("after", 1, &log),
        ]);
        seq.attach(id);
        tree.destroy(id);

        assert!(seq.act(0.016, &mut tree));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_sequence_completes() {
        let (mut tree, _) = setup();
        assert!(SequenceAction::default().act(0.1, &mut tree));
        assert!(ParallelAction::default().act(0.1, &mut tree));
    }

    #[test]
    fn test_parallel_joins_on_slowest_child() {
        let (mut tree, id) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut par = actions::parallel(vec![ticking("a", 3, &log), ticking("b", 5, &log)]);
        par.attach(id);

        let results: Vec<bool> = (0..5).map(|_| par.act(0.016, &mut tree)).collect();
        assert_eq!(results, vec![false, false, false, false, true]);

        let log = log.lock().unwrap();
        assert_eq!(log.iter().filter(|l| **l == "a").count(), 3);
        assert_eq!(log.iter().filter(|l| **l == "b").count(), 5);
        assert_eq!(&log[..2], &["a", "b"]);
    }

    #[test]
    fn test_parallel_restart_reruns_children() {
        let (mut tree, id) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut par = ParallelAction::default()
            .with(actions::delay(0.1))
            .with(actions::custom({
                let log = log.clone();
                move |_, _| {
                    log.lock().unwrap().push("x");
                    true
                }
            }));
        par.attach(id);
        assert!(par.act(0.2, &mut tree));
        par.restart();
        assert!(!par.act(0.05, &mut tree));
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_repeat_counts_iterations() {
        let (mut tree, id) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut rep = RepeatAction::new(RepeatCount::Times(3), ticking("body", 2, &log));
        rep.attach(id);

        let mut ticks = 1;
        while !rep.act(0.016, &mut tree) {
            ticks += 1;
            assert!(ticks < 20);
        }
        assert_eq!(rep.executed(), 3);
        // The custom body keeps its own countdown, so after the first pass it
        // completes on every tick.
        assert_eq!(ticks, 4);
    }

    #[test]
    fn test_repeat_delay_restarts_body() {
        let (mut tree, id) = setup();
        let mut rep = actions::repeat(2, actions::delay(1.0));
        rep.attach(id);
        assert!(!rep.act(1.0, &mut tree));
        assert!(!rep.act(0.5, &mut tree));
        assert!(rep.act(0.5, &mut tree));
        assert!(rep.act(0.5, &mut tree));
    }

    #[test]
    fn test_repeat_zero_times_completes_immediately() {
        let (mut tree, id) = setup();
        let calls = Arc::new(Mutex::new(0));
        let mut rep = actions::repeat(
            0,
            actions::run({
                let calls = calls.clone();
                move || *calls.lock().unwrap() += 1
            }),
        );
        rep.attach(id);
        assert!(rep.act(0.1, &mut tree));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_forever_until_finished() {
        let (mut tree, id) = setup();
        let mut rep = actions::forever(actions::delay(0.1));
        rep.attach(id);
        for _ in 0..100 {
            assert!(!rep.act(0.1, &mut tree));
        }
        assert_eq!(rep.executed(), 100);
        rep.finish();
        assert!(rep.act(0.1, &mut tree));
    }

    #[test]
    fn test_attach_propagates_to_children() {
        let (mut tree, id) = setup();
        let other = tree.create("other");
        let mut seq = actions::sequence(vec![actions::delay(1.0).boxed()]).targeting(other);
        seq.attach(id);
        assert_eq!(seq.actor(), Some(id));
        assert_eq!(seq.target(), Some(other));
        assert_eq!(seq.actions[0].actor(), Some(id));
        assert_eq!(seq.actions[0].target(), Some(other));

        seq.detach();
        assert_eq!(seq.actions[0].actor(), None);
    }
}
