//! Delay, callbacks and one-shot state changes.

use super::{Action, Binding};
use crate::scene::{Actor, ActorId, ActorTree, Touchable};

/// Waits for a duration, then optionally runs an inner action.
///
/// Time left over from the tick that ends the wait is handed to the inner
/// action.
#[derive(Default)]
pub struct DelayAction {
    binding: Binding,
    duration: f32,
    time: f32,
    action: Option<Box<dyn Action>>,
}

impl DelayAction {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: Box<dyn Action>) -> Self {
        self.set_action(Some(action));
        self
    }

    pub fn set_action(&mut self, action: Option<Box<dyn Action>>) {
        self.action = action.map(|mut action| {
            if let Some(target) = self.binding.target {
                action.set_target(Some(target));
            }
            if let Some(actor) = self.binding.actor {
                action.attach(actor);
            }
            action
        });
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Ends the wait on the next act.
    pub fn finish(&mut self) {
        self.time = self.duration;
    }
}

impl Action for DelayAction {
    fn act(&mut self, mut delta: f32, actors: &mut ActorTree) -> bool {
        if self.time < self.duration {
            self.time += delta;
            if self.time < self.duration {
                return false;
            }
            delta = self.time - self.duration;
        }
        match &mut self.action {
            Some(action) => action.act(delta, actors),
            None => true,
        }
    }

    fn restart(&mut self) {
        self.time = 0.0;
        if let Some(action) = &mut self.action {
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
        self.binding.actor = Some(actor);
        self.binding.target.get_or_insert(actor);
        if let Some(action) = &mut self.action {
            action.attach(actor);
        }
    }

    fn detach(&mut self) {
        self.binding.actor = None;
        if let Some(action) = &mut self.action {
            action.detach();
        }
    }

    fn set_target(&mut self, target: Option<ActorId>) {
        self.binding.target = target;
        if let Some(action) = &mut self.action {
            action.set_target(target);
        }
    }

    fn reset(&mut self) {
        self.binding = Binding::default();
        if let Some(action) = &mut self.action {
            action.reset();
        }
        self.restart();
    }
}

pub type RunCallback = Box<dyn FnMut() + Send>;

/// Invokes a callback once.
#[derive(Default)]
pub struct RunAction {
    binding: Binding,
    callback: Option<RunCallback>,
    ran: bool,
}

impl RunAction {
    pub fn new(callback: impl FnMut() + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
            ..Self::default()
        }
    }

    pub fn set_callback(&mut self, callback: Option<RunCallback>) {
        self.callback = callback;
    }
}

impl Action for RunAction {
    fn act(&mut self, _delta: f32, _actors: &mut ActorTree) -> bool {
        if !self.ran {
            self.ran = true;
            if let Some(callback) = &mut self.callback {
                callback();
            }
        }
        true
    }

    fn restart(&mut self) {
        self.ran = false;
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

pub type CustomStep = Box<dyn FnMut(&mut Actor, f32) -> bool + Send>;

/// Calls `step(target, delta)` every tick until it returns true.
#[derive(Default)]
pub struct CustomAction {
    binding: Binding,
    step: Option<CustomStep>,
    complete: bool,
}

impl CustomAction {
    pub fn new(step: impl FnMut(&mut Actor, f32) -> bool + Send + 'static) -> Self {
        Self {
            step: Some(Box::new(step)),
            ..Self::default()
        }
    }

    pub fn set_step(&mut self, step: Option<CustomStep>) {
        self.step = step;
    }
}

impl Action for CustomAction {
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool {
        if self.complete {
            return true;
        }
        let target = self.binding.target.and_then(|id| actors.get_mut(id));
        self.complete = match (target, &mut self.step) {
            (Some(target), Some(step)) => step(target, delta),
            (None, _) => {
                log::warn!("SCENE: Custom action has no live target, finishing");
                true
            }
            (_, None) => true,
        };
        self.complete
    }

    fn restart(&mut self) {
        self.complete = false;
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

/// Shows or hides the target.
#[derive(Debug, Clone, Default)]
pub struct VisibleAction {
    binding: Binding,
    pub visible: bool,
    ran: bool,
}

impl VisibleAction {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            ..Self::default()
        }
    }
}

impl Action for VisibleAction {
    fn act(&mut self, _delta: f32, actors: &mut ActorTree) -> bool {
        if !self.ran {
            self.ran = true;
            if let Some(target) = self.binding.target.and_then(|id| actors.get_mut(id)) {
                target.visible = self.visible;
            }
        }
        true
    }

    fn restart(&mut self) {
        self.ran = false;
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

#[derive(Debug, Clone, Default)]
pub struct TouchableAction {
    binding: Binding,
    pub touchable: Touchable,
    ran: bool,
}

impl TouchableAction {
    pub fn new(touchable: Touchable) -> Self {
        Self {
            touchable,
            ..Self::default()
        }
    }
}

impl Action for TouchableAction {
    fn act(&mut self, _delta: f32, actors: &mut ActorTree) -> bool {
        if !self.ran {
            self.ran = true;
            if let Some(target) = self.binding.target.and_then(|id| actors.get_mut(id)) {
                target.touchable = self.touchable;
            }
        }
        true
    }

    fn restart(&mut self) {
        self.ran = false;
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

/// Detaches the target from its parent. The actor stays in the tree and can
/// be added back.
#[derive(Debug, Clone, Default)]
pub struct RemoveActorAction {
    binding: Binding,
    ran: bool,
}

impl RemoveActorAction {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Action for RemoveActorAction {
    fn act(&mut self, _delta: f32, actors: &mut ActorTree) -> bool {
        if !self.ran {
            self.ran = true;
            if let Some(target) = self.binding.target {
                actors.remove_from_parent(target);
            }
        }
        true
    }

    fn restart(&mut self) {
        self.ran = false;
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }
}

impl std::fmt::Debug for DelayAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayAction")
            .field("binding", &self.binding)
            .field("duration", &self.duration)
            .field("time", &self.time)
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl std::fmt::Debug for RunAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunAction")
            .field("binding", &self.binding)
            .field("ran", &self.ran)
            .finish()
    }
}

impl std::fmt::Debug for CustomAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomAction")
            .field("binding", &self.binding)
            .field("complete", &self.complete)
            .finish()
    }
}
