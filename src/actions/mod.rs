//! Time-based actions that mutate actors over frames.
//!
//! An action is queued on an actor, advanced once per tick by
//! [`ActorTree::update`](crate::scene::ActorTree::update) and detached once it
//! reports completion. Composites ([`SequenceAction`], [`ParallelAction`],
//! [`RepeatAction`]) build control flow out of simpler actions.
//!
//! ```ignore
//! tree.add_action(logo, actions::sequence(vec![
//!     actions::move_to(100.0, 40.0, 0.5, Some(Interpolation::Smooth)).boxed(),
//!     actions::delay(0.25).boxed(),
//!     actions::run(|| log::info!("arrived")).boxed(),
//! ]))?;
//! ```

pub mod basic;
pub mod combinators;
pub mod interpolation;
pub mod pool;
pub mod temporal;
pub mod transform;

pub use basic::{
    CustomAction, DelayAction, RemoveActorAction, RunAction, TouchableAction, VisibleAction,
};
pub use combinators::{ParallelAction, RepeatAction, RepeatCount, SequenceAction};
pub use interpolation::Interpolation;
pub use pool::{ActionPool, Pooled};
pub use temporal::{TemporalAction, Tween};
pub use transform::{MoveBy, MoveTo, RotateBy, RotateTo, ScaleBy, ScaleTo, SizeBy, SizeTo};

use crate::scene::{Actor, ActorId, ActorTree, Touchable};

/// Actor an action runs on, and the actor it mutates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binding {
    pub actor: Option<ActorId>,
    pub target: Option<ActorId>,
}

/// A resumable, steppable mutation.
pub trait Action: Send {
    /// Advances by `delta` seconds. Returns true once complete; calling it
    /// again afterwards keeps returning true without further effects until
    /// [`restart`](Action::restart).
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool;

    /// Resets progress so the same configured action can run again.
    fn restart(&mut self);

    fn binding(&self) -> &Binding;

    fn binding_mut(&mut self) -> &mut Binding;

    fn actor(&self) -> Option<ActorId> {
        self.binding().actor
    }

    fn target(&self) -> Option<ActorId> {
        self.binding().target
    }

    /// Binds the action to `actor`; the target defaults to it when unset.
    fn attach(&mut self, actor: ActorId) {
        let binding = self.binding_mut();
        binding.actor = Some(actor);
        if binding.target.is_none() {
            binding.target = Some(actor);
        }
    }

    /// Unbinds the action from its actor. Pooled actions return to their
    /// pool here.
    fn detach(&mut self) {
        self.binding_mut().actor = None;
    }

    fn set_target(&mut self, target: Option<ActorId>) {
        self.binding_mut().target = target;
    }

    /// Clears actor and target, then restarts.
    fn reset(&mut self) {
        *self.binding_mut() = Binding::default();
        self.restart();
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn act(&mut self, delta: f32, actors: &mut ActorTree) -> bool {
        (**self).act(delta, actors)
    }

    fn restart(&mut self) {
        (**self).restart()
    }

    fn binding(&self) -> &Binding {
        (**self).binding()
    }

    fn binding_mut(&mut self) -> &mut Binding {
        (**self).binding_mut()
    }

    fn attach(&mut self, actor: ActorId) {
        (**self).attach(actor)
    }

    fn detach(&mut self) {
        (**self).detach()
    }

    fn set_target(&mut self, target: Option<ActorId>) {
        (**self).set_target(target)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

pub trait ActionExt: Action + Sized + 'static {
    fn boxed(self) -> Box<dyn Action> {
        Box::new(self)
    }

    /// Points the action at another actor than the one running it.
    fn targeting(mut self, target: ActorId) -> Self {
        self.set_target(Some(target));
        self
    }
}

impl<A: Action + Sized + 'static> ActionExt for A {}

// Constructors

pub fn sequence(actions: Vec<Box<dyn Action>>) -> SequenceAction {
    SequenceAction::new(actions)
}

pub fn parallel(actions: Vec<Box<dyn Action>>) -> ParallelAction {
    ParallelAction::new(actions)
}

pub fn repeat(count: u32, action: impl Action + 'static) -> RepeatAction {
    RepeatAction::new(RepeatCount::Times(count), Box::new(action))
}

pub fn forever(action: impl Action + 'static) -> RepeatAction {
    RepeatAction::new(RepeatCount::Forever, Box::new(action))
}

pub fn delay(duration: f32) -> DelayAction {
    DelayAction::new(duration)
}

/// Waits `duration` seconds, then runs `action`.
pub fn delay_then(duration: f32, action: impl Action + 'static) -> DelayAction {
    DelayAction::new(duration).with_action(Box::new(action))
}

pub fn run(callback: impl FnMut() + Send + 'static) -> RunAction {
    RunAction::new(callback)
}

pub fn custom(step: impl FnMut(&mut Actor, f32) -> bool + Send + 'static) -> CustomAction {
    CustomAction::new(step)
}

pub fn temporal<T: Tween>(
    duration: f32,
    interpolation: Option<Interpolation>,
    tween: T,
) -> TemporalAction<T> {
    TemporalAction::new(duration, interpolation, tween)
}

/// Like [`temporal`], but the tween receives percent deltas.
pub fn relative_temporal<T: Tween>(
    duration: f32,
    interpolation: Option<Interpolation>,
    tween: T,
) -> TemporalAction<T> {
    TemporalAction::relative(duration, interpolation, tween)
}

pub fn move_to(
    x: f32,
    y: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<MoveTo> {
    TemporalAction::new(duration, interpolation, MoveTo::new(x, y))
}

pub fn move_by(
    amount_x: f32,
    amount_y: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<MoveBy> {
    TemporalAction::relative(duration, interpolation, MoveBy::new(amount_x, amount_y))
}

pub fn scale_to(
    x: f32,
    y: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<ScaleTo> {
    TemporalAction::new(duration, interpolation, ScaleTo::new(x, y))
}

pub fn scale_by(
    amount_x: f32,
    amount_y: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<ScaleBy> {
    TemporalAction::relative(duration, interpolation, ScaleBy::new(amount_x, amount_y))
}

pub fn rotate_to(
    degrees: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<RotateTo> {
    TemporalAction::new(duration, interpolation, RotateTo::new(degrees))
}

pub fn rotate_by(
    degrees: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<RotateBy> {
    TemporalAction::relative(duration, interpolation, RotateBy::new(degrees))
}

pub fn size_to(
    width: f32,
    height: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<SizeTo> {
    TemporalAction::new(duration, interpolation, SizeTo::new(width, height))
}

pub fn size_by(
    amount_width: f32,
    amount_height: f32,
    duration: f32,
    interpolation: Option<Interpolation>,
) -> TemporalAction<SizeBy> {
    TemporalAction::relative(
        duration,
        interpolation,
        SizeBy::new(amount_width, amount_height),
    )
}

pub fn show() -> VisibleAction {
    VisibleAction::new(true)
}

pub fn hide() -> VisibleAction {
    VisibleAction::new(false)
}

pub fn touchable(mode: Touchable) -> TouchableAction {
    TouchableAction::new(mode)
}

pub fn remove_actor() -> RemoveActorAction {
    RemoveActorAction::new()
}
